//! Search-match overlays.
//!
//! The search engine hands us plain data: where the matches are and which
//! one is current. Lines carrying a match are rendered outside the cache,
//! because the cache key (line text + language) cannot tell which match is
//! current.

use crate::markup::{Mark, MarkClass};

/// One search hit. `column` and `length` count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl From<quill_buffer::LineMatch> for SearchMatch {
    fn from(m: quill_buffer::LineMatch) -> Self {
        Self {
            line: m.line,
            column: m.column,
            length: m.length,
        }
    }
}

/// Matches to highlight plus the index of the current one.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    matches: Vec<SearchMatch>,
    current: Option<usize>,
    /// Indices into `matches`, sorted by position
    by_position: Vec<usize>,
}

impl Overlay {
    /// Creates an overlay. A `current` index outside `matches` is ignored.
    pub fn new(matches: Vec<SearchMatch>, current: Option<usize>) -> Self {
        let mut by_position: Vec<usize> = (0..matches.len()).collect();
        by_position.sort_by_key(|&i| (matches[i].line, matches[i].column));
        let current = current.filter(|&i| i < matches.len());

        Self {
            matches,
            current,
            by_position,
        }
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.current.map(|i| &self.matches[i])
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches on `line` in column order, with their highlight class.
    pub fn matches_on(&self, line: usize) -> impl Iterator<Item = (&SearchMatch, MarkClass)> {
        let first = self.by_position.partition_point(|&i| self.matches[i].line < line);
        self.by_position[first..]
            .iter()
            .take_while(move |&&i| self.matches[i].line == line)
            .map(move |&i| {
                let class = if Some(i) == self.current {
                    MarkClass::Current
                } else {
                    MarkClass::Other
                };
                (&self.matches[i], class)
            })
    }

    /// True if any match lies on `line`.
    pub fn applies_to(&self, line: usize) -> bool {
        self.matches_on(line).next().is_some()
    }

    /// Converts the matches on `line` into byte-range marks over `text`.
    ///
    /// Matches are clipped to the line; empty matches and matches that
    /// overlap an earlier one are dropped.
    pub fn marks_for_line(&self, line: usize, text: &str) -> Vec<Mark> {
        let char_count = text.chars().count();
        let byte_at = |column: usize| {
            text.char_indices()
                .nth(column)
                .map_or(text.len(), |(byte, _)| byte)
        };

        let mut marks: Vec<Mark> = Vec::new();
        for (m, class) in self.matches_on(line) {
            let start_col = m.column.min(char_count);
            let end_col = m.column.saturating_add(m.length).min(char_count);
            if start_col >= end_col {
                continue;
            }

            let range = byte_at(start_col)..byte_at(end_col);
            if marks.last().is_some_and(|prev| prev.range.end > range.start) {
                continue;
            }
            marks.push(Mark { range, class });
        }
        marks
    }
}
