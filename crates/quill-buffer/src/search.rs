//! Plain substring search, reported per line.

use crate::TextBuffer;

/// A search hit inside one line.
///
/// `column` and `length` count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl TextBuffer {
    /// Finds all non-overlapping occurrences of `pattern`, line by line.
    ///
    /// Matches never span a line break. An empty pattern finds nothing.
    pub fn find_matches(&self, pattern: &str) -> Vec<LineMatch> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let length = pattern.chars().count();
        let mut matches = Vec::new();

        for line_idx in 0..self.len_lines() {
            let Ok(line) = self.line_text(line_idx) else {
                continue;
            };
            for (byte_idx, _) in line.match_indices(pattern) {
                matches.push(LineMatch {
                    line: line_idx,
                    column: line[..byte_idx].chars().count(),
                    length,
                });
            }
        }

        matches
    }
}
