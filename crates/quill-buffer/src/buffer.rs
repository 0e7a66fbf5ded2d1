//! Text buffer backed by a rope.
//!
//! ## Why Rope?
//!
//! Highlighting reads individual lines out of documents that can run to
//! hundreds of thousands of lines. A rope gives:
//! - **O(log n) line lookup**: `line_text(i)` never scans the whole file
//! - **O(log n) edits**: insertions and deletions don't shift the tail
//! - **Cheap line counts**: the rope tracks line breaks as it is built

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use crate::{BufferError, BufferResult};

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from(content.as_str()))
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a line (0-indexed) without its line ending.
    pub fn line_text(&self, line_idx: usize) -> BufferResult<Cow<'_, str>> {
        if line_idx >= self.len_lines() {
            return Err(BufferError::LineOutOfBounds(line_idx));
        }

        let line: Cow<'_, str> = self.rope.line(line_idx).into();
        Ok(match line {
            Cow::Borrowed(s) => Cow::Borrowed(trim_line_ending(s)),
            Cow::Owned(s) => Cow::Owned(trim_line_ending(&s).to_string()),
        })
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line. A buffer ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Deletes text in a character range, returning what was removed.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        if range.start > range.end || range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }

        let deleted: String = self.rope.slice(range.clone()).into();
        self.rope.remove(range);
        Ok(deleted)
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
