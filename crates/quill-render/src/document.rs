//! The document interface the renderer reads from.

use std::borrow::Cow;

use quill_buffer::TextBuffer;

/// Read access to a document's lines.
///
/// Lines are returned without their line ending.
pub trait LineSource {
    fn line_count(&self) -> usize;

    fn line(&self, idx: usize) -> Option<Cow<'_, str>>;
}

impl LineSource for TextBuffer {
    fn line_count(&self) -> usize {
        self.len_lines()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.line_text(idx).ok()
    }
}

impl LineSource for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.get(idx).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(idx)
    }
}

impl LineSource for [&str] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.get(idx).map(|s| Cow::Borrowed(*s))
    }
}
