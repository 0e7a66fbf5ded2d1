//! Virtual scrolling: which lines are visible for a given scroll position.
//!
//! ```text
//!   scroll_offset ─┐
//!                  ▼
//!   ┌──────────────────────┐  ◄ visible_start = first_visible - buffer_lines
//!   │  buffer lines        │
//!   ├──────────────────────┤  ◄ first_visible = floor(scroll / line_height)
//!   │  viewport            │    visible_count = ceil(height / line_height)
//!   ├──────────────────────┤
//!   │  buffer lines        │
//!   └──────────────────────┘  ◄ visible_end (exclusive, ≤ total_lines)
//! ```
//!
//! Only `[visible_start, visible_end)` is materialized. A spacer of
//! `visible_start * line_height` pixels keeps those lines at their real
//! position, and the container reports the full `total_lines * line_height`.

use serde::Serialize;

/// Viewport configuration and scroll errors.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("Container height must be positive, got {0}")]
    InvalidContainerHeight(f64),

    #[error("Line height must be positive, got {0}")]
    InvalidLineHeight(f64),

    #[error("Scroll offset must be a non-negative number, got {0}")]
    NegativeScrollOffset(f64),
}

/// Result type for viewport operations
pub type ViewportResult<T> = Result<T, ViewportError>;

/// Half-open range of lines to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..self.end).contains(&line)
    }
}

/// Read-only viewport diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportStats {
    pub visible_start: usize,
    pub visible_end: usize,
    pub total_height: f64,
}

/// Scroll position and geometry of the editor viewport, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    scroll_offset: f64,
    container_height: f64,
    line_height: f64,
    buffer_lines: usize,
    total_lines: usize,
}

fn check_positive(value: f64, err: fn(f64) -> ViewportError) -> ViewportResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

impl ViewportState {
    /// Creates a viewport scrolled to the top.
    ///
    /// Heights must be positive and finite.
    pub fn new(
        container_height: f64,
        line_height: f64,
        buffer_lines: usize,
        total_lines: usize,
    ) -> ViewportResult<Self> {
        Ok(Self {
            scroll_offset: 0.0,
            container_height: check_positive(container_height, ViewportError::InvalidContainerHeight)?,
            line_height: check_positive(line_height, ViewportError::InvalidLineHeight)?,
            buffer_lines,
            total_lines,
        })
    }

    // ==================== Updates ====================

    pub fn set_scroll_offset(&mut self, offset: f64) -> ViewportResult<()> {
        if !(offset.is_finite() && offset >= 0.0) {
            return Err(ViewportError::NegativeScrollOffset(offset));
        }
        self.scroll_offset = offset;
        Ok(())
    }

    pub fn set_container_height(&mut self, height: f64) -> ViewportResult<()> {
        self.container_height = check_positive(height, ViewportError::InvalidContainerHeight)?;
        Ok(())
    }

    pub fn set_total_lines(&mut self, total_lines: usize) {
        self.total_lines = total_lines;
    }

    /// Centres `line` in the viewport and returns the new scroll offset.
    pub fn scroll_to_line(&mut self, line: usize) -> f64 {
        self.scroll_offset = self.offset_for_line(line);
        self.scroll_offset
    }

    // ==================== Queries ====================

    /// Scroll offset that puts `line` in the middle of the viewport.
    pub fn offset_for_line(&self, line: usize) -> f64 {
        (line as f64 * self.line_height - self.container_height / 2.0).max(0.0)
    }

    /// Lines to materialize for the current scroll position.
    ///
    /// When scrolled past the end of the document the range is empty and
    /// starts at `total_lines`.
    pub fn window(&self) -> VisibleRange {
        let first_visible = (self.scroll_offset / self.line_height).floor() as usize;
        let visible_count = (self.container_height / self.line_height).ceil() as usize;

        let end = first_visible
            .saturating_add(visible_count)
            .saturating_add(self.buffer_lines)
            .min(self.total_lines);
        let start = first_visible.saturating_sub(self.buffer_lines).min(end);

        VisibleRange { start, end }
    }

    /// Full scrollable height of the document.
    pub fn total_height(&self) -> f64 {
        self.total_lines as f64 * self.line_height
    }

    /// Height of the spacer placed before the first materialized line.
    pub fn spacer_height(&self) -> f64 {
        self.window().start as f64 * self.line_height
    }

    pub fn stats(&self) -> ViewportStats {
        let window = self.window();
        ViewportStats {
            visible_start: window.start,
            visible_end: window.end,
            total_height: self.total_height(),
        }
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn buffer_lines(&self) -> usize {
        self.buffer_lines
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }
}
