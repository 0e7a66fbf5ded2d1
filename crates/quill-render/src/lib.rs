//! # Quill Render
//!
//! Turns a document into highlighted HTML, fast enough to redo on every edit.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   RenderCoordinator                      │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐  │
//! │  │ ViewportState│ │ RenderCache  │ │  GrammarRegistry │  │
//! │  │ (which lines)│ │ (line → html)│ │  (quill-syntax)  │  │
//! │  └──────────────┘ └──────────────┘ └──────────────────┘  │
//! │          │                │                 │            │
//! │  ┌───────┴────────────────┴─────────────────┴─────────┐  │
//! │  │   markup: tokens + overlay marks → escaped spans   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Documents under the windowing threshold are rendered in full. Larger ones
//! only materialize the lines around the viewport, behind a spacer that keeps
//! them at their real scroll position.
//!
//! ## Learning: Traits at the Boundary
//!
//! The coordinator never owns a document. It reads lines through
//! [`LineSource`], which `TextBuffer`, `Vec<String>` and `[&str]` all
//! implement, so tests can render a plain vector.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod document;
pub mod markup;
pub mod overlay;
pub mod viewport;

pub use cache::{CacheKey, CacheStats, RenderCache};
pub use config::{ConfigError, ModePolicy, RenderConfig};
pub use coordinator::{DocumentId, Fragment, RenderCoordinator, RenderMode, RenderOutcome, RenderState};
pub use document::LineSource;
pub use markup::{Mark, MarkClass};
pub use overlay::{Overlay, SearchMatch};
pub use viewport::{ViewportError, ViewportState, ViewportStats, VisibleRange};

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No document attached")]
    NotAttached,

    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    #[error("Line {line} out of range (document has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
}
