//! # Quill Buffer
//!
//! Rope-backed text buffer: the document the render pipeline reads lines
//! from, plus plain-text search that produces highlight matches.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns the rope data structure
//! - Line accessors return `Cow<str>`: borrowed when the line sits in one
//!   rope chunk, owned when it spans several
//! - Mutations require `&mut self` (exclusive access)

mod buffer;
mod search;

pub use buffer::TextBuffer;
pub use search::LineMatch;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Line {0} is out of bounds")]
    LineOutOfBounds(usize),

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
