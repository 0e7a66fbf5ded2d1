//! # Quill Syntax
//!
//! Pattern-based syntax highlighting: a tokenizer driven by ordered rule
//! lists ("grammars") and a registry that resolves a language to its grammar.
//!
//! ## Why ordered rules instead of a parser?
//!
//! Highlighting runs on every keystroke, one line at a time:
//! - **Total**: every input produces a tokenization, even half-typed code
//! - **Lossless**: concatenating token values reproduces the line exactly
//! - **Predictable**: the first matching rule wins, so comment and string
//!   rules placed first shield their contents from keyword rules
//!
//! ## Learning: Closed Enums over String Keys
//!
//! Languages are a `LanguageKind` enum rather than a `HashMap<String, _>`.
//! Adding a language forces every `match` on it to be updated, which the
//! compiler checks for us.
//!
//! ## Limitation
//!
//! Each line is tokenized on its own. A block comment opened on one line is
//! only recognized up to the end of that line; following lines are tokenized
//! as ordinary code.

mod grammar;
mod grammars;
mod language;
mod registry;
mod token;
mod tokenizer;

pub use grammar::{Anchor, Grammar, GrammarError, Rule};
pub use language::LanguageKind;
pub use registry::GrammarRegistry;
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;

/// Result type for grammar construction
pub type GrammarResult<T> = Result<T, GrammarError>;
