//! Lightweight documentation markup (Markdown).
//!
//! Block-level constructs (headings, quotes, lists, fences) are only
//! recognized at the start of a line.

use crate::{Grammar, GrammarResult, Rule, TokenKind};

pub(crate) fn docs() -> GrammarResult<Grammar> {
    Grammar::new(
        "markdown",
        vec![
            Rule::at_line_start(r"\s{0,3}(?:```|~~~).*", TokenKind::String),
            Rule::at_line_start(r"\s{0,3}#{1,6}(?=\s|$).*", TokenKind::Keyword),
            Rule::at_line_start(r"\s*>.*", TokenKind::Comment),
            Rule::at_line_start(r"\s{0,3}(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$", TokenKind::Operator),
            Rule::at_line_start(r"\s*(?:[-*+]|\d+[.)])(?=\s)", TokenKind::Punctuation),
            Rule::new(r"`[^`]*`?", TokenKind::String),
            Rule::new(r"\\[\\`*_{}\[\]()#+\-.!<>]", TokenKind::Operator),
            Rule::new(r"<https?://[^>\s]+>", TokenKind::Function),
            Rule::new(r"</?[A-Za-z][^>]*>", TokenKind::Tag),
            Rule::new(r"!?\[[^\]]*\](?:\([^)]*\)|\[[^\]]*\])", TokenKind::Function),
            Rule::new(r"\*\*[^*]+\*\*|__[^_]+__", TokenKind::Class),
            Rule::new(r"\*[^*\s][^*]*\*|_[^_\s][^_]*_", TokenKind::Property),
            Rule::new(r"\w+", TokenKind::Text),
            Rule::new(r"\s+", TokenKind::Text),
        ],
    )
}
