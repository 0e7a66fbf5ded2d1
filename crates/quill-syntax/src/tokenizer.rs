//! The tokenizer: text + grammar → ordered, contiguous tokens.

use crate::{Grammar, Token, TokenKind};

/// Tokenizes `text` with `grammar`.
///
/// At each position the grammar's rules are tried in order and the first
/// match becomes a token. When nothing matches, a single character is
/// emitted as `TokenKind::Text`. Every iteration consumes at least one
/// character, so the loop ends after at most `text.len()` steps and the
/// tokens always cover the whole input.
pub fn tokenize(text: &str, grammar: &Grammar) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let (len, kind) = grammar.match_at(text, pos).unwrap_or_else(|| {
            // Fall back to one character, keeping UTF-8 boundaries intact
            let ch_len = text[pos..].chars().next().map_or(1, char::len_utf8);
            (ch_len, TokenKind::Text)
        });

        let end = pos + len;
        tokens.push(Token::new(kind, &text[pos..end], pos));
        pos = end;
    }

    tokens
}
