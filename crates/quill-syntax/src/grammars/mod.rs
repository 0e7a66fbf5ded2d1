//! Built-in grammars.
//!
//! Each grammar lists comment and string rules first so their contents are
//! never re-tokenized as keywords, then keywords, then the progressively
//! more generic identifier rules, with whitespace last. Characters no rule
//! covers fall back to single-character text tokens in the tokenizer.

mod docs;
mod markup;
mod scripting;
mod stylesheet;

pub(crate) use docs::docs;
pub(crate) use markup::markup;
pub(crate) use scripting::scripting;
pub(crate) use stylesheet::stylesheet;

use crate::{Grammar, GrammarResult, Rule, TokenKind};

/// The fallback grammar: the whole line is one text token.
pub(crate) fn plain() -> GrammarResult<Grammar> {
    Grammar::new("text", vec![Rule::new(r"[\s\S]+", TokenKind::Text)])
}

/// Builds a whole-word alternation: `\b(?:a|b|c)\b`.
pub(crate) fn word_set(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}
