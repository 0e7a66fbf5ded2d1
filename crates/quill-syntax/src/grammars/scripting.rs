//! C-like scripting language (JavaScript / TypeScript).

use super::word_set;
use crate::{Grammar, GrammarResult, Rule, TokenKind};

fn control_keywords() -> &'static [&'static str] {
    &[
        "if", "else", "for", "while", "do", "switch", "case", "default", "break",
        "continue", "return", "throw", "try", "catch", "finally", "yield", "await",
    ]
}

fn keywords() -> &'static [&'static str] {
    &[
        "async", "class", "const", "debugger", "delete", "export", "extends",
        "from", "function", "import", "in", "instanceof", "let", "new", "of",
        "static", "super", "this", "typeof", "var", "void", "with", "enum",
        "implements", "interface", "package", "private", "protected", "public",
        "abstract", "as", "type", "get", "set", "true", "false", "null",
        "undefined", "NaN", "Infinity",
    ]
}

fn builtin_types() -> &'static [&'static str] {
    &[
        "string", "number", "boolean", "any", "never", "unknown", "object",
        "symbol", "bigint",
    ]
}

/// Identifier characters, `$` included.
const IDENT: &str = r"[A-Za-z_$][\w$]*";

pub(crate) fn scripting() -> GrammarResult<Grammar> {
    Grammar::new(
        "javascript",
        vec![
            // Comments: a block comment left open runs to the end of the line
            Rule::new(r"//.*", TokenKind::Comment),
            Rule::new(r"/\*(?:[^*]|\*(?!/))*(?:\*/)?", TokenKind::Comment),
            // Strings, possibly unterminated while typing
            Rule::new(r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String),
            Rule::new(r"'(?:[^'\\]|\\.)*'?", TokenKind::String),
            Rule::new(r"`(?:[^`\\]|\\.)*`?", TokenKind::String),
            Rule::new(word_set(control_keywords()), TokenKind::ControlKeyword),
            Rule::new(word_set(keywords()), TokenKind::Keyword),
            Rule::new(
                r"(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|(?:\d[\d_]*(?:\.\d[\d_]*)?|\.\d[\d_]*)(?:[eE][+-]?\d+)?)n?\b",
                TokenKind::Number,
            ),
            Rule::new(word_set(builtin_types()), TokenKind::Class),
            Rule::new(r"[A-Z][\w$]*", TokenKind::Class),
            // `name(params) {` is a definition, `name(` alone is a call
            Rule::new(format!(r"{IDENT}(?=\s*\([^()]*\)\s*\{{)"), TokenKind::Method),
            Rule::new(format!(r"{IDENT}(?=\s*\()"), TokenKind::Function),
            Rule::new(format!(r"{IDENT}(?=:)"), TokenKind::Property),
            Rule::new(IDENT, TokenKind::Identifier),
            Rule::new(
                r"=>|===|!==|\*\*=|\?\?=|&&=|\|\|=|==|!=|<=|>=|&&|\|\||\?\?|\?\.|\+\+|--|\*\*|<<|>>>|>>|[-+*/%=<>!&|^~?]=?",
                TokenKind::Operator,
            ),
            Rule::new(r"[{}()\[\];,.:]", TokenKind::Punctuation),
            Rule::new(r"\s+", TokenKind::Text),
        ],
    )
}
