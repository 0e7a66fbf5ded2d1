//! Stylesheets (CSS / SCSS / Less).

use crate::{Grammar, GrammarResult, Rule, TokenKind};

fn value_keywords() -> &'static [&'static str] {
    &[
        "inherit", "initial", "unset", "revert", "auto", "none", "block",
        "inline", "inline-block", "flex", "grid", "absolute", "relative",
        "fixed", "sticky", "hidden", "visible", "solid", "dashed", "bold",
        "normal", "transparent", "currentColor",
    ]
}

pub(crate) fn stylesheet() -> GrammarResult<Grammar> {
    Grammar::new(
        "css",
        vec![
            Rule::new(r"/\*(?:[^*]|\*(?!/))*(?:\*/)?", TokenKind::Comment),
            Rule::new(r"//.*", TokenKind::Comment),
            Rule::new(r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String),
            Rule::new(r"'(?:[^'\\]|\\.)*'?", TokenKind::String),
            Rule::new(r"@[\w-]+", TokenKind::Keyword),
            Rule::new(r"!\s*important\b", TokenKind::Keyword),
            Rule::new(r"#[0-9a-fA-F]{3,8}(?![\w-])", TokenKind::Number),
            Rule::new(r"#[\w-]+", TokenKind::Attribute),
            Rule::new(r"\.-?[A-Za-z_][\w-]*", TokenKind::Class),
            // `name:` is a declaration unless the line opens a rule block
            Rule::new(r"--?[A-Za-z_][\w-]*(?=\s*:[^{]*$)", TokenKind::Property),
            Rule::new(r"[A-Za-z_][\w-]*(?=\s*:[^{]*$)", TokenKind::Property),
            Rule::new(r"::?[A-Za-z-]+", TokenKind::Keyword),
            Rule::new(r"[A-Za-z_-][\w-]*(?=\()", TokenKind::Function),
            Rule::new(r"-?(?:\d+(?:\.\d+)?|\.\d+)(?:%|[A-Za-z]+)?", TokenKind::Number),
            Rule::new(
                format!(r"\b(?:{})(?![\w-])", value_keywords().join("|")),
                TokenKind::Keyword,
            ),
            Rule::new(r"-?[A-Za-z_][\w-]*", TokenKind::Identifier),
            Rule::new(r"[{}();:,\[\]]", TokenKind::Punctuation),
            Rule::new(r"[>+~*=|^$]", TokenKind::Operator),
            Rule::new(r"\s+", TokenKind::Text),
        ],
    )
}
