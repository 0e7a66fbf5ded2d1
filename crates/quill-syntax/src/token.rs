//! Tokens produced by the tokenizer.

/// Types of syntax elements for highlighting.
///
/// The set is closed: renderers map each kind to a fixed CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    ControlKeyword,
    String,
    Comment,
    Number,
    Operator,
    Punctuation,
    Identifier,
    Function,
    Class,
    Property,
    Method,
    Attribute,
    Tag,
    Text,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 15] = [
        TokenKind::Keyword,
        TokenKind::ControlKeyword,
        TokenKind::String,
        TokenKind::Comment,
        TokenKind::Number,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Identifier,
        TokenKind::Function,
        TokenKind::Class,
        TokenKind::Property,
        TokenKind::Method,
        TokenKind::Attribute,
        TokenKind::Tag,
        TokenKind::Text,
    ];

    /// Returns the kind's name as used in markup (`token-<name>`).
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::ControlKeyword => "control-keyword",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Identifier => "identifier",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::Property => "property",
            TokenKind::Method => "method",
            TokenKind::Attribute => "attribute",
            TokenKind::Tag => "tag",
            TokenKind::Text => "text",
        }
    }

    /// Returns the CSS class applied to tokens of this kind.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Keyword => "token-keyword",
            TokenKind::ControlKeyword => "token-control-keyword",
            TokenKind::String => "token-string",
            TokenKind::Comment => "token-comment",
            TokenKind::Number => "token-number",
            TokenKind::Operator => "token-operator",
            TokenKind::Punctuation => "token-punctuation",
            TokenKind::Identifier => "token-identifier",
            TokenKind::Function => "token-function",
            TokenKind::Class => "token-class",
            TokenKind::Property => "token-property",
            TokenKind::Method => "token-method",
            TokenKind::Attribute => "token-attribute",
            TokenKind::Tag => "token-tag",
            TokenKind::Text => "token-text",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed, contiguous piece of a line.
///
/// `start` and `end` are byte offsets into the tokenized text, so
/// `end - start == value.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Kind of syntax element
    pub kind: TokenKind,
    /// The matched text
    pub value: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: &str, start: usize) -> Self {
        Self {
            kind,
            value: value.to_string(),
            start,
            end: start + value.len(),
        }
    }

    /// Byte range covered by the token.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
