//! Token → HTML markup.
//!
//! Every token becomes `<span class="token-<kind>">escaped text</span>`.
//! Highlight marks (search matches) wrap runs of token spans in
//! `<mark class="current|other">`, splitting tokens at mark boundaries so
//! each mark is emitted exactly once.

use std::ops::Range;

use quill_syntax::{tokenize, Grammar, Token, TokenKind};

/// Which highlight style a mark uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkClass {
    /// The active search match
    Current,
    /// Any other search match
    Other,
}

impl MarkClass {
    pub fn css_class(self) -> &'static str {
        match self {
            MarkClass::Current => "current",
            MarkClass::Other => "other",
        }
    }
}

/// A highlighted byte range within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub range: Range<usize>,
    pub class: MarkClass,
}

/// Appends `text` to `out` with HTML special characters escaped.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Returns `text` with HTML special characters escaped.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn push_span(out: &mut String, kind: TokenKind, text: &str) {
    out.push_str("<span class=\"");
    out.push_str(kind.css_class());
    out.push_str("\">");
    escape_into(out, text);
    out.push_str("</span>");
}

/// Renders tokens as a sequence of spans.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        push_span(&mut out, token.kind, &token.value);
    }
    out
}

/// Tokenizes and renders one line.
pub fn render_line(text: &str, grammar: &Grammar) -> String {
    render_tokens(&tokenize(text, grammar))
}

/// Tokenizes and renders one line with highlight marks spliced in.
///
/// `marks` must be sorted, non-overlapping and lie on character
/// boundaries of `text`.
pub fn render_marked_line(text: &str, grammar: &Grammar, marks: &[Mark]) -> String {
    let tokens = tokenize(text, grammar);
    if marks.is_empty() {
        return render_tokens(&tokens);
    }

    let mut out = String::new();
    let mut open: Option<usize> = None;
    let mut next = 0;

    for token in &tokens {
        let mut pos = token.start;
        while pos < token.end {
            while next < marks.len() && marks[next].range.end <= pos {
                next += 1;
            }

            let (seg_end, inside) = match marks.get(next) {
                Some(mark) if mark.range.start <= pos => (token.end.min(mark.range.end), Some(next)),
                Some(mark) => (token.end.min(mark.range.start), None),
                None => (token.end, None),
            };

            if open != inside {
                if open.is_some() {
                    out.push_str("</mark>");
                }
                if let Some(idx) = inside {
                    out.push_str("<mark class=\"");
                    out.push_str(marks[idx].class.css_class());
                    out.push_str("\">");
                }
                open = inside;
            }

            push_span(&mut out, token.kind, &text[pos..seg_end]);
            pos = seg_end;
        }
    }

    if open.is_some() {
        out.push_str("</mark>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_syntax::{GrammarRegistry, LanguageKind};

    fn scripting() -> &'static Grammar {
        GrammarRegistry::global().resolve(LanguageKind::Scripting)
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_render_line() {
        let html = render_line("if (a < b)", scripting());
        assert_eq!(
            html,
            "<span class=\"token-control-keyword\">if</span>\
             <span class=\"token-text\"> </span>\
             <span class=\"token-punctuation\">(</span>\
             <span class=\"token-identifier\">a</span>\
             <span class=\"token-text\"> </span>\
             <span class=\"token-operator\">&lt;</span>\
             <span class=\"token-text\"> </span>\
             <span class=\"token-identifier\">b</span>\
             <span class=\"token-punctuation\">)</span>"
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(render_line("", scripting()), "");
    }

    #[test]
    fn test_mark_inside_token() {
        let marks = [Mark { range: 6..10, class: MarkClass::Current }];
        let html = render_marked_line("const valueX = 1", scripting(), &marks);

        assert!(html.starts_with("<span class=\"token-keyword\">const</span>"));
        assert!(!html.contains("<span class=\"token-identifier\"></span>"));
        assert!(html.contains(
            "<mark class=\"current\"><span class=\"token-identifier\">valu</span></mark>\
             <span class=\"token-identifier\">eX</span>"
        ));
    }

    #[test]
    fn test_mark_spanning_tokens() {
        let marks = [Mark { range: 2..7, class: MarkClass::Other }];
        let html = render_marked_line("a = b + c", scripting(), &marks);

        assert_eq!(html.matches("<mark").count(), 1);
        assert!(html.contains(
            "<mark class=\"other\">\
             <span class=\"token-operator\">=</span>\
             <span class=\"token-text\"> </span>\
             <span class=\"token-identifier\">b</span>\
             <span class=\"token-text\"> </span>\
             <span class=\"token-operator\">+</span>\
             </mark>"
        ));
    }

    #[test]
    fn test_adjacent_marks() {
        let marks = [
            Mark { range: 0..2, class: MarkClass::Other },
            Mark { range: 2..4, class: MarkClass::Current },
        ];
        let html = render_marked_line("abab", scripting(), &marks);

        assert_eq!(
            html,
            "<mark class=\"other\"><span class=\"token-identifier\">ab</span></mark>\
             <mark class=\"current\"><span class=\"token-identifier\">ab</span></mark>"
        );
    }
}
