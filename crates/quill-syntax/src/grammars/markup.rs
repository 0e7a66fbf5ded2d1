//! Tag-based markup (HTML / XML).

use crate::{Grammar, GrammarResult, Rule, TokenKind};

pub(crate) fn markup() -> GrammarResult<Grammar> {
    Grammar::new(
        "html",
        vec![
            Rule::new(r"<!--(?:[^-]|-(?!->))*(?:-->)?", TokenKind::Comment),
            Rule::new(r"<!\[CDATA\[(?:[^\]]|\](?!\]>))*(?:\]\]>)?", TokenKind::String),
            Rule::new(r"<![A-Za-z][^>]*>?", TokenKind::Keyword),
            Rule::new(r"<\?[A-Za-z][^>]*>?", TokenKind::Keyword),
            Rule::new(r"</?[A-Za-z][\w:.-]*", TokenKind::Tag),
            Rule::new(r"/?>", TokenKind::Tag),
            Rule::new(r#""[^"]*"?"#, TokenKind::String),
            Rule::new(r"'[^']*'?", TokenKind::String),
            Rule::new(r"[A-Za-z_:@][\w:.-]*(?=\s*=)", TokenKind::Attribute),
            Rule::new(r"&(?:#\d+|#[xX][0-9a-fA-F]+|[A-Za-z]\w*);", TokenKind::Keyword),
            Rule::new(r"=", TokenKind::Operator),
            Rule::new(r"\s+", TokenKind::Text),
            Rule::new(r#"[^<>&"'=\s/]+"#, TokenKind::Text),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::test_support::kinds;

    #[test]
    fn test_element_with_attributes() {
        let grammar = markup().unwrap();
        let tokens = kinds(&grammar, r#"<a href="/x" class='y'>Link</a>"#);

        assert_eq!(
            tokens,
            vec![
                (TokenKind::Tag, "<a".to_string()),
                (TokenKind::Attribute, "href".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::String, "\"/x\"".to_string()),
                (TokenKind::Attribute, "class".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::String, "'y'".to_string()),
                (TokenKind::Tag, ">".to_string()),
                (TokenKind::Text, "Link".to_string()),
                (TokenKind::Tag, "</a".to_string()),
                (TokenKind::Tag, ">".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_hides_tags() {
        let grammar = markup().unwrap();
        let tokens = kinds(&grammar, "<!-- <div> --> <br/>");

        assert_eq!(tokens[0], (TokenKind::Comment, "<!-- <div> -->".to_string()));
        assert_eq!(tokens[1], (TokenKind::Tag, "<br".to_string()));
        assert_eq!(tokens[2], (TokenKind::Tag, "/>".to_string()));
    }

    #[test]
    fn test_doctype_and_entities() {
        let grammar = markup().unwrap();
        let tokens = kinds(&grammar, "<!DOCTYPE html> a &amp; b");

        assert_eq!(tokens[0], (TokenKind::Keyword, "<!DOCTYPE html>".to_string()));
        assert_eq!(tokens[2], (TokenKind::Keyword, "&amp;".to_string()));
    }
}
