//! Language identifiers.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The languages the highlighter knows about.
///
/// `Plain` covers everything else; it is never an error to ask for a
/// language we do not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    /// C-like scripting language (JavaScript and relatives)
    Scripting,
    /// Tag-based markup (HTML, XML, SVG)
    Markup,
    /// Stylesheets (CSS and relatives)
    Stylesheet,
    /// Lightweight documentation markup (Markdown)
    Docs,
    /// Unknown or unsupported language
    #[default]
    Plain,
}

impl LanguageKind {
    /// Every language, including `Plain`.
    pub const ALL: [LanguageKind; 5] = [
        LanguageKind::Scripting,
        LanguageKind::Markup,
        LanguageKind::Stylesheet,
        LanguageKind::Docs,
        LanguageKind::Plain,
    ];

    /// Maps a language identifier (or file extension) to a language.
    ///
    /// Matching is case-insensitive; unknown or missing identifiers map to
    /// `Plain`.
    pub fn from_id(id: Option<&str>) -> Self {
        let Some(id) = id else {
            return LanguageKind::Plain;
        };

        match id.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" | "typescript" | "ts" | "tsx" | "mts"
            | "cts" => LanguageKind::Scripting,
            "html" | "htm" | "xhtml" | "xml" | "xsl" | "xslt" | "svg" => LanguageKind::Markup,
            "css" | "scss" | "sass" | "less" => LanguageKind::Stylesheet,
            "markdown" | "md" | "mdx" | "mdown" => LanguageKind::Docs,
            _ => LanguageKind::Plain,
        }
    }

    /// Detects the language from a file name's extension.
    pub fn detect(path: impl AsRef<Path>) -> Self {
        let ext = path.as_ref().extension().and_then(|e| e.to_str());
        Self::from_id(ext)
    }

    /// Returns the canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            LanguageKind::Scripting => "javascript",
            LanguageKind::Markup => "html",
            LanguageKind::Stylesheet => "css",
            LanguageKind::Docs => "markdown",
            LanguageKind::Plain => "text",
        }
    }
}

impl std::fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
