//! Grammar registry: language → grammar.
//!
//! ## Learning: `OnceLock` for Process-Wide Data
//!
//! The built-in grammars are compiled once, the first time anyone asks for
//! them, and never change afterwards. `OnceLock` gives us a lazily
//! initialized `&'static` without `unsafe` or a global mutex on every read.

use std::sync::OnceLock;

use crate::grammars;
use crate::{Grammar, GrammarResult, LanguageKind, Rule};

/// Owns one grammar per `LanguageKind`.
///
/// The registry is populated up front and read-only afterwards, so lookups
/// need no synchronization.
#[derive(Debug)]
pub struct GrammarRegistry {
    scripting: Grammar,
    markup: Grammar,
    stylesheet: Grammar,
    docs: Grammar,
    plain: Grammar,
}

impl GrammarRegistry {
    /// Builds a registry with the built-in grammars.
    pub fn new() -> GrammarResult<Self> {
        let registry = Self {
            scripting: grammars::scripting()?,
            markup: grammars::markup()?,
            stylesheet: grammars::stylesheet()?,
            docs: grammars::docs()?,
            plain: grammars::plain()?,
        };
        tracing::debug!("Grammar registry initialized");
        Ok(registry)
    }

    /// Returns the shared registry with the built-in grammars.
    pub fn global() -> &'static GrammarRegistry {
        static REGISTRY: OnceLock<GrammarRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::new().expect("built-in grammars are valid"))
    }

    /// Replaces the grammar for `language` during setup.
    ///
    /// The rules are validated like any other grammar; an invalid rule
    /// leaves the registry untouched and returns the error.
    pub fn with_grammar(mut self, language: LanguageKind, rules: Vec<Rule>) -> GrammarResult<Self> {
        let grammar = Grammar::new(language.id(), rules)?;
        *self.slot_mut(language) = grammar;
        Ok(self)
    }

    /// Returns the grammar for `language`.
    pub fn resolve(&self, language: LanguageKind) -> &Grammar {
        match language {
            LanguageKind::Scripting => &self.scripting,
            LanguageKind::Markup => &self.markup,
            LanguageKind::Stylesheet => &self.stylesheet,
            LanguageKind::Docs => &self.docs,
            LanguageKind::Plain => &self.plain,
        }
    }

    /// Resolves a raw identifier, falling back to plain text.
    pub fn resolve_id(&self, id: Option<&str>) -> &Grammar {
        self.resolve(LanguageKind::from_id(id))
    }

    fn slot_mut(&mut self, language: LanguageKind) -> &mut Grammar {
        match language {
            LanguageKind::Scripting => &mut self.scripting,
            LanguageKind::Markup => &mut self.markup,
            LanguageKind::Stylesheet => &mut self.stylesheet,
            LanguageKind::Docs => &mut self.docs,
            LanguageKind::Plain => &mut self.plain,
        }
    }
}
