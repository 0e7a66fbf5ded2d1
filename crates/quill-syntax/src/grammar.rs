//! Grammars: ordered rule lists for one language.
//!
//! ## Learning: Validate at Construction
//!
//! A rule that can match the empty string would stall the tokenizer, so
//! `Grammar::new` rejects it up front and returns `GrammarError`. Once a
//! `Grammar` value exists, tokenizing with it cannot fail.
//!
//! The check works on the parsed pattern: a rule whose shortest possible
//! match is zero characters is rejected, whatever input it would need to
//! actually produce that empty match.

use fancy_regex::{Expr, Regex};

use crate::{GrammarResult, TokenKind};

/// Errors raised while building a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("Rule {index} has an invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("Rule {index} can match an empty string: `{pattern}`")]
    ZeroWidth { index: usize, pattern: String },

    #[error("Grammar `{0}` has no rules")]
    Empty(String),
}

/// Where a rule may start matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// At any cursor position.
    #[default]
    Anywhere,
    /// Only at the first column of a line.
    LineStart,
}

/// A pattern → kind rule, as written by grammar authors.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    kind: TokenKind,
    anchor: Anchor,
}

impl Rule {
    /// Creates a rule that may match anywhere on the line.
    pub fn new(pattern: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            anchor: Anchor::Anywhere,
        }
    }

    /// Creates a rule that is only tried at column 0.
    pub fn at_line_start(pattern: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            anchor: Anchor::LineStart,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

/// A validated rule with its anchored matcher.
#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) rule: Rule,
    pub(crate) regex: Regex,
}

impl CompiledRule {
    /// Returns the length of the match starting exactly at byte `pos`.
    ///
    /// The whole line stays visible to the pattern, so `\b` and lookbehind
    /// see the characters before the cursor. Empty matches and engine
    /// failures (backtrack limit) count as no match.
    pub(crate) fn match_len(&self, text: &str, pos: usize) -> Option<usize> {
        match self.regex.find_from_pos(text, pos) {
            Ok(Some(m)) if m.start() == pos && m.end() > pos => Some(m.end() - pos),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(pattern = %self.rule.pattern, "Rule match aborted: {}", err);
                None
            }
        }
    }
}

/// Fewest characters `expr` can consume.
///
/// Assertions and lookarounds consume nothing. Backreferences are assumed
/// to be able to match empty.
fn min_width(expr: &Expr) -> usize {
    match expr {
        Expr::Any { .. } => 1,
        Expr::Literal { val, .. } => val.chars().count(),
        Expr::Delegate { size, .. } => *size,
        Expr::Concat(children) => children.iter().map(min_width).fold(0, usize::saturating_add),
        Expr::Alt(children) => children.iter().map(min_width).min().unwrap_or(0),
        Expr::Group(child) | Expr::AtomicGroup(child) => min_width(child),
        Expr::Repeat { child, lo, .. } => min_width(child).saturating_mul(*lo),
        Expr::Conditional {
            condition,
            true_branch,
            false_branch,
        } => min_width(condition)
            .saturating_add(min_width(true_branch).min(min_width(false_branch))),
        Expr::Empty
        | Expr::Assertion(_)
        | Expr::LookAround(..)
        | Expr::Backref { .. }
        | Expr::BackrefWithRelativeRecursionLevel { .. }
        | Expr::BackrefExistsCondition(_)
        | Expr::KeepOut
        | Expr::ContinueFromPreviousMatchEnd
        | Expr::SubroutineCall(_)
        | Expr::UnresolvedNamedSubroutineCall { .. } => 0,
    }
}

/// Inputs every compiled rule is also run against, as a last check for
/// empty matches.
fn probe_inputs() -> impl Iterator<Item = String> {
    std::iter::once(String::new())
        .chain(std::iter::once("\t".to_string()))
        .chain((0x20u8..=0x7e).map(|b| (b as char).to_string()))
}

/// An ordered, immutable list of rules for one language.
///
/// Order is priority: the first rule that matches at the cursor wins, even
/// when a later rule would match more text.
#[derive(Debug)]
pub struct Grammar {
    name: String,
    rules: Vec<CompiledRule>,
}

impl Grammar {
    /// Compiles and validates a grammar.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> GrammarResult<Self> {
        let name = name.into();
        if rules.is_empty() {
            return Err(GrammarError::Empty(name));
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            let invalid = |e: fancy_regex::Error| GrammarError::InvalidPattern {
                index,
                pattern: rule.pattern.clone(),
                reason: e.to_string(),
            };
            let regex = Regex::new(&format!(r"\G(?:{})", rule.pattern)).map_err(invalid)?;
            let tree = Expr::parse_tree(&rule.pattern).map_err(invalid)?;

            let zero_width = min_width(&tree.expr) == 0
                || probe_inputs().any(|probe| {
                    matches!(regex.find(&probe), Ok(Some(m)) if m.start() == 0 && m.end() == 0)
                });
            if zero_width {
                return Err(GrammarError::ZeroWidth {
                    index,
                    pattern: rule.pattern.clone(),
                });
            }

            compiled.push(CompiledRule { rule, regex });
        }

        tracing::debug!(grammar = %name, rules = compiled.len(), "Compiled grammar");

        Ok(Self {
            name,
            rules: compiled,
        })
    }

    /// Returns the grammar's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in priority order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Finds the first rule matching at byte `pos` of `text`.
    ///
    /// Returns the match length in bytes and the rule's kind.
    pub(crate) fn match_at(&self, text: &str, pos: usize) -> Option<(usize, TokenKind)> {
        self.rules
            .iter()
            .filter(|c| c.rule.anchor == Anchor::Anywhere || pos == 0)
            .find_map(|c| c.match_len(text, pos).map(|len| (len, c.rule.kind)))
    }
}
