//! The render coordinator: document lines → HTML fragment.
//!
//! ```text
//!  document ──► mode? ──Full────► every line ─┐
//!                  └───Windowed─► viewport ───┤
//!                                  window     ▼
//!                       overlay on line? ──yes──► tokenize + marks (uncached)
//!                                         └─no──► cache ─miss─► tokenize
//!                                                    │
//!                                                    ▼
//!                                                 fragment ──► caller
//! ```
//!
//! ## Learning: Interior Mutability for Re-entrancy
//!
//! Placing a fragment in the page can fire a mutation event whose handler
//! asks for another render. The coordinator is shared (`&self`), so such a
//! nested call can reach it while the first render is still running.
//! `Cell<RenderState>` records that a render is in progress and the nested
//! request is dropped instead of recursing. The cache, viewport and
//! attachment sit in `RefCell`s that are never borrowed across the
//! caller's callback.

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;

use quill_syntax::{GrammarRegistry, LanguageKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::{CacheKey, CacheStats, RenderCache};
use crate::config::{ModePolicy, RenderConfig};
use crate::document::LineSource;
use crate::markup;
use crate::overlay::Overlay;
use crate::viewport::{ViewportState, ViewportStats, VisibleRange};
use crate::{RenderError, RenderResult};

/// Identifies an attached document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of the document a render materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Every line
    Full,
    /// Only the viewport window plus buffer lines
    Windowed,
}

impl RenderMode {
    /// Picks the mode for a document of `line_count` lines.
    pub fn for_line_count(line_count: usize, threshold: usize) -> Self {
        if line_count >= threshold {
            RenderMode::Windowed
        } else {
            RenderMode::Full
        }
    }
}

/// Whether a render pass is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
}

/// Rendered markup plus the geometry the caller needs to place it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub html: String,
    pub mode: RenderMode,
    /// Materialized lines; `None` in full mode
    pub window: Option<VisibleRange>,
    /// Height the scroll container must report, in pixels
    pub total_height: f64,
}

/// Result of a render request.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(Fragment),
    /// Dropped because another render was in progress
    Skipped,
}

impl RenderOutcome {
    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            RenderOutcome::Rendered(fragment) => Some(fragment),
            RenderOutcome::Skipped => None,
        }
    }

    pub fn into_fragment(self) -> Option<Fragment> {
        match self {
            RenderOutcome::Rendered(fragment) => Some(fragment),
            RenderOutcome::Skipped => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Attachment {
    id: DocumentId,
    language: LanguageKind,
    mode: RenderMode,
    line_count: usize,
}

/// Marks the coordinator busy for the lifetime of a render pass.
struct RenderGuard<'a> {
    state: &'a Cell<RenderState>,
}

impl<'a> RenderGuard<'a> {
    fn enter(state: &'a Cell<RenderState>) -> Option<Self> {
        if state.get() == RenderState::Rendering {
            return None;
        }
        state.set(RenderState::Rendering);
        Some(Self { state })
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.state.set(RenderState::Idle);
    }
}

/// Renders highlighted documents, one attached document at a time.
///
/// Borrows its grammar registry for `'r`; [`RenderCoordinator::new`] uses
/// the built-in one.
pub struct RenderCoordinator<'r> {
    registry: &'r GrammarRegistry,
    cache: RefCell<RenderCache>,
    viewport: RefCell<ViewportState>,
    attachment: Cell<Option<Attachment>>,
    state: Cell<RenderState>,
    threshold: usize,
    policy: ModePolicy,
}

impl RenderCoordinator<'static> {
    /// Creates a coordinator using the built-in grammars.
    pub fn new(config: &RenderConfig) -> RenderResult<Self> {
        Self::with_registry(config, GrammarRegistry::global())
    }
}

impl<'r> RenderCoordinator<'r> {
    /// Creates a coordinator with a custom grammar registry.
    pub fn with_registry(config: &RenderConfig, registry: &'r GrammarRegistry) -> RenderResult<Self> {
        let viewport = ViewportState::new(
            config.container_height,
            config.line_height,
            config.buffer_lines,
            0,
        )?;

        let mut cache = RenderCache::with_capacity(config.cache_capacity);
        cache.set_enabled(config.cache_enabled);

        Ok(Self {
            registry,
            cache: RefCell::new(cache),
            viewport: RefCell::new(viewport),
            attachment: Cell::new(None),
            state: Cell::new(RenderState::Idle),
            threshold: config.windowing_threshold,
            policy: config.mode_policy,
        })
    }

    // ==================== Documents ====================

    /// Attaches a document and decides its render mode.
    ///
    /// Replaces any previously attached document and scrolls to the top.
    pub fn attach(&self, document: &dyn LineSource, language: LanguageKind) -> DocumentId {
        let line_count = document.line_count();
        let mode = RenderMode::for_line_count(line_count, self.threshold);
        let id = DocumentId::new();

        {
            let mut viewport = self.viewport.borrow_mut();
            viewport.set_total_lines(line_count);
            // 0.0 is always a valid offset
            let _ = viewport.set_scroll_offset(0.0);
        }

        self.attachment.set(Some(Attachment {
            id,
            language,
            mode,
            line_count,
        }));

        tracing::debug!(%id, %language, line_count, ?mode, "Attached document");
        id
    }

    /// Detaches the current document, if any.
    pub fn detach(&self) {
        if let Some(attachment) = self.attachment.take() {
            tracing::debug!(id = %attachment.id, "Detached document");
        }
    }

    /// ID of the attached document.
    pub fn document_id(&self) -> Option<DocumentId> {
        self.attachment.get().map(|a| a.id)
    }

    /// Language of the attached document.
    pub fn language(&self) -> Option<LanguageKind> {
        self.attachment.get().map(|a| a.language)
    }

    /// Current render mode of the attached document.
    pub fn mode(&self) -> Option<RenderMode> {
        self.attachment.get().map(|a| a.mode)
    }

    pub fn state(&self) -> RenderState {
        self.state.get()
    }

    // ==================== Viewport ====================

    /// Updates the scroll position. Negative offsets are rejected.
    pub fn set_scroll_offset(&self, offset: f64) -> RenderResult<()> {
        self.viewport.borrow_mut().set_scroll_offset(offset)?;
        Ok(())
    }

    /// Updates the viewport height after a resize.
    pub fn set_container_height(&self, height: f64) -> RenderResult<()> {
        self.viewport.borrow_mut().set_container_height(height)?;
        Ok(())
    }

    /// Scrolls so `line` is centred and returns the new offset.
    pub fn scroll_to_line(&self, line: usize) -> f64 {
        self.viewport.borrow_mut().scroll_to_line(line)
    }

    pub fn viewport_stats(&self) -> ViewportStats {
        self.viewport.borrow().stats()
    }

    // ==================== Cache ====================

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    pub fn set_cache_capacity(&self, capacity: usize) {
        self.cache.borrow_mut().set_capacity(capacity);
    }

    pub fn set_cache_enabled(&self, enabled: bool) {
        self.cache.borrow_mut().set_enabled(enabled);
    }

    /// Drops the cached render of one line.
    pub fn invalidate_line(&self, line: &str, language: LanguageKind) {
        self.cache.borrow_mut().invalidate(&CacheKey::new(line, language));
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    // ==================== Rendering ====================

    /// Renders the attached document.
    ///
    /// Returns `RenderOutcome::Skipped` if a render is already running.
    pub fn render(&self, document: &dyn LineSource, overlay: Option<&Overlay>) -> RenderResult<RenderOutcome> {
        self.render_with(document, overlay, |_| {})
    }

    /// Renders the attached document and hands the fragment to `place`.
    ///
    /// `place` runs while the coordinator is still `Rendering`, so any
    /// render it triggers (directly or through events) is skipped.
    pub fn render_with<F>(
        &self,
        document: &dyn LineSource,
        overlay: Option<&Overlay>,
        place: F,
    ) -> RenderResult<RenderOutcome>
    where
        F: FnOnce(&Fragment),
    {
        let Some(_guard) = RenderGuard::enter(&self.state) else {
            tracing::debug!("Render requested while rendering, skipping");
            return Ok(RenderOutcome::Skipped);
        };

        let attachment = self.refresh_mode(document.line_count())?;
        let overlay = overlay.filter(|o| !o.is_empty());

        let fragment = match attachment.mode {
            RenderMode::Full => self.render_full(document, attachment, overlay)?,
            RenderMode::Windowed => self.render_windowed(document, attachment, overlay)?,
        };

        place(&fragment);
        Ok(RenderOutcome::Rendered(fragment))
    }

    /// Updates the attachment for the document's current size.
    fn refresh_mode(&self, line_count: usize) -> RenderResult<Attachment> {
        let mut attachment = self.attachment.get().ok_or(RenderError::NotAttached)?;

        if self.policy == ModePolicy::FollowLineCount && attachment.line_count != line_count {
            let mode = RenderMode::for_line_count(line_count, self.threshold);
            if mode != attachment.mode {
                tracing::debug!(from = ?attachment.mode, to = ?mode, line_count, "Render mode changed");
            }
            attachment.mode = mode;
        }
        attachment.line_count = line_count;

        self.attachment.set(Some(attachment));
        self.viewport.borrow_mut().set_total_lines(line_count);
        Ok(attachment)
    }

    fn render_full(
        &self,
        document: &dyn LineSource,
        attachment: Attachment,
        overlay: Option<&Overlay>,
    ) -> RenderResult<Fragment> {
        let mut html = String::new();
        for idx in 0..attachment.line_count {
            self.push_line(&mut html, document, idx, attachment.language, overlay)?;
        }

        Ok(Fragment {
            html,
            mode: RenderMode::Full,
            window: None,
            total_height: self.viewport.borrow().total_height(),
        })
    }

    fn render_windowed(
        &self,
        document: &dyn LineSource,
        attachment: Attachment,
        overlay: Option<&Overlay>,
    ) -> RenderResult<Fragment> {
        let (window, spacer, total_height) = {
            let viewport = self.viewport.borrow();
            (viewport.window(), viewport.spacer_height(), viewport.total_height())
        };

        let mut html = String::new();
        let _ = write!(html, "<div class=\"virtual-spacer\" style=\"height: {spacer}px\"></div>");
        for idx in window.start..window.end {
            self.push_line(&mut html, document, idx, attachment.language, overlay)?;
        }

        tracing::trace!(start = window.start, end = window.end, "Rendered window");

        Ok(Fragment {
            html,
            mode: RenderMode::Windowed,
            window: Some(window),
            total_height,
        })
    }

    /// Appends one line wrapped in its line element.
    fn push_line(
        &self,
        out: &mut String,
        document: &dyn LineSource,
        idx: usize,
        language: LanguageKind,
        overlay: Option<&Overlay>,
    ) -> RenderResult<()> {
        let text = document.line(idx).ok_or(RenderError::LineOutOfRange {
            line: idx,
            line_count: document.line_count(),
        })?;

        let _ = write!(out, "<div class=\"line\" data-line=\"{idx}\">");
        match overlay.filter(|o| o.applies_to(idx)) {
            Some(overlay) => {
                let marks = overlay.marks_for_line(idx, &text);
                out.push_str(&markup::render_marked_line(&text, self.registry.resolve(language), &marks));
            }
            None => self.push_cached(out, &text, language),
        }
        out.push_str("</div>");
        Ok(())
    }

    /// Appends a line's markup from the cache, rendering it on a miss.
    fn push_cached(&self, out: &mut String, text: &str, language: LanguageKind) {
        let key = CacheKey::new(text, language);
        if let Some(html) = self.cache.borrow().get(&key) {
            out.push_str(html);
            return;
        }

        let html = markup::render_line(text, self.registry.resolve(language));
        out.push_str(&html);
        self.cache.borrow_mut().put(key, html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("let value{i} = {i};")).collect()
    }

    fn coordinator() -> RenderCoordinator<'static> {
        RenderCoordinator::new(&RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_custom_registry() {
        let registry = GrammarRegistry::new()
            .unwrap()
            .with_grammar(
                LanguageKind::Plain,
                vec![
                    quill_syntax::Rule::new(r"TODO", quill_syntax::TokenKind::Keyword),
                    quill_syntax::Rule::new(r"[^T]+|T", quill_syntax::TokenKind::Text),
                ],
            )
            .unwrap();

        let coordinator = RenderCoordinator::with_registry(&RenderConfig::default(), &registry).unwrap();
        let document = vec!["fix TODO".to_string()];
        coordinator.attach(&document, LanguageKind::Plain);

        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert!(fragment.html.contains("<span class=\"token-keyword\">TODO</span>"));
    }

    #[test]
    fn test_render_before_attach() {
        let coordinator = coordinator();
        let result = coordinator.render(&lines(3), None);
        assert!(matches!(result, Err(RenderError::NotAttached)));
        assert_eq!(coordinator.state(), RenderState::Idle);
    }

    #[test]
    fn test_mode_threshold() {
        let coordinator = coordinator();

        let small = lines(999);
        coordinator.attach(&small, LanguageKind::Scripting);
        assert_eq!(coordinator.mode(), Some(RenderMode::Full));
        let fragment = coordinator.render(&small, None).unwrap().into_fragment().unwrap();
        assert_eq!(fragment.mode, RenderMode::Full);
        assert_eq!(fragment.html.matches("class=\"line\"").count(), 999);

        let large = lines(1000);
        coordinator.attach(&large, LanguageKind::Scripting);
        assert_eq!(coordinator.mode(), Some(RenderMode::Windowed));
        let fragment = coordinator.render(&large, None).unwrap().into_fragment().unwrap();
        assert_eq!(fragment.mode, RenderMode::Windowed);
    }

    #[test]
    fn test_windowed_render() {
        let config = RenderConfig {
            container_height: 500.0,
            line_height: 20.0,
            buffer_lines: 5,
            ..RenderConfig::default()
        };
        let coordinator = RenderCoordinator::new(&config).unwrap();
        let document = lines(10_000);
        coordinator.attach(&document, LanguageKind::Scripting);
        coordinator.set_scroll_offset(2000.0).unwrap();

        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();

        assert_eq!(fragment.window, Some(VisibleRange { start: 95, end: 130 }));
        assert_eq!(fragment.total_height, 200_000.0);
        assert!(fragment
            .html
            .starts_with("<div class=\"virtual-spacer\" style=\"height: 1900px\"></div>"));
        assert_eq!(fragment.html.matches("class=\"line\"").count(), 35);
        assert!(fragment.html.contains("data-line=\"95\""));
        assert!(fragment.html.contains("data-line=\"129\""));
        assert!(!fragment.html.contains("data-line=\"130\""));
        assert_eq!(
            coordinator.viewport_stats(),
            ViewportStats { visible_start: 95, visible_end: 130, total_height: 200_000.0 }
        );
    }

    #[test]
    fn test_repeat_render_is_cached() {
        let coordinator = coordinator();
        let document = vec!["const a = 1;".to_string(), "const a = 1;".to_string()];
        coordinator.attach(&document, LanguageKind::Scripting);

        let first = coordinator.render(&document, None).unwrap();
        let size = coordinator.cache_stats().size;
        let second = coordinator.render(&document, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(size, 1);
        assert_eq!(coordinator.cache_stats().size, size);
    }

    #[test]
    fn test_overlay_bypasses_cache() {
        let coordinator = coordinator();
        let mut document: Vec<String> = lines(8);
        document[5] = "const name = 5;".to_string();
        coordinator.attach(&document, LanguageKind::Scripting);

        let overlay = Overlay::new(
            vec![crate::SearchMatch { line: 5, column: 6, length: 4 }],
            Some(0),
        );

        let fragment = coordinator
            .render(&document, Some(&overlay))
            .unwrap()
            .into_fragment()
            .unwrap();

        // Only the seven lines without a match were cached
        assert_eq!(coordinator.cache_stats().size, 7);
        assert_eq!(fragment.html.matches("<mark class=\"current\">").count(), 1);
        assert!(fragment.html.contains(
            "<mark class=\"current\"><span class=\"token-identifier\">name</span></mark>"
        ));

        // Rendering again with the same overlay doesn't grow the cache
        coordinator.render(&document, Some(&overlay)).unwrap();
        assert_eq!(coordinator.cache_stats().size, 7);
    }

    #[test]
    fn test_nested_render_is_skipped() {
        let coordinator = coordinator();
        let document = lines(3);
        coordinator.attach(&document, LanguageKind::Scripting);

        let mut nested = None;
        let outcome = coordinator
            .render_with(&document, None, |_| {
                assert_eq!(coordinator.state(), RenderState::Rendering);
                nested = Some(coordinator.render(&document, None).unwrap());
            })
            .unwrap();

        assert!(matches!(outcome, RenderOutcome::Rendered(_)));
        assert_eq!(nested, Some(RenderOutcome::Skipped));
        assert_eq!(coordinator.state(), RenderState::Idle);
    }

    #[test]
    fn test_mode_follows_line_count() {
        let coordinator = coordinator();
        let mut document = lines(999);
        coordinator.attach(&document, LanguageKind::Scripting);

        document.push("x".to_string());
        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert_eq!(fragment.mode, RenderMode::Windowed);

        document.truncate(10);
        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert_eq!(fragment.mode, RenderMode::Full);
    }

    #[test]
    fn test_mode_fixed_on_attach() {
        let config = RenderConfig {
            mode_policy: ModePolicy::FixedOnAttach,
            ..RenderConfig::default()
        };
        let coordinator = RenderCoordinator::new(&config).unwrap();
        let mut document = lines(999);
        coordinator.attach(&document, LanguageKind::Scripting);

        document.push("x".to_string());
        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert_eq!(fragment.mode, RenderMode::Full);
        assert_eq!(fragment.html.matches("class=\"line\"").count(), 1000);
    }

    #[test]
    fn test_scroll_validation() {
        let coordinator = coordinator();
        assert!(matches!(
            coordinator.set_scroll_offset(-5.0),
            Err(RenderError::Viewport(crate::ViewportError::NegativeScrollOffset(_)))
        ));
        assert!(coordinator.set_container_height(0.0).is_err());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = RenderConfig {
            line_height: 0.0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            RenderCoordinator::new(&config),
            Err(RenderError::Viewport(crate::ViewportError::InvalidLineHeight(_)))
        ));
    }

    #[test]
    fn test_scroll_to_line_moves_window() {
        let coordinator = coordinator();
        let document = lines(5000);
        coordinator.attach(&document, LanguageKind::Plain);

        let offset = coordinator.scroll_to_line(2500);
        assert_eq!(offset, 2500.0 * 20.0 - 300.0);

        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert!(fragment.window.unwrap().contains(2500));
    }

    #[test]
    fn test_inconsistent_document() {
        struct Liar;
        impl LineSource for Liar {
            fn line_count(&self) -> usize {
                2
            }
            fn line(&self, _idx: usize) -> Option<std::borrow::Cow<'_, str>> {
                None
            }
        }

        let coordinator = coordinator();
        coordinator.attach(&Liar, LanguageKind::Plain);
        assert!(matches!(
            coordinator.render(&Liar, None),
            Err(RenderError::LineOutOfRange { line: 0, line_count: 2 })
        ));
        assert_eq!(coordinator.state(), RenderState::Idle);
    }

    #[test]
    fn test_disabled_cache_still_renders() {
        let coordinator = coordinator();
        coordinator.set_cache_enabled(false);
        let document = lines(4);
        coordinator.attach(&document, LanguageKind::Scripting);

        let fragment = coordinator.render(&document, None).unwrap().into_fragment().unwrap();
        assert!(fragment.html.contains("token-keyword"));
        assert_eq!(coordinator.cache_stats().size, 0);
    }

    #[test]
    fn test_invalidate_line() {
        let coordinator = coordinator();
        let document = lines(2);
        coordinator.attach(&document, LanguageKind::Scripting);
        coordinator.render(&document, None).unwrap();
        assert_eq!(coordinator.cache_stats().size, 2);

        coordinator.invalidate_line(&document[0], LanguageKind::Scripting);
        coordinator.invalidate_line("not cached", LanguageKind::Scripting);
        assert_eq!(coordinator.cache_stats().size, 1);

        coordinator.clear_cache();
        assert_eq!(coordinator.cache_stats().size, 0);
    }
}
