//! Anchor navigation
//!
//! The viewer links to highlights through page-fragment anchors of the form
//! `#highlight-<id>`. Resolution is an exact id lookup in the current
//! highlight set. An anchor that arrives before the set is populated is
//! buffered and retried once the set transitions from empty to populated,
//! so a deep link into a freshly opened document still lands.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::highlights::Highlight;

/// Fragment prefix that marks a highlight anchor.
pub const ANCHOR_PREFIX: &str = "#highlight-";

/// Extract the candidate highlight id from a fragment anchor.
///
/// Returns `None` for anchors that do not carry the prefix; the bare prefix
/// yields the empty-string id.
pub fn parse_anchor(anchor: &str) -> Option<&str> {
    anchor.strip_prefix(ANCHOR_PREFIX)
}

/// Look up the highlight an anchor points at.
pub fn resolve<'a>(anchor: &str, highlights: &'a [Highlight]) -> Option<&'a Highlight> {
    let id = parse_anchor(anchor)?;
    highlights.iter().find(|h| h.id == id)
}

/// Per-document buffer of the last unresolved anchor.
#[derive(Default)]
pub struct NavigationBuffer {
    pending: Mutex<HashMap<String, String>>,
}

impl NavigationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an anchor-change event.
    ///
    /// On a hit the buffered anchor (if any) is dropped and the target is
    /// returned once. On a miss the anchor is buffered, replacing any
    /// earlier unresolved one.
    pub fn on_anchor_change(
        &self,
        document_id: &str,
        anchor: &str,
        highlights: &[Highlight],
    ) -> Option<Highlight> {
        match resolve(anchor, highlights) {
            Some(highlight) => {
                self.pending.lock().remove(document_id);
                Some(highlight.clone())
            }
            None => {
                if parse_anchor(anchor).is_some() {
                    self.pending
                        .lock()
                        .insert(document_id.to_string(), anchor.to_string());
                }
                None
            }
        }
    }

    /// Retry the buffered anchor after the set became populated.
    ///
    /// The buffer is cleared on a hit; a still-missing anchor stays
    /// buffered for the next transition.
    pub fn on_set_populated(
        &self,
        document_id: &str,
        highlights: &[Highlight],
    ) -> Option<Highlight> {
        let anchor = self.pending.lock().get(document_id).cloned()?;
        let target = resolve(&anchor, highlights)?.clone();
        self.pending.lock().remove(document_id);
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlights::{HighlightContent, HighlightPosition, Rect};

    fn highlight(id: &str) -> Highlight {
        Highlight {
            id: id.to_string(),
            position: HighlightPosition {
                page: 2,
                bounding_rect: Rect::zero(),
                rects: vec![Rect::zero()],
                scale: 1.0,
            },
            content: HighlightContent::default(),
            comment: None,
        }
    }

    #[test]
    fn test_resolve_matches_exact_id() {
        let set = vec![highlight("abc123"), highlight("def456")];
        let hit = resolve("#highlight-abc123", &set).unwrap();
        assert_eq!(hit.id, "abc123");
    }

    #[test]
    fn test_resolve_misses_unknown_id_and_foreign_anchors() {
        let set = vec![highlight("abc123")];
        assert!(resolve("#highlight-zzz", &set).is_none());
        assert!(resolve("#section-2", &set).is_none());
        assert!(resolve("", &set).is_none());
    }

    #[test]
    fn test_bare_prefix_resolves_only_an_empty_string_id() {
        let set = vec![highlight("abc123")];
        assert!(resolve("#highlight-", &set).is_none());

        let set = vec![highlight("")];
        assert!(resolve("#highlight-", &set).is_some());
    }

    #[test]
    fn test_unresolved_anchor_is_buffered_and_retried_on_populate() {
        let buffer = NavigationBuffer::new();

        // Anchor fires before any highlight is loaded.
        assert!(buffer.on_anchor_change("doc-1", "#highlight-abc123", &[]).is_none());

        // The set becomes populated; the buffered anchor lands exactly once.
        let set = vec![highlight("abc123")];
        let hit = buffer.on_set_populated("doc-1", &set).unwrap();
        assert_eq!(hit.id, "abc123");
        assert!(buffer.on_set_populated("doc-1", &set).is_none());
    }

    #[test]
    fn test_hit_clears_any_buffered_anchor() {
        let buffer = NavigationBuffer::new();
        buffer.on_anchor_change("doc-1", "#highlight-old", &[]);

        let set = vec![highlight("new")];
        assert!(buffer.on_anchor_change("doc-1", "#highlight-new", &set).is_some());
        assert!(buffer.on_set_populated("doc-1", &set).is_none());
    }

    #[test]
    fn test_still_missing_anchor_stays_buffered() {
        let buffer = NavigationBuffer::new();
        buffer.on_anchor_change("doc-1", "#highlight-late", &[]);

        // Populated without the target: buffer survives for the next try.
        assert!(buffer.on_set_populated("doc-1", &[highlight("other")]).is_none());

        let set = vec![highlight("other"), highlight("late")];
        assert_eq!(buffer.on_set_populated("doc-1", &set).unwrap().id, "late");
    }

    #[test]
    fn test_foreign_anchors_are_not_buffered() {
        let buffer = NavigationBuffer::new();
        buffer.on_anchor_change("doc-1", "#toc", &[]);
        assert!(buffer.on_set_populated("doc-1", &[highlight("abc")]).is_none());
    }

    #[test]
    fn test_buffers_are_scoped_per_document() {
        let buffer = NavigationBuffer::new();
        buffer.on_anchor_change("doc-1", "#highlight-a", &[]);
        buffer.on_anchor_change("doc-2", "#highlight-b", &[]);

        let set = vec![highlight("a"), highlight("b")];
        assert_eq!(buffer.on_set_populated("doc-1", &set).unwrap().id, "a");
        assert_eq!(buffer.on_set_populated("doc-2", &set).unwrap().id, "b");
    }
}
