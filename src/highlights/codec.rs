//! Highlight codec
//!
//! Pure conversions between the viewer form and the storage form. Both
//! directions are total: `to_viewer` never rejects a row, it degrades
//! missing geometry to a non-renderable highlight instead (the viewer skips
//! drawing it, navigation by id keeps working).

use sha2::{Digest, Sha256};

use super::types::{Comment, Highlight, HighlightContent, HighlightPosition, Rect, StoredHighlight};

/// Length of the hex document identifier.
const DOCUMENT_ID_LEN: usize = 16;

/// Derive the identity a document's highlights are stored under.
///
/// Deterministic over file name plus optional user identity, so the same
/// upload by the same user finds its highlights again in a later session
/// without a lookup table.
pub fn document_id(file_name: &str, user: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file_name.as_bytes());
    hasher.update(b"\n");
    if let Some(user) = user {
        hasher.update(user.as_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(&digest[..DOCUMENT_ID_LEN / 2])
}

/// Flatten a viewer highlight into its storage form under `document_id`.
pub fn to_stored(highlight: &Highlight, document_id: &str) -> StoredHighlight {
    StoredHighlight {
        id: highlight.id.clone(),
        document_id: document_id.to_string(),
        page: Some(highlight.position.page),
        bounding_rect: Some(highlight.position.bounding_rect.clone()),
        rects: Some(highlight.position.rects.clone()),
        scale: highlight.position.scale,
        text: highlight.content.text.clone(),
        image: highlight.content.image.clone(),
        comment: highlight.comment.as_ref().map(|c| c.text.clone()),
        emoji: highlight.comment.as_ref().and_then(|c| c.emoji.clone()),
    }
}

/// Rebuild a viewer highlight from a stored row.
///
/// Missing page or rectangles produce a zero-geometry position; callers can
/// check `Highlight::is_renderable` before drawing.
pub fn to_viewer(stored: StoredHighlight) -> Highlight {
    let comment = match (stored.comment, stored.emoji) {
        (Some(text), emoji) => Some(Comment { text, emoji }),
        (None, _) => None,
    };

    Highlight {
        id: stored.id,
        position: HighlightPosition {
            page: stored.page.unwrap_or(0),
            bounding_rect: stored.bounding_rect.unwrap_or_else(Rect::zero),
            rects: stored.rects.unwrap_or_default(),
            scale: stored.scale,
        },
        content: HighlightContent {
            text: stored.text,
            image: stored.image,
        },
        comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_highlight() -> Highlight {
        Highlight {
            id: "h1".to_string(),
            position: HighlightPosition {
                page: 4,
                bounding_rect: Rect {
                    x1: 10.0,
                    y1: 20.0,
                    x2: 110.0,
                    y2: 35.0,
                    width: 612.0,
                    height: 792.0,
                },
                rects: vec![
                    Rect {
                        x1: 10.0,
                        y1: 20.0,
                        x2: 110.0,
                        y2: 27.0,
                        width: 612.0,
                        height: 792.0,
                    },
                    Rect {
                        x1: 10.0,
                        y1: 28.0,
                        x2: 60.0,
                        y2: 35.0,
                        width: 612.0,
                        height: 792.0,
                    },
                ],
                scale: 1.25,
            },
            content: HighlightContent {
                text: Some("search term".to_string()),
                image: None,
            },
            comment: Some(Comment {
                text: "follow up".to_string(),
                emoji: Some("📌".to_string()),
            }),
        }
    }

    #[test]
    fn test_round_trip_preserves_render_and_navigation_fields() {
        let original = sample_highlight();
        let restored = to_viewer(to_stored(&original, "doc-1"));

        assert_eq!(restored.id, original.id);
        assert_eq!(restored.position.page, original.position.page);
        assert_eq!(restored.position.rects, original.position.rects);
        assert_eq!(
            restored.position.bounding_rect,
            original.position.bounding_rect
        );
        assert_eq!(restored.position.scale, original.position.scale);
        assert_eq!(restored.content, original.content);
        assert_eq!(restored.comment, original.comment);
    }

    #[test]
    fn test_to_stored_embeds_document_id() {
        let stored = to_stored(&sample_highlight(), "doc-42");
        assert_eq!(stored.document_id, "doc-42");
    }

    #[test]
    fn test_malformed_row_decodes_degraded_but_navigable() {
        let stored = StoredHighlight {
            id: "ghost".to_string(),
            document_id: "doc-1".to_string(),
            page: None,
            bounding_rect: None,
            rects: None,
            scale: 1.0,
            text: Some("orphaned".to_string()),
            image: None,
            comment: None,
            emoji: None,
        };

        let highlight = to_viewer(stored);
        assert_eq!(highlight.id, "ghost");
        assert!(!highlight.is_renderable());
        assert_eq!(highlight.content.text.as_deref(), Some("orphaned"));
    }

    #[test]
    fn test_document_id_is_deterministic() {
        let a = document_id("report.pdf", Some("ana@example.com"));
        let b = document_id("report.pdf", Some("ana@example.com"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_document_id_varies_with_name_and_user() {
        let base = document_id("report.pdf", None);
        assert_ne!(base, document_id("other.pdf", None));
        assert_ne!(base, document_id("report.pdf", Some("ana@example.com")));
    }
}
