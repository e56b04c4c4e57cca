//! Highlight types
//!
//! Two representations of the same annotation: the viewer form consumed by
//! the browser UI (`Highlight`) and the flattened storage form exchanged
//! with the persistence backend (`StoredHighlight`).

use serde::{Deserialize, Serialize};

/// Viewer-space rectangle, in CSS pixels at the scale the match was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn zero() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Where a highlight sits on the document.
///
/// `rects` holds one rectangle per rendered line of the match; for a
/// single-line match it has exactly one element. `scale` is the zoom factor
/// the rectangles were computed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightPosition {
    pub page: u32,
    pub bounding_rect: Rect,
    pub rects: Vec<Rect>,
    pub scale: f64,
}

/// What the highlight captured: matched text and/or an image snippet
/// (data URL) of the region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Free-text annotation attached to a highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// One user-visible annotation in viewer form.
///
/// `id` is generated once when the highlight is created and must survive
/// every persistence round-trip unchanged; anchor navigation looks
/// highlights up by this id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub position: HighlightPosition,
    pub content: HighlightContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

impl Highlight {
    /// Whether the viewer has enough geometry to draw this highlight.
    ///
    /// A stored row that lost its rectangles or page decodes to a
    /// non-renderable highlight; navigation by id still works.
    pub fn is_renderable(&self) -> bool {
        self.position.page > 0 && !self.position.rects.is_empty()
    }
}

/// Flattened storage form of a highlight.
///
/// The geometry fields are optional so that a malformed stored row decodes
/// to a degraded highlight instead of failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredHighlight {
    pub id: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rects: Option<Vec<Rect>>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

fn default_scale() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_highlight_tolerates_missing_geometry() {
        let json = r#"{"id": "h1", "documentId": "doc-1"}"#;
        let stored: StoredHighlight = serde_json::from_str(json).unwrap();

        assert_eq!(stored.id, "h1");
        assert_eq!(stored.document_id, "doc-1");
        assert!(stored.page.is_none());
        assert!(stored.rects.is_none());
        assert_eq!(stored.scale, 1.0);
    }

    #[test]
    fn test_stored_highlight_camel_case_wire_names() {
        let stored = StoredHighlight {
            id: "h1".to_string(),
            document_id: "doc-1".to_string(),
            page: Some(3),
            bounding_rect: Some(Rect::zero()),
            rects: Some(vec![Rect::zero()]),
            scale: 1.5,
            text: Some("term".to_string()),
            image: None,
            comment: None,
            emoji: None,
        };

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["documentId"], "doc-1");
        assert_eq!(value["boundingRect"]["x1"], 0.0);
        assert_eq!(value["page"], 3);
    }
}
