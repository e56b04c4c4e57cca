//! Persistence payload selection
//!
//! The highlight backend understands exactly one body shape per configured
//! storage method: a record store wants the document id alongside the rows,
//! a flat file wants the bare row array. Every call site that pushes
//! highlights builds its body through [`UpdatePayload::for_method`] so the
//! shapes cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::highlights::StoredHighlight;

/// How the backend stores highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageMethod {
    /// One JSON document per highlight file; rows carry their own ids.
    FlatFile,
    /// Keyed rows in a database; the document id travels with the body.
    RecordStore,
}

impl Default for StorageMethod {
    fn default() -> Self {
        Self::FlatFile
    }
}

/// Request body for the highlight update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpdatePayload {
    /// `{ "documentId": ..., "highlights": [...] }`
    RecordStore {
        #[serde(rename = "documentId")]
        document_id: String,
        highlights: Vec<StoredHighlight>,
    },
    /// Bare `[...]` with no wrapping object.
    FlatFile(Vec<StoredHighlight>),
}

impl UpdatePayload {
    /// Build the body the configured backend expects.
    pub fn for_method(
        method: StorageMethod,
        document_id: &str,
        highlights: Vec<StoredHighlight>,
    ) -> Self {
        match method {
            StorageMethod::RecordStore => Self::RecordStore {
                document_id: document_id.to_string(),
                highlights,
            },
            StorageMethod::FlatFile => Self::FlatFile(highlights),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlights::{to_stored, Highlight, HighlightContent, HighlightPosition, Rect};

    fn stored_rows() -> Vec<StoredHighlight> {
        let highlight = Highlight {
            id: "h1".to_string(),
            position: HighlightPosition {
                page: 1,
                bounding_rect: Rect::zero(),
                rects: vec![Rect::zero()],
                scale: 1.0,
            },
            content: HighlightContent {
                text: Some("term".to_string()),
                image: None,
            },
            comment: None,
        };
        vec![to_stored(&highlight, "doc-1")]
    }

    #[test]
    fn test_record_store_body_wraps_document_id_and_highlights() {
        let payload = UpdatePayload::for_method(StorageMethod::RecordStore, "doc-1", stored_rows());
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.is_object());
        assert_eq!(value["documentId"], "doc-1");
        assert_eq!(value["highlights"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_flat_file_body_is_bare_array() {
        let payload = UpdatePayload::for_method(StorageMethod::FlatFile, "doc-1", stored_rows());
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["id"], "h1");
    }

    #[test]
    fn test_storage_method_parses_kebab_case() {
        let method: StorageMethod = serde_json::from_str("\"record-store\"").unwrap();
        assert_eq!(method, StorageMethod::RecordStore);
        let method: StorageMethod = serde_json::from_str("\"flat-file\"").unwrap();
        assert_eq!(method, StorageMethod::FlatFile);
    }
}
