//! Document sessions
//!
//! One session per registered document: its identity, the URLs search runs
//! against, and the in-memory highlight set the viewer renders. The set is
//! the authoritative state while the session lives; the persistence backend
//! trails it optimistically.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::highlights::Highlight;

/// A registered document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Deterministic identity highlights are stored under.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// URL of the primary rendered document.
    pub primary_url: String,
    /// URL of the OCR-derived rendering, when one was produced.
    pub ocr_url: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Snapshot of a session: the record plus the highlight set as of the read.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    pub record: DocumentRecord,
    pub highlights: Vec<Highlight>,
}

struct SessionEntry {
    record: DocumentRecord,
    highlights: Vec<Highlight>,
}

/// In-memory registry of document sessions.
#[derive(Default)]
pub struct DocumentRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document, seeding its highlight set (typically with rows
    /// fetched from the persistence backend). Re-registering the same id
    /// replaces the session.
    pub fn register(&self, record: DocumentRecord, seed: Vec<Highlight>) {
        let mut sessions = self.sessions.write();
        sessions.insert(
            record.id.clone(),
            SessionEntry {
                record,
                highlights: seed,
            },
        );
    }

    /// Snapshot a session.
    pub fn get(&self, document_id: &str) -> Option<DocumentSession> {
        let sessions = self.sessions.read();
        sessions.get(document_id).map(|entry| DocumentSession {
            record: entry.record.clone(),
            highlights: entry.highlights.clone(),
        })
    }

    /// Current highlight set for a document.
    pub fn highlights(&self, document_id: &str) -> Option<Vec<Highlight>> {
        let sessions = self.sessions.read();
        sessions.get(document_id).map(|e| e.highlights.clone())
    }

    /// Append newly found highlights, preserving existing order.
    ///
    /// Returns the merged set and whether this append populated a
    /// previously empty set (navigation uses the transition to retry a
    /// buffered anchor).
    pub fn append_highlights(
        &self,
        document_id: &str,
        new: Vec<Highlight>,
    ) -> Option<(Vec<Highlight>, bool)> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(document_id)?;
        let was_empty = entry.highlights.is_empty();
        entry.highlights.extend(new);
        Some((entry.highlights.clone(), was_empty && !entry.highlights.is_empty()))
    }

    /// Replace the set wholesale (explicit highlight-file load).
    pub fn replace_highlights(
        &self,
        document_id: &str,
        highlights: Vec<Highlight>,
    ) -> Option<(Vec<Highlight>, bool)> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(document_id)?;
        let was_empty = entry.highlights.is_empty();
        entry.highlights = highlights;
        Some((entry.highlights.clone(), was_empty && !entry.highlights.is_empty()))
    }

    /// Clear the in-memory set. Does not touch the persistence backend.
    pub fn clear_highlights(&self, document_id: &str) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(document_id) {
            Some(entry) => {
                entry.highlights.clear();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlights::{HighlightContent, HighlightPosition, Rect};

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            name: "report.pdf".to_string(),
            primary_url: "blob:primary".to_string(),
            ocr_url: None,
            registered_at: Utc::now(),
        }
    }

    fn highlight(id: &str) -> Highlight {
        Highlight {
            id: id.to_string(),
            position: HighlightPosition {
                page: 1,
                bounding_rect: Rect::zero(),
                rects: vec![Rect::zero()],
                scale: 1.0,
            },
            content: HighlightContent::default(),
            comment: None,
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let registry = DocumentRegistry::new();
        registry.register(record("doc-1"), vec![highlight("a")]);

        let (set, _) = registry
            .append_highlights("doc-1", vec![highlight("b"), highlight("c")])
            .unwrap();

        let ids: Vec<&str> = set.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_append_reports_empty_to_populated_transition() {
        let registry = DocumentRegistry::new();
        registry.register(record("doc-1"), Vec::new());

        let (_, populated) = registry
            .append_highlights("doc-1", vec![highlight("a")])
            .unwrap();
        assert!(populated);

        let (_, populated) = registry
            .append_highlights("doc-1", vec![highlight("b")])
            .unwrap();
        assert!(!populated);

        // Appending nothing to an empty set is not a transition.
        registry.clear_highlights("doc-1");
        let (_, populated) = registry.append_highlights("doc-1", Vec::new()).unwrap();
        assert!(!populated);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let registry = DocumentRegistry::new();
        registry.register(record("doc-1"), vec![highlight("a"), highlight("b")]);

        let (set, _) = registry
            .replace_highlights("doc-1", vec![highlight("z")])
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].id, "z");
    }

    #[test]
    fn test_clear_is_in_memory_only_and_reports_unknown_documents() {
        let registry = DocumentRegistry::new();
        registry.register(record("doc-1"), vec![highlight("a")]);

        assert!(registry.clear_highlights("doc-1"));
        assert!(registry.highlights("doc-1").unwrap().is_empty());
        assert!(!registry.clear_highlights("doc-2"));
    }
}
