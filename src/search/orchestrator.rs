//! Search orchestration
//!
//! Runs keyword queries against a document's primary rendering, falls back
//! to the OCR-derived rendering only when the primary search succeeds with
//! zero matches, appends the results to the session's highlight set, and
//! pushes the merged set to the persistence backend.
//!
//! Persistence is optimistic: the in-memory set is authoritative and a
//! failed push never rolls it back. The outcome carries a tagged status so
//! callers can tell a synced result from a local-only one.

use std::sync::Arc;

use serde::Serialize;

use super::searcher::{SearchError, TextSearcher};
use super::zoom::{resolve_scale, ZoomProvider};
use crate::documents::DocumentRegistry;
use crate::highlights::{to_stored, Highlight};
use crate::storage::{HighlightStore, StorageMethod, StoreError, UpdatePayload};

/// What happened to the backend copy of the set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SearchStatus {
    /// Input was rejected (empty query or unknown document); nothing ran.
    Skipped,
    /// The merged set was written to the persistence backend.
    Synced,
    /// The merge happened in memory but the backend write failed.
    LocalOnly { reason: String },
}

/// Result of one search invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub highlights: Vec<Highlight>,
    #[serde(flatten)]
    pub status: SearchStatus,
    /// True when this search took the set from empty to populated;
    /// navigation uses the transition to retry a buffered anchor.
    #[serde(skip)]
    pub populated: bool,
}

impl SearchOutcome {
    fn skipped(highlights: Vec<Highlight>) -> Self {
        Self {
            highlights,
            status: SearchStatus::Skipped,
            populated: false,
        }
    }
}

/// Orchestrates search, merge, and persistence for document sessions.
pub struct SearchOrchestrator {
    registry: Arc<DocumentRegistry>,
    searcher: Arc<dyn TextSearcher>,
    store: Arc<dyn HighlightStore>,
    storage_method: StorageMethod,
}

impl SearchOrchestrator {
    pub fn new(
        registry: Arc<DocumentRegistry>,
        searcher: Arc<dyn TextSearcher>,
        store: Arc<dyn HighlightStore>,
        storage_method: StorageMethod,
    ) -> Self {
        Self {
            registry,
            searcher,
            store,
            storage_method,
        }
    }

    /// Run one search against a registered document.
    ///
    /// A searcher failure propagates; the OCR fallback is keyed on a
    /// successful-but-empty primary result only.
    pub async fn run(
        &self,
        document_id: &str,
        query: &str,
        viewer: &dyn ZoomProvider,
    ) -> Result<SearchOutcome, SearchError> {
        if query.is_empty() {
            let current = self.registry.highlights(document_id).unwrap_or_default();
            return Ok(SearchOutcome::skipped(current));
        }

        let Some(session) = self.registry.get(document_id) else {
            return Ok(SearchOutcome::skipped(Vec::new()));
        };

        // Keyword alternatives; empty alternatives pass through unchanged,
        // their meaning belongs to the search service.
        let keywords: Vec<String> = query.split('|').map(str::to_string).collect();

        let scale = resolve_scale(viewer);

        let mut found = self
            .searcher
            .search(&keywords, &session.record.primary_url, scale)
            .await?;

        if found.is_empty() {
            if let Some(ocr_url) = &session.record.ocr_url {
                tracing::debug!(
                    document_id,
                    "Primary search empty, retrying against OCR rendering"
                );
                found = self.searcher.search(&keywords, ocr_url, scale).await?;
            }
        }

        let Some((updated, populated)) = self.registry.append_highlights(document_id, found) else {
            // Session vanished between the snapshot and the merge.
            return Ok(SearchOutcome::skipped(Vec::new()));
        };

        let status = match self.persist(document_id, &updated).await {
            Ok(()) => SearchStatus::Synced,
            Err(e) => {
                tracing::warn!(
                    document_id,
                    error = %e,
                    "Highlight sync failed, keeping local set"
                );
                SearchStatus::LocalOnly {
                    reason: e.to_string(),
                }
            }
        };

        Ok(SearchOutcome {
            highlights: updated,
            status,
            populated,
        })
    }

    /// Push a highlight set to the persistence backend.
    ///
    /// The body shape is selected here for every caller, so the post-search
    /// and post-file-load pushes can never diverge.
    pub async fn persist(
        &self,
        document_id: &str,
        highlights: &[Highlight],
    ) -> Result<(), StoreError> {
        let stored = highlights
            .iter()
            .map(|h| to_stored(h, document_id))
            .collect();
        let payload = UpdatePayload::for_method(self.storage_method, document_id, stored);
        self.store.update(&payload).await
    }
}
