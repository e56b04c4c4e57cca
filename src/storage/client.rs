//! Highlight persistence client
//!
//! The highlight backend is an external HTTP collaborator with two
//! endpoints: fetch rows for a document id, and replace the rows for a
//! document. The trait keeps the orchestrator testable without a network.

use async_trait::async_trait;
use serde_json::json;

use super::payload::UpdatePayload;
use crate::highlights::StoredHighlight;

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Highlight backend request failed: {0}")]
    Request(String),

    #[error("Highlight backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode highlight backend response: {0}")]
    Decode(String),
}

/// Highlight persistence backend
#[async_trait]
pub trait HighlightStore: Send + Sync {
    /// Fetch the stored rows for a document; an empty list means no prior
    /// data.
    async fn fetch(&self, document_id: &str) -> Result<Vec<StoredHighlight>, StoreError>;

    /// Replace the stored rows with the given payload.
    async fn update(&self, payload: &UpdatePayload) -> Result<(), StoreError>;
}

/// Reqwest-backed store talking to the configured highlight backend.
pub struct HttpHighlightStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHighlightStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl HighlightStore for HttpHighlightStore {
    async fn fetch(&self, document_id: &str) -> Result<Vec<StoredHighlight>, StoreError> {
        let url = format!("{}/highlight/get", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!(document_id))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        // The backend answers null when it has never seen this document.
        let rows: Option<Vec<StoredHighlight>> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(rows.unwrap_or_default())
    }

    async fn update(&self, payload: &UpdatePayload) -> Result<(), StoreError> {
        let url = format!("{}/highlight/update", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        Ok(())
    }
}

/// Recording store for tests: captures every update body, serves a canned
/// fetch response, and can be flipped into a failing mode.
#[cfg(test)]
pub mod mock {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingStore {
        pub fetch_response: Vec<StoredHighlight>,
        pub fail_updates: bool,
        pub updates: Mutex<Vec<UpdatePayload>>,
    }

    #[async_trait]
    impl HighlightStore for RecordingStore {
        async fn fetch(&self, _document_id: &str) -> Result<Vec<StoredHighlight>, StoreError> {
            Ok(self.fetch_response.clone())
        }

        async fn update(&self, payload: &UpdatePayload) -> Result<(), StoreError> {
            if self.fail_updates {
                return Err(StoreError::Status {
                    status: 500,
                    body: "backend down".to_string(),
                });
            }
            self.updates.lock().push(payload.clone());
            Ok(())
        }
    }
}
