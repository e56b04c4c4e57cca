//! Text-search collaborator
//!
//! Locating keyword occurrences inside a rendered page is owned by an
//! external service; this module defines the seam and the reqwest-backed
//! production implementation. Every match comes back with a freshly
//! generated id so merged sets never collide.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::highlights::{Highlight, HighlightContent, HighlightPosition, Rect};

/// Search collaborator errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search service request failed: {0}")]
    Request(String),

    #[error("Search service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode search service response: {0}")]
    Decode(String),
}

/// Locates keyword occurrences in a rendered document.
#[async_trait]
pub trait TextSearcher: Send + Sync {
    /// Search `document_url` for each keyword alternative at `scale`.
    ///
    /// Returns one highlight per occurrence, each with a unique fresh id
    /// and complete position data at the given scale. An empty list is a
    /// successful search that found nothing.
    async fn search(
        &self,
        keywords: &[String],
        document_url: &str,
        scale: f64,
    ) -> Result<Vec<Highlight>, SearchError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    keywords: &'a [String],
    document_url: &'a str,
    scale: f64,
}

/// One occurrence as reported by the search service; ids are assigned here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatch {
    page: u32,
    bounding_rect: Rect,
    rects: Vec<Rect>,
    #[serde(default)]
    text: Option<String>,
}

/// Reqwest-backed searcher talking to the configured search service.
pub struct RemoteSearcher {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSearcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextSearcher for RemoteSearcher {
    async fn search(
        &self,
        keywords: &[String],
        document_url: &str,
        scale: f64,
    ) -> Result<Vec<Highlight>, SearchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                keywords,
                document_url,
                scale,
            })
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let matches: Vec<RawMatch> = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(matches
            .into_iter()
            .map(|m| Highlight {
                id: Uuid::new_v4().to_string(),
                position: HighlightPosition {
                    page: m.page,
                    bounding_rect: m.bounding_rect,
                    rects: m.rects,
                    scale,
                },
                content: HighlightContent {
                    text: m.text,
                    image: None,
                },
                comment: None,
            })
            .collect())
    }
}
