//! Document registration endpoints
//!
//! The browser registers an uploaded document here once the rendered (and
//! optionally OCR-derived) URLs exist. Registration derives the document
//! identity and seeds the session with whatever the highlight backend
//! already has for it.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::documents::DocumentRecord;
use crate::error::Result;
use crate::highlights::{self, Highlight};
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register_document))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub file_name: String,
    pub primary_url: String,
    #[serde(default)]
    pub ocr_url: Option<String>,
    /// Optional user identity folded into the document id.
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub document: DocumentRecord,
    pub highlights: Vec<Highlight>,
}

/// Register a document session
///
/// A failed fetch from the highlight backend degrades to an empty seed;
/// prior highlights reappear on the next registration, the session itself
/// always starts.
async fn register_document(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let id = highlights::document_id(&request.file_name, request.user.as_deref());

    let seed = match state.store().fetch(&id).await {
        Ok(rows) => rows.into_iter().map(highlights::to_viewer).collect(),
        Err(e) => {
            tracing::warn!(document_id = %id, error = %e, "Failed to fetch stored highlights");
            Vec::new()
        }
    };

    let record = DocumentRecord {
        id,
        name: request.file_name,
        primary_url: request.primary_url,
        ocr_url: request.ocr_url,
        registered_at: Utc::now(),
    };

    state.registry().register(record.clone(), seed);
    let highlights = state
        .registry()
        .highlights(&record.id)
        .unwrap_or_default();

    tracing::info!(document_id = %record.id, name = %record.name, "Registered document");

    Ok(Json(RegisterResponse {
        document: record,
        highlights,
    }))
}
