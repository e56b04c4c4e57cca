//! Highlight set API routes
//!
//! Read, replace (highlight-file load), and reset the in-memory set for a
//! document. The replace path pushes to the highlight backend through the
//! same payload selector the search path uses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::highlights::{to_viewer, Highlight, StoredHighlight};
use crate::search::SearchStatus;
use crate::state::AppState;

/// Create the highlights router
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/:id/highlights",
        get(get_highlights)
            .put(load_highlights)
            .delete(reset_highlights),
    )
}

/// Current in-memory highlight set
///
/// GET /api/v1/documents/:id/highlights
async fn get_highlights(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Highlight>>> {
    let highlights = state
        .registry()
        .highlights(&id)
        .ok_or_else(|| AppError::NotFound(format!("Document not registered: {}", id)))?;
    Ok(Json(highlights))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub highlights: Vec<Highlight>,
    #[serde(flatten)]
    pub status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<Highlight>,
}

/// Replace the set from an uploaded highlight file
///
/// PUT /api/v1/documents/:id/highlights with a stored-form array. The
/// replacement is optimistic: a failed backend push keeps the loaded set
/// and reports `localOnly`.
async fn load_highlights(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(rows): Json<Vec<StoredHighlight>>,
) -> Result<Json<LoadResponse>> {
    let loaded: Vec<Highlight> = rows.into_iter().map(to_viewer).collect();

    let (highlights, populated) = state
        .registry()
        .replace_highlights(&id, loaded)
        .ok_or_else(|| AppError::NotFound(format!("Document not registered: {}", id)))?;

    let status = match state.orchestrator().persist(&id, &highlights).await {
        Ok(()) => SearchStatus::Synced,
        Err(e) => {
            tracing::warn!(document_id = %id, error = %e, "Highlight sync failed, keeping local set");
            SearchStatus::LocalOnly {
                reason: e.to_string(),
            }
        }
    };

    let scroll_to = if populated {
        state.navigation().on_set_populated(&id, &highlights)
    } else {
        None
    };

    Ok(Json(LoadResponse {
        highlights,
        status,
        scroll_to,
    }))
}

/// Clear the in-memory set (the backend copy is untouched)
///
/// DELETE /api/v1/documents/:id/highlights
async fn reset_highlights(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.registry().clear_highlights(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Document not registered: {}", id)))
    }
}
