//! Navigation API routes

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::highlights::Highlight;
use crate::state::AppState;

/// Create the navigation router
pub fn router() -> Router<AppState> {
    Router::new().route("/:id/navigate", post(navigate))
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// Page-fragment anchor, e.g. `#highlight-abc123`.
    pub anchor: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResponse {
    /// The highlight to scroll into view, or null on a miss.
    pub scroll_to: Option<Highlight>,
}

/// Resolve a fragment anchor to a scroll target
///
/// POST /api/v1/documents/:id/navigate
///
/// A miss is a silent no-op for the viewer; the anchor is buffered and
/// resurfaces through the search/load responses once the set populates.
async fn navigate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>> {
    let highlights = state
        .registry()
        .highlights(&id)
        .ok_or_else(|| AppError::NotFound(format!("Document not registered: {}", id)))?;

    let scroll_to = state
        .navigation()
        .on_anchor_change(&id, &request.anchor, &highlights);

    Ok(Json(NavigateResponse { scroll_to }))
}
