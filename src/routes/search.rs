//! Search API routes

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::highlights::Highlight;
use crate::search::{SearchOutcome, ViewerState};
use crate::state::AppState;

/// Create the search router
pub fn router() -> Router<AppState> {
    Router::new().route("/:id/search", post(search_document))
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Keyword query; alternatives separated by `|`.
    pub query: String,
    /// Viewer state for zoom resolution; omitted means unknown zoom.
    #[serde(default)]
    pub viewer: ViewerState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    /// Buffered anchor target that became resolvable through this search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<Highlight>,
}

/// Run a keyword search against a registered document
///
/// POST /api/v1/documents/:id/search
async fn search_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let outcome = state
        .orchestrator()
        .run(&id, &request.query, &request.viewer)
        .await?;

    let scroll_to = if outcome.populated {
        state.navigation().on_set_populated(&id, &outcome.highlights)
    } else {
        None
    };

    Ok(Json(SearchResponse { outcome, scroll_to }))
}
