//! Route modules for Marginalia Server

pub mod documents;
pub mod highlights;
pub mod navigation;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Everything mounted under `/api/v1/documents`.
pub fn api_router() -> Router<AppState> {
    documents::router()
        .merge(highlights::router())
        .merge(navigation::router())
        .merge(search::router())
}
