//! Keyword search engine
//!
//! Splits a query into keyword alternatives, delegates the actual text
//! matching to the external search service, and reconciles the results
//! with the session's highlight set.

mod orchestrator;
mod searcher;
mod zoom;

pub use orchestrator::{SearchOrchestrator, SearchOutcome, SearchStatus};
pub use searcher::{RemoteSearcher, SearchError, TextSearcher};
pub use zoom::{resolve_scale, ViewerState, ZoomProvider, DEFAULT_SCALE};

#[cfg(test)]
pub use searcher::mock::ScriptedSearcher;
