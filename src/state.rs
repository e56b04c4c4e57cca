//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentRegistry;
use crate::navigation::NavigationBuffer;
use crate::search::{RemoteSearcher, SearchOrchestrator, TextSearcher};
use crate::storage::{HighlightStore, HttpHighlightStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    registry: Arc<DocumentRegistry>,
    store: Arc<dyn HighlightStore>,
    orchestrator: SearchOrchestrator,
    navigation: NavigationBuffer,
}

impl AppState {
    /// Create state wired to the configured remote collaborators.
    pub fn new(config: Config) -> Self {
        let searcher: Arc<dyn TextSearcher> =
            Arc::new(RemoteSearcher::new(&config.search.service_url));
        let store: Arc<dyn HighlightStore> =
            Arc::new(HttpHighlightStore::new(&config.storage.base_url));
        Self::with_collaborators(config, searcher, store)
    }

    /// Create state with explicit collaborators (tests inject mocks here).
    pub fn with_collaborators(
        config: Config,
        searcher: Arc<dyn TextSearcher>,
        store: Arc<dyn HighlightStore>,
    ) -> Self {
        let registry = Arc::new(DocumentRegistry::new());
        let orchestrator = SearchOrchestrator::new(
            registry.clone(),
            searcher,
            store.clone(),
            config.storage.method,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                store,
                orchestrator,
                navigation: NavigationBuffer::new(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.inner.registry
    }

    pub fn store(&self) -> &dyn HighlightStore {
        self.inner.store.as_ref()
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.inner.orchestrator
    }

    pub fn navigation(&self) -> &NavigationBuffer {
        &self.inner.navigation
    }
}
