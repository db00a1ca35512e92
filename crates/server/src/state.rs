//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::OrderStore;
use crate::services::OrderFinalizer;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// order store, the finalizer, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn OrderStore>,
    finalizer: OrderFinalizer,
}

impl AppState {
    /// Create a new application state over the given order store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn OrderStore>) -> Self {
        let finalizer = OrderFinalizer::new(Arc::clone(&store));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                finalizer,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.inner.store
    }

    /// Get a reference to the order finalizer.
    #[must_use]
    pub fn finalizer(&self) -> &OrderFinalizer {
        &self.inner.finalizer
    }
}
