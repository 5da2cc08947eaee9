use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::source::RecordSource;
use crate::store::ListingStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The session's collections. Readers share the lock; every mutation
    /// swaps a whole collection under the write lock.
    pub store: Arc<RwLock<ListingStore>>,
    /// Pluggable record source. Default: EmbeddedSource. Swap via RECORDS_SOURCE.
    pub source: Arc<dyn RecordSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: ListingStore, source: Arc<dyn RecordSource>, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            source,
            config,
        }
    }
}
