use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::store::{CatalogStore, MemoryCatalog};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The catalog store owns all entity and association data
    pub store: Arc<dyn CatalogStore>,
    /// Deadline applied to every store call
    pub storage_timeout: Duration,
    /// Delimiter for multi-value ingestion fields
    pub list_delimiter: char,
}

impl AppState {
    /// Creates application state over an empty in-memory catalog
    pub fn new(config: &Config) -> Self {
        Self {
            store: Arc::new(MemoryCatalog::new()),
            storage_timeout: Duration::from_millis(config.storage_timeout_ms),
            list_delimiter: config.list_delimiter,
        }
    }
}
