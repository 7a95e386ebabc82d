//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedTfnswClient;
use crate::settings::Settings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached trip planner client
    pub tfnsw: Arc<CachedTfnswClient>,

    /// Route defaults used when a query omits origin/destination
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tfnsw: CachedTfnswClient, settings: Settings) -> Self {
        Self {
            tfnsw: Arc::new(tfnsw),
            settings: Arc::new(settings),
        }
    }
}
