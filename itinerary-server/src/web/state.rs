//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::SearchPolicy;

/// Shared application state.
///
/// The server holds no catalog: every request brings its own snapshot.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Policy used when a request does not supply one
    pub default_policy: Arc<SearchPolicy>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(default_policy: SearchPolicy) -> Self {
        Self {
            default_policy: Arc::new(default_policy),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchPolicy::default())
    }
}
