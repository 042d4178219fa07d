//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use crepido_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Board service (render + cache).
    pub(crate) site: Arc<Site>,
}
