//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Files under `assets_dir` are served at `/assets`; every other path is a
/// board request.
pub(crate) fn create_router(state: Arc<AppState>, assets_dir: &Path) -> Router {
    Router::new()
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(handlers::boards::get_board)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
