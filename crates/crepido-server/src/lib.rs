//! HTTP server for Crepido boards.
//!
//! Serves every board under the boards directory as a rendered HTML page and
//! the static files of the assets directory under `/assets`. Rendered pages
//! are cached in memory and swept by a periodic background task.
//!
//! # Quick Start
//!
//! ```ignore
//! use crepido_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```
//!
//! # Routes
//!
//! ```text
//! GET /assets/{*file}  ──► ServeDir(assets_dir)
//! GET /{*path}         ──► Site::render ──► RenderCache ──┬─► hit: cached page
//!                                                         └─► miss: read + render
//! ```

mod app;
mod error;
mod gc;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crepido_renderer::{DocumentRenderer, PageShell};
use crepido_site::{DEFAULT_MAX_AGE, Site, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Board source directory.
    pub boards_dir: PathBuf,
    /// Board file extension, without the dot.
    pub extension: String,
    /// Static assets directory, served under `/assets`.
    pub assets_dir: PathBuf,
    /// Maximum age of cached pages (`None` disables caching).
    pub cache_max_age: Option<Duration>,
    /// Interval between cache sweeps.
    pub gc_interval: Duration,
    /// Stylesheets linked from every page (`None` uses the defaults).
    pub stylesheets: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            boards_dir: PathBuf::from("boards"),
            extension: "md".to_owned(),
            assets_dir: PathBuf::from("assets"),
            cache_max_age: Some(DEFAULT_MAX_AGE),
            gc_interval: Duration::from_secs(60),
            stylesheets: None,
        }
    }
}

/// Run the server.
///
/// Serves until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = match config.stylesheets {
        Some(stylesheets) => DocumentRenderer::new().with_shell(PageShell::new(stylesheets)),
        None => DocumentRenderer::new(),
    };

    let site_config = SiteConfig {
        boards_dir: config.boards_dir.clone(),
        extension: config.extension.clone(),
        cache_max_age: config.cache_max_age,
    };
    let site = Arc::new(Site::new(site_config, renderer));

    // Sweep only when there is something to sweep
    let gc_task = config
        .cache_max_age
        .map(|_| gc::spawn_gc(Arc::clone(&site), config.gc_interval));

    let state = Arc::new(AppState { site });
    let app = app::create_router(state, &config.assets_dir);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        boards = %config.boards_dir.display(),
        assets = %config.assets_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = gc_task {
        task.abort();
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Crepido config.
#[must_use]
pub fn server_config_from_config(config: &crepido_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        boards_dir: config.boards_resolved.source_dir.clone(),
        extension: config.boards_resolved.extension.clone(),
        assets_dir: config.assets_dir.clone(),
        cache_max_age: config.cache.enabled.then(|| config.cache.max_age()),
        gc_interval: config.cache.gc_interval(),
        stylesheets: config.page.stylesheets.clone(),
    }
}
