//! `crepido serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use crepido_config::{CliSettings, Config};
use crepido_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover crepido.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board source directory (overrides config).
    #[arg(short, long)]
    boards_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable caching (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable caching.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.field("boards", config.boards_resolved.source_dir.display());
        output.field("assets", config.assets_dir.display());

        if !config.boards_resolved.source_dir.is_dir() {
            output.warning("Boards directory does not exist, every board will be 404");
        }

        if config.cache.enabled {
            output.field(
                "cache",
                format_args!(
                    "max age {}s, sweep every {}s",
                    config.cache.max_age_secs, config.cache.gc_interval_secs
                ),
            );
        } else {
            output.field("cache", "disabled");
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Build config overrides from command-line flags.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            boards_dir: self.boards_dir.clone(),
            cache_enabled: self.resolve_cache_enabled(),
        }
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
