//! Configuration management for Crepido.
//!
//! Parses `crepido.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `boards.source_dir`
//! - `assets.dir`
//! - `page.stylesheets`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override boards source directory.
    pub boards_dir: Option<PathBuf>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "crepido.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Boards configuration (paths are relative strings from TOML).
    boards: BoardsConfigRaw,
    /// Static assets configuration (paths are relative strings from TOML).
    assets: AssetsConfigRaw,
    /// Render cache configuration.
    pub cache: CacheConfig,
    /// Page shell configuration.
    pub page: PageConfig,

    /// Resolved boards configuration (set after loading).
    #[serde(skip)]
    pub boards_resolved: BoardsConfig,
    /// Resolved static assets directory (set after loading).
    #[serde(skip)]
    pub assets_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BoardsConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved boards configuration with absolute paths.
#[derive(Debug)]
pub struct BoardsConfig {
    /// Directory holding board files.
    pub source_dir: PathBuf,
    /// Board file extension, without the dot.
    pub extension: String,
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("boards"),
            extension: "md".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    dir: Option<String>,
}

/// Render cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether rendered boards are cached.
    pub enabled: bool,
    /// Age in seconds after which cached pages are collected.
    pub max_age_secs: u64,
    /// Seconds between garbage collection sweeps.
    pub gc_interval_secs: u64,
}

impl CacheConfig {
    /// Maximum age of cached pages.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Interval between garbage collection sweeps.
    #[must_use]
    pub fn gc_interval(&self) -> Duration {
        Duration::from_secs(self.gc_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_secs: 600,
            gc_interval_secs: 60,
        }
    }
}

/// Page shell configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Stylesheets linked from every board page.
    ///
    /// If `None`, the renderer's default stylesheets are used.
    pub stylesheets: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`CREPIDO_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a duration field to be non-zero.
fn require_non_zero(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `crepido.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(boards_dir) = &settings.boards_dir {
            self.boards_resolved.source_dir.clone_from(boards_dir);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            boards: BoardsConfigRaw::default(),
            assets: AssetsConfigRaw::default(),
            cache: CacheConfig::default(),
            page: PageConfig::default(),
            boards_resolved: BoardsConfig {
                source_dir: base.join("boards"),
                extension: "md".to_owned(),
            },
            assets_dir: base.join("assets"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_boards()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_boards(&self) -> Result<(), ConfigError> {
        let extension = &self.boards_resolved.extension;
        require_non_empty(extension, "boards.extension")?;

        if extension.contains(['.', '/']) {
            return Err(ConfigError::Validation(
                "boards.extension must be a bare extension such as \"md\"".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        if self.cache.enabled {
            require_non_zero(self.cache.max_age_secs, "cache.max_age_secs")?;
            require_non_zero(self.cache.gc_interval_secs, "cache.gc_interval_secs")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref dir) = self.boards.source_dir {
            self.boards.source_dir = Some(expand::expand_env(dir, "boards.source_dir")?);
        }

        if let Some(ref dir) = self.assets.dir {
            self.assets.dir = Some(expand::expand_env(dir, "assets.dir")?);
        }

        if let Some(ref mut stylesheets) = self.page.stylesheets {
            for href in stylesheets.iter_mut() {
                *href = expand::expand_env(href, "page.stylesheets")?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.boards_resolved = BoardsConfig {
            source_dir: resolve(self.boards.source_dir.as_deref(), "boards"),
            extension: self
                .boards
                .extension
                .clone()
                .unwrap_or_else(|| "md".to_owned()),
        };
        self.assets_dir = resolve(self.assets.dir.as_deref(), "assets");
    }
}
