//! `crepido render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use crepido_config::Config;
use crepido_renderer::{DocumentRenderer, PageShell};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Board file to render.
    file: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover crepido.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or board cannot be loaded, the board is
    /// malformed, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let renderer = renderer_for(&config);

        let html = render_file(&renderer, &self.file)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                Output::new().success(&format!(
                    "Rendered {} to {}",
                    self.file.display(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Create a renderer linking the configured stylesheets.
fn renderer_for(config: &Config) -> DocumentRenderer {
    match &config.page.stylesheets {
        Some(stylesheets) => DocumentRenderer::new().with_shell(PageShell::new(stylesheets.clone())),
        None => DocumentRenderer::new(),
    }
}

/// Read and render a single board file.
fn render_file(renderer: &DocumentRenderer, path: &Path) -> Result<String, CliError> {
    let raw = std::fs::read_to_string(path)?;
    let document = renderer.render(&raw)?;
    tracing::info!(path = %path.display(), name = %document.metadata.name, "Rendered board");
    Ok(document.html)
}
