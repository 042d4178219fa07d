//! Site error types.

use std::path::PathBuf;

use crepido_renderer::RenderError;

/// Error returned when a board cannot be served.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The requested board file does not exist.
    #[error("Board not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// I/O error reading the board file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The board file exists but cannot be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}
