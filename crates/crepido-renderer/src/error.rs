//! Render error types.

/// Error returned when a board document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document has no `---` delimited front matter block.
    #[error("Malformed document: no front matter block found")]
    MalformedDocument,

    /// The front matter block is not a valid JSON object body.
    #[error("Malformed front matter: {0}")]
    MalformedMetadata(String),
}
