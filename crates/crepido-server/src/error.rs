//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crepido_renderer::RenderError;
use crepido_site::SiteError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No board exists for the requested path.
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    /// Render error from crepido-renderer.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::DocumentNotFound(path) => Self::BoardNotFound(path.display().to_string()),
            SiteError::Io(e) => Self::Io(e),
            SiteError::Render(e) => Self::Render(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::BoardNotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Self::Render(_) | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({"error": self.to_string()})),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = ServerError::BoardNotFound("boards/x.md".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_render_error_status() {
        let response = ServerError::Render(RenderError::MalformedDocument).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_render_error_body_names_the_failure() {
        let response = ServerError::Render(RenderError::MalformedDocument).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"],
            format!("Render error: {}", RenderError::MalformedDocument)
        );
    }

    #[test]
    fn test_from_site_error() {
        let err = ServerError::from(SiteError::DocumentNotFound(PathBuf::from("boards/x.md")));
        assert!(matches!(err, ServerError::BoardNotFound(ref p) if p == "boards/x.md"));

        let err = ServerError::from(SiteError::Render(RenderError::MalformedDocument));
        assert!(matches!(err, ServerError::Render(RenderError::MalformedDocument)));
    }
}
