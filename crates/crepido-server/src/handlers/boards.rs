//! Board page endpoint.
//!
//! Every path outside `/assets` names a board file. The page is served from
//! the render cache when present, rendered and cached otherwise.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::error::ServerError;
use crate::state::AppState;

/// Cached page shared with the response body without copying.
struct PageBytes(Arc<str>);

impl AsRef<[u8]> for PageBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Handle GET /{path}.
pub(crate) async fn get_board(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ServerError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let page = state.site.render(uri.path())?;
    tracing::info!(
        path = %page.source_path.display(),
        cached = page.from_cache,
        "Serving board"
    );

    Ok(html_response(page.html))
}

fn html_response(html: Arc<str>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from(Bytes::from_owner(PageBytes(html))),
    )
        .into_response()
}
