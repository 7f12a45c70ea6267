use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Returns the standard JSON error payload for unknown routes.
pub async fn handle_404() -> Response {
    Error::RouteNotFound.into_response()
}
