//! The fallback for requests that do not match any route.

use axum::response::{IntoResponse, Response};

use crate::Error;

/// Respond with 404 and a JSON error body.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
