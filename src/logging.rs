//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of bytes of a request or response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => return error.into_response(),
    };
    log_body("Received request", &parts, &body);

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return parts.status.into_response();
        }
    };
    log_body("Sending response", &parts, &body);

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body) -> Result<Bytes, Error> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::InvalidRequestBody(error.to_string()))
}

fn log_body(label: &str, parts: &impl std::fmt::Debug, body: &[u8]) {
    let text = String::from_utf8_lossy(body);

    match truncate_body(&text, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("{label}: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full body: {text:?}");
        }
        None => tracing::info!("{label}: {parts:#?}\nbody: {text:?}"),
    }
}

/// The longest prefix of `text` that is at most `limit` bytes and ends on a
/// character boundary, or `None` if `text` already fits.
fn truncate_body(text: &str, limit: usize) -> Option<&str> {
    if text.len() <= limit {
        return None;
    }

    let end = (0..=limit)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    Some(&text[..end])
}
