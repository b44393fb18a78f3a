use axum::{body::Body, http::StatusCode, response::Response};
use serde::de::DeserializeOwned;

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

/// Read the whole response body and parse it as JSON.
pub(crate) async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&bytes).expect("Response body is not the expected JSON")
}

/// Check that `response` has the status `status` and an `{"error": ...}` body.
pub(crate) async fn assert_error_response(response: Response<Body>, status: StatusCode) {
    assert_eq!(response.status(), status);
    assert_content_type(&response, "application/json");

    let body: serde_json::Value = json_body(response).await;
    assert!(
        body["error"].is_string(),
        "want an error message in the body, got {body}"
    );
}
