//! JSON response shapes for the submission API.
//!
//! Two bodies only: `{"success": true}` and `{"error": "<message>"}`. Masked
//! bot detections reuse the success shape on purpose, so an automated
//! submitter cannot distinguish detection from acceptance.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// `200 {"success": true}`.
pub fn success() -> Response {
    Json(json!({ "success": true })).into_response()
}

/// `{"error": "<message>"}` with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// `429` with retry guidance.
pub fn rate_limited(retry_after_secs: u64) -> Response {
    let mut response = error(
        StatusCode::TOO_MANY_REQUESTS,
        "Too many requests. Please try again later.",
    );
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, header::HeaderValue::from(retry_after_secs));
    response
}

/// `400` for a body that could not be parsed.
pub fn invalid_body() -> Response {
    error(StatusCode::BAD_REQUEST, "Invalid request body")
}

/// `500` with no internal detail.
pub fn internal_error() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_carries_retry_after() {
        let response = rate_limited(42);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &header::HeaderValue::from_static("42")
        );
    }

    #[test]
    fn error_statuses_are_preserved() {
        assert_eq!(invalid_body().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            internal_error().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(success().status(), StatusCode::OK);
    }
}
