use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body returned for every failed request.
///
/// `kind` is a stable machine-readable code; `message` is safe to show to users
/// and never carries storage details.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub kind: &'a str,
    pub message: String,
}

/// Render a failure as `(status, {"success": false, "kind", "message"})`.
pub fn error_response(status: StatusCode, kind: &str, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        success: false,
        kind,
        message: message.into(),
    };
    (status, axum::Json(body)).into_response()
}
