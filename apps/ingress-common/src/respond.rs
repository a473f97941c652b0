use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};

/// `200 {"success": true}`
pub fn success() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "success": true })))
}

/// `{status} {"error": message}`
pub fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(json!({ "error": message })))
}

/// `{status} {"error": message, "details": details}`
pub fn json_error_with_details(
    status: StatusCode,
    message: &str,
    details: Value,
) -> impl IntoResponse {
    (status, Json(json!({ "error": message, "details": details })))
}
