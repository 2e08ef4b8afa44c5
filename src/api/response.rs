use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

/// Plain `{"message": ..}` success body.
pub fn message(text: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": text }))).into_response()
}

/// `201 {"id": ..}` for newly inserted rows.
pub fn created(id: i64) -> Response {
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}
