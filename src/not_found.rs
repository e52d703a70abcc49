//! The response for requests to unknown routes or missing resources.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Route handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 response with a JSON error message.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
