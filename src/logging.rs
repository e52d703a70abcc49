//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes: Bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// The longest prefix of `text` that is at most `limit` bytes and ends on a
/// character boundary.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        body::Bytes,
        middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::{logging_middleware, truncate};

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 64), "short");
    }

    #[test]
    fn truncate_cuts_long_text() {
        assert_eq!(truncate("abcdef", 3), "abc");
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        // 'é' is two bytes, so a limit of 2 would split it.
        assert_eq!(truncate("aé", 2), "a");
    }

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let body = json!({ "title": "A very long product title that is well over the log limit" });
        let expected = body.clone();
        let app = Router::new()
            .route("/", get(move || async move { Json(body) }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), expected);
    }

    #[tokio::test]
    async fn passes_non_utf8_bodies_through_unchanged() {
        let body = Bytes::from_static(&[0x66, 0xff, 0xfe, 0x00, 0x80]);
        let app = Router::new()
            .route("/echo", post(|body: Bytes| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.post("/echo").bytes(body.clone()).await;

        response.assert_status_ok();
        assert_eq!(response.as_bytes(), &body);
    }
}
