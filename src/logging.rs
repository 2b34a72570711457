//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The maximum number of bytes of a body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body the middleware will buffer, matching axum's default body limit.
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Requests with a body larger than [MAX_REQUEST_BODY_BYTES] get a
/// `413 Payload Too Large` without reaching the handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, MAX_REQUEST_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let response = next.run(Request::from_parts(parts, body_bytes.into())).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, body_bytes.into())
}

/// The first [LOG_BODY_LENGTH_LIMIT] bytes of `body`, cut at a character boundary.
fn truncate_body(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!(
                "Received request: {} {}\nbody: {truncated}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        ),
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {}\nbody: {truncated}...", parts.status);
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {}\nbody: {body:?}", parts.status),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;

    use super::{
        LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_BYTES, logging_middleware, truncate_body,
    };

    #[test]
    fn short_bodies_are_not_truncated() {
        assert_eq!(truncate_body("{\"total\":0}"), None);
    }

    #[test]
    fn long_bodies_are_truncated_at_char_boundary() {
        let body = format!("{}é{}", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1), "b".repeat(10));

        let truncated = truncate_body(&body).unwrap();

        assert_eq!(truncated, "a".repeat(LOG_BODY_LENGTH_LIMIT - 1));
    }

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let long_text = "x".repeat(LOG_BODY_LENGTH_LIMIT * 2);
        let expected = long_text.clone();
        let app = Router::new()
            .route("/", get(move || async move { long_text }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text(expected);
    }

    #[tokio::test]
    async fn rejects_request_body_over_limit() {
        let app = Router::new()
            .route("/", post(|body: String| async move { body.len().to_string() }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);

        server
            .post("/")
            .text("x".repeat(MAX_REQUEST_BODY_BYTES + 1))
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn accepts_request_body_at_limit() {
        let app = Router::new()
            .route("/", post(|body: String| async move { body.len().to_string() }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);

        let response = server
            .post("/")
            .text("x".repeat(MAX_REQUEST_BODY_BYTES))
            .await;

        response.assert_status_ok();
        response.assert_text(MAX_REQUEST_BODY_BYTES.to_string());
    }
}
