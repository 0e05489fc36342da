//! Request ID middleware for log and error correlation.
//!
//! Every request carries an ID in the `x-request-id` header. An ID supplied
//! by an upstream proxy is kept when it looks sane; otherwise a UUID v4 is
//! generated. The ID is recorded on the request span, tagged on the Sentry
//! scope and echoed in the response.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Use the upstream ID if it is short printable ASCII, else a fresh UUID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        headers
    }

    #[test]
    fn test_keeps_upstream_id() {
        assert_eq!(resolve_request_id(&headers_with("cf-abc123")), "cf-abc123");
    }

    #[test]
    fn test_generates_uuid_when_missing() {
        let id = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_rejects_oversized_or_spaced_ids() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert!(Uuid::parse_str(&resolve_request_id(&headers_with(&long))).is_ok());
        assert!(Uuid::parse_str(&resolve_request_id(&headers_with("has space"))).is_ok());
    }
}
