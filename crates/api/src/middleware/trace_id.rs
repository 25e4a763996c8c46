//! Request tracing middleware.
//!
//! Provides request ID extraction and generation for log correlation.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware that extracts or generates a request ID.
///
/// If the `X-Request-ID` header is present, uses that value; otherwise
/// generates a new UUID v4. The id is stored in request extensions,
/// echoed in the response headers, and attached to the request span.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let start = std::time::Instant::now();
        let mut response = next.run(req).await;

        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_holds_value() {
        let id = RequestId("abc-123".to_string());
        assert_eq!(id.0, "abc-123");
    }

    #[test]
    fn test_header_name() {
        assert_eq!(REQUEST_ID_HEADER, "X-Request-ID");
    }
}
