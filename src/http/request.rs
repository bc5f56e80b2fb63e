//! Request identification.
//!
//! # Responsibilities
//! - Reuse a client-supplied `x-request-id` or generate a UUID v4
//! - Store it as a request extension for handlers and trace spans
//! - Echo it on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Client IDs that are empty, oversized or not visible ASCII are replaced

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

const MAX_CLIENT_ID_LEN: usize = 128;

/// Request ID stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read the request ID attached by [`request_id_middleware`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

fn client_request_id<B>(req: &Request<B>) -> Option<String> {
    let value = req.headers().get(X_REQUEST_ID)?.to_str().ok()?;
    let acceptable = !value.is_empty()
        && value.len() <= MAX_CLIENT_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then(|| value.to_string())
}

/// Attach a request ID to the request and its response.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let id = client_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_accepted() {
        let req = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();
        assert_eq!(client_request_id(&req), Some("abc-123".to_string()));
    }

    #[test]
    fn test_client_id_rejected() {
        let req = Request::builder().header(X_REQUEST_ID, "").body(()).unwrap();
        assert_eq!(client_request_id(&req), None);

        let long = "x".repeat(MAX_CLIENT_ID_LEN + 1);
        let req = Request::builder()
            .header(X_REQUEST_ID, long.as_str())
            .body(())
            .unwrap();
        assert_eq!(client_request_id(&req), None);

        let req = Request::builder()
            .header(X_REQUEST_ID, "has space")
            .body(())
            .unwrap();
        assert_eq!(client_request_id(&req), None);
    }

    #[test]
    fn test_missing_header() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(client_request_id(&req), None);
        assert!(req.request_id().is_none());
    }
}
