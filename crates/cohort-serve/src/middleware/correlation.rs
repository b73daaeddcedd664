use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::fmt;
use ulid::Ulid;

pub const HEADER_NAME: &str = "x-correlation-id";

/// Longest caller-supplied id that is echoed back unchanged.
pub const MAX_LEN: usize = 128;

const PREFIX: &str = "corr_";

/// Request-scoped id stored in the request extensions and echoed in the
/// `x-correlation-id` response header and in error envelopes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(format!("{PREFIX}{}", Ulid::new()))
    }

    /// Keeps the caller's id when it is printable ASCII of sane length,
    /// otherwise mints a fresh one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(HEADER_NAME)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| is_acceptable(value))
            .map(|value| Self(value.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub async fn correlation_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = CorrelationId::from_headers(request.headers());
    tracing::debug!(correlation_id = %id, method = %request.method(), uri = %request.uri(), "request");

    let header = HeaderValue::from_str(id.as_str());
    request.extensions_mut().insert(id);
    let mut response = next.run(request).await;
    if let Ok(value) = header {
        response
            .headers_mut()
            .insert(HeaderName::from_static(HEADER_NAME), value);
    }
    response
}
