//! Per-request access log

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Headers worth an access-log line; credentials among them are masked
const LOGGED_HEADERS: &[&str] = &["content-type", "content-length", "user-agent", "authorization"];

/// Log one line per request and one per response
///
/// Bodies are never logged since Register and Login carry passwords. The
/// request id is set by `SetRequestIdLayer` further out in the stack.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let request_id = header_str(request.headers(), "x-request-id").unwrap_or("-").to_owned();

    info!(
        %method,
        %path,
        %request_id,
        headers = %loggable_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        %request_id,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn loggable_headers(headers: &HeaderMap) -> String {
    LOGGED_HEADERS
        .iter()
        .filter_map(|name| {
            let value = header_str(headers, name)?;
            let value = if *name == "authorization" { "[REDACTED]" } else { value };
            Some(format!("{}={}", name, value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
