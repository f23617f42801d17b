//! # Request/Response Logging Middleware
//!
//! One structured line per request and one per response, correlated by the
//! request id from [`RequestStamp`](super::RequestStamp).
//!
//! Credential-bearing headers are redacted. Bodies are never logged, and
//! auth endpoints are flagged as sensitive so downstream log shippers can
//! drop them.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::RequestStamp;

/// Headers whose values are replaced with `***REDACTED***`
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Path prefixes carrying passwords or tokens in their bodies
const SENSITIVE_ENDPOINTS: &[&str] = &["/api/auth/"];

fn is_sensitive_path(path: &str) -> bool {
    SENSITIVE_ENDPOINTS.iter().any(|ep| path.starts_with(ep))
}

/// Header list safe for logs.
fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower == *h) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let sensitive = is_sensitive_path(&path);

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        sensitive,
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(
        request_id = %request_id,
        headers = ?redacted_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status.as_u16(),
            duration_ms
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status.as_u16(),
            duration_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status.as_u16(),
            duration_ms
        );
    }

    response
}
