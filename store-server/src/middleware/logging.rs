//! Request logging middleware
//!
//! Logs every incoming HTTP request with its request id, route, status and
//! latency.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use crate::utils::query::first_value;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log request start and completion
///
/// The site is taken from the query string when present, so log lines can
/// be grouped per tenant.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let site = uri
        .query()
        .and_then(site_param)
        .unwrap_or_else(|| "-".to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        site = %site,
        user_agent = %user_agent,
        "Request started"
    );

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            site = %site,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            site = %site,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed with client error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            site = %site,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed successfully"
        );
    }

    response
}

/// Decoded `site` value of a query string, as the handlers see it
fn site_param(query: &str) -> Option<String> {
    first_value(query, "site").filter(|value| !value.is_empty())
}
