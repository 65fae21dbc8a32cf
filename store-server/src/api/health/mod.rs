//! Health check route
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /health | GET | liveness, no database access |
//!
//! ```json
//! { "status": "ok", "service": "store-server", "version": "0.1.0", "sites": ["eu", "us"] }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Configured site identifiers
    sites: Vec<String>,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        sites: state.tenants.sites().into_iter().map(String::from).collect(),
    })
}
