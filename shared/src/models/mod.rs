//! Data models
//!
//! Shared between store-server and its clients (via the HTTP API).

pub mod store;

// Re-exports
pub use store::*;
