//! Shared types for the store service
//!
//! Domain model and the unified error system used by the server and by
//! anything speaking its HTTP API.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Store, StoreField};
