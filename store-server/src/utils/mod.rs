//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - application errors (from shared::error)
//! - logging setup
//! - query string decoding

pub mod logger;
pub mod query;

pub use logger::init_logger;
pub use shared::error::{AppError, AppResult};
