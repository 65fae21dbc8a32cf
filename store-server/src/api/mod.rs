//! API routes
//!
//! - [`stores`] - store lookup and upsert, per site
//! - [`health`] - health check

pub mod health;
pub mod stores;
