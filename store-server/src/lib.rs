//! Store Server - multi-site store catalogue over HTTP
//!
//! Each request names a `site`; the site selects one SurrealDB database
//! holding that site's `store` collection.
//!
//! # Modules
//!
//! - [`core`] - configuration, state and server lifecycle
//! - [`db`] - site resolution and store persistence
//! - [`api`] - HTTP handlers
//! - [`routes`] - router and middleware stack
//! - [`middleware`] - request logging
//! - [`utils`] - logging setup and error re-exports

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use db::{SiteMap, StoreRepository, TenantResolver};
pub use routes::build_app;
pub use utils::{AppError, AppResult, init_logger};
