//! Database Module
//!
//! One SurrealDB database per site, all inside the configured namespace.
//! [`TenantResolver`] owns the per-site handles; repositories run the
//! queries.

pub mod repository;
pub mod tenant;

pub use repository::{RepoError, RepoResult, StoreRepository, SurrealStoreRepository};
pub use tenant::{SiteMap, TenantResolver};

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

use crate::core::DbConfig;

/// Open a handle on one logical database
///
/// Embedded endpoints get their directory created first; remote endpoints
/// sign in as root when credentials are configured.
pub async fn open_database(config: &DbConfig, database: &str) -> RepoResult<Surreal<Any>> {
    if let Some(path) = config.embedded_path(database) {
        std::fs::create_dir_all(&path).map_err(|e| {
            RepoError::Connection(format!("cannot create {}: {e}", path.display()))
        })?;
    }

    let endpoint = config.endpoint_for(database);
    let db = any::connect(endpoint.as_str())
        .await
        .map_err(|e| RepoError::Connection(format!("{endpoint}: {e}")))?;

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        db.signin(Root {
            username: username.as_str(),
            password: password.as_str(),
        })
        .await
        .map_err(|e| RepoError::Connection(format!("sign-in failed: {e}")))?;
    }

    db.use_ns(config.namespace.as_str())
        .use_db(database)
        .await
        .map_err(|e| RepoError::Connection(format!("cannot select {database}: {e}")))?;

    Ok(db)
}
