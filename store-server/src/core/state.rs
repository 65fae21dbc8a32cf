use crate::core::{Config, Result};
use crate::db::TenantResolver;

/// State shared by every request handler
///
/// Everything in here is immutable after startup, so cloning per request
/// is cheap and needs no locking.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub tenants: TenantResolver,
}

impl ServerState {
    pub fn new(config: Config, tenants: TenantResolver) -> Self {
        Self { config, tenants }
    }

    /// Open every configured site database
    pub async fn initialize(config: &Config) -> Result<Self> {
        let tenants = TenantResolver::connect(&config.database, &config.sites).await?;
        tracing::info!(
            endpoint = %config.database.endpoint,
            namespace = %config.database.namespace,
            sites = tenants.sites().len(),
            "Site databases connected"
        );
        Ok(Self::new(config.clone(), tenants))
    }
}
