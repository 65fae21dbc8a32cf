use std::path::PathBuf;

use thiserror::Error;

use crate::db::SiteMap;

/// Configuration errors, raised while loading [`Config`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("SITES entry '{0}' must look like site=database")]
    MalformedSite(String),

    #[error("site '{0}' is configured more than once")]
    DuplicateSite(String),

    #[error("SITES must name at least one site")]
    NoSites,
}

/// SurrealDB endpoint schemes that keep their data on the local filesystem
const EMBEDDED_SCHEMES: [&str; 3] = ["rocksdb", "surrealkv", "file"];

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SurrealDB endpoint: `mem://`, `rocksdb://<dir>`, `ws://<host>`, ...
    pub endpoint: String,
    /// Namespace holding every site database
    pub namespace: String,
    /// Root credentials, only needed for remote endpoints
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DbConfig {
    /// In-memory store, one fresh instance per site database
    pub fn in_memory() -> Self {
        Self {
            endpoint: "mem://".into(),
            namespace: DEFAULT_NAMESPACE.into(),
            username: None,
            password: None,
        }
    }

    /// Directory backing `database` when the endpoint is embedded
    ///
    /// Embedded engines lock their directory, so every site database gets
    /// its own directory below the configured one.
    pub fn embedded_path(&self, database: &str) -> Option<PathBuf> {
        let (scheme, path) = self.endpoint.split_once("://")?;
        if !EMBEDDED_SCHEMES.contains(&scheme) || path.is_empty() {
            return None;
        }
        Some(PathBuf::from(path).join(database))
    }

    /// Endpoint to connect to for `database`
    pub fn endpoint_for(&self, database: &str) -> String {
        match (self.endpoint.split_once("://"), self.embedded_path(database)) {
            (Some((scheme, _)), Some(path)) => format!("{scheme}://{}", path.display()),
            _ => self.endpoint.clone(),
        }
    }
}

const DEFAULT_NAMESPACE: &str = "stores";
const DEFAULT_SITES: &str = "eu=stores_eu,us=stores_us";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | WORK_DIR | /var/lib/store-server | base directory for embedded data |
/// | DB_ENDPOINT | rocksdb://$WORK_DIR/db | SurrealDB endpoint |
/// | DB_NAMESPACE | stores | namespace of the site databases |
/// | DB_USERNAME / DB_PASSWORD | - | root credentials (remote endpoints) |
/// | SITES | eu=stores_eu,us=stores_us | site → database map |
/// | ENVIRONMENT | development | running environment |
/// | LOG_LEVEL | info | log level when RUST_LOG is unset |
/// | LOG_DIR | - | directory for daily rolling log files |
///
/// ```ignore
/// SITES=eu=stores_eu,uk=stores_uk DB_ENDPOINT=mem:// cargo run -p store-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub database: DbConfig,
    pub sites: SiteMap,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let work_dir = var("WORK_DIR").unwrap_or_else(|| "/var/lib/store-server".into());
        let sites = var("SITES")
            .unwrap_or_else(|| DEFAULT_SITES.into())
            .parse::<SiteMap>()?;

        Ok(Self {
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
            database: DbConfig {
                endpoint: var("DB_ENDPOINT").unwrap_or_else(|| format!("rocksdb://{work_dir}/db")),
                namespace: var("DB_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.into()),
                username: var("DB_USERNAME"),
                password: var("DB_PASSWORD"),
            },
            sites,
        })
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.database.endpoint, "rocksdb:///var/lib/store-server/db");
        assert_eq!(config.database.namespace, "stores");
        assert_eq!(config.sites.database("eu"), Some("stores_eu"));
        assert_eq!(config.sites.database("us"), Some("stores_us"));
        assert!(config.log_dir.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "9090"),
            ("DB_ENDPOINT", "ws://db:8000"),
            ("SITES", "uk=stores_uk"),
            ("ENVIRONMENT", "production"),
            ("LOG_DIR", "/tmp/logs"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.database.endpoint, "ws://db:8000");
        assert_eq!(config.sites.database("uk"), Some("stores_uk"));
        assert_eq!(config.sites.database("eu"), None);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/logs"));
        assert!(config.is_production());
    }

    #[test]
    fn test_work_dir_sets_default_endpoint() {
        let config = config_from(&[("WORK_DIR", "/srv/stores")]).unwrap();
        assert_eq!(config.database.endpoint, "rocksdb:///srv/stores/db");

        let config =
            config_from(&[("WORK_DIR", "/srv/stores"), ("DB_ENDPOINT", "mem://")]).unwrap();
        assert_eq!(config.database.endpoint, "mem://");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_from(&[("HTTP_PORT", "http")]).unwrap();
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn test_blank_value_counts_as_unset() {
        let config = config_from(&[("DB_NAMESPACE", "  ")]).unwrap();
        assert_eq!(config.database.namespace, "stores");
    }

    #[test]
    fn test_bad_sites_is_an_error() {
        let err = config_from(&[("SITES", "eu")]).unwrap_err();
        assert_eq!(err, ConfigError::MalformedSite("eu".into()));
    }

    #[test]
    fn test_embedded_endpoint_gets_a_directory_per_database() {
        let db = DbConfig {
            endpoint: "rocksdb:///data/db/".into(),
            ..DbConfig::in_memory()
        };
        assert_eq!(
            db.embedded_path("stores_eu"),
            Some(PathBuf::from("/data/db/stores_eu"))
        );
        assert_eq!(db.endpoint_for("stores_eu"), "rocksdb:///data/db/stores_eu");
    }

    #[test]
    fn test_remote_and_memory_endpoints_are_shared() {
        let remote = DbConfig {
            endpoint: "ws://localhost:8000".into(),
            ..DbConfig::in_memory()
        };
        assert_eq!(remote.embedded_path("stores_eu"), None);
        assert_eq!(remote.endpoint_for("stores_eu"), "ws://localhost:8000");

        let memory = DbConfig::in_memory();
        assert_eq!(memory.endpoint_for("stores_eu"), "mem://");
    }
}
