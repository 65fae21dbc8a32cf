//! Site → database resolution

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use shared::error::{AppError, AppResult};

use super::repository::{RepoResult, StoreRepository, SurrealStoreRepository};
use crate::core::{ConfigError, DbConfig};

/// Static mapping of site identifiers to database names
///
/// Parsed from `site=database` pairs separated by commas, e.g.
/// `eu=stores_eu,us=stores_us`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMap {
    sites: BTreeMap<String, String>,
}

impl SiteMap {
    /// Database name configured for `site`
    pub fn database(&self, site: &str) -> Option<&str> {
        self.sites.get(site).map(String::as_str)
    }

    /// `(site, database)` pairs, ordered by site
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sites.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl FromStr for SiteMap {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut sites = BTreeMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (site, database) = entry
                .split_once('=')
                .map(|(s, d)| (s.trim(), d.trim()))
                .filter(|(s, d)| !s.is_empty() && !d.is_empty())
                .ok_or_else(|| ConfigError::MalformedSite(entry.to_string()))?;

            if sites
                .insert(site.to_string(), database.to_string())
                .is_some()
            {
                return Err(ConfigError::DuplicateSite(site.to_string()));
            }
        }

        if sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        Ok(Self { sites })
    }
}

/// Resolves a site identifier to the store repository of its database
///
/// Unknown sites are rejected; there is no fallback database.
#[derive(Clone)]
pub struct TenantResolver {
    repositories: Arc<BTreeMap<String, Arc<dyn StoreRepository>>>,
}

impl TenantResolver {
    /// Connect to every site database and make sure its schema exists
    pub async fn connect(config: &DbConfig, sites: &SiteMap) -> RepoResult<Self> {
        let mut repositories: BTreeMap<String, Arc<dyn StoreRepository>> = BTreeMap::new();

        for (site, database) in sites.iter() {
            let db = super::open_database(config, database).await?;
            let repository = SurrealStoreRepository::new(db, site, database);
            repository.ensure_schema().await?;

            tracing::info!(site, database, "Site database ready");
            repositories.insert(site.to_string(), Arc::new(repository));
        }

        Ok(Self {
            repositories: Arc::new(repositories),
        })
    }

    /// Build a resolver over ready-made repositories
    pub fn from_repositories<I, S>(repositories: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn StoreRepository>)>,
        S: Into<String>,
    {
        Self {
            repositories: Arc::new(
                repositories
                    .into_iter()
                    .map(|(site, repo)| (site.into(), repo))
                    .collect(),
            ),
        }
    }

    /// Repository of the database mapped to `site`
    pub fn resolve(&self, site: &str) -> AppResult<Arc<dyn StoreRepository>> {
        self.repositories.get(site).cloned().ok_or_else(|| {
            tracing::warn!(site, "Request for unknown site");
            AppError::site_not_found(site)
        })
    }

    /// Configured site identifiers, sorted
    pub fn sites(&self) -> Vec<&str> {
        self.repositories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::{Store, StoreField};

    #[test]
    fn test_parse_site_map() {
        let map: SiteMap = " eu = stores_eu , us=stores_us,".parse().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.database("eu"), Some("stores_eu"));
        assert_eq!(map.database("us"), Some("stores_us"));
        assert_eq!(map.database("uk"), None);
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![("eu", "stores_eu"), ("us", "stores_us")]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert_eq!(
            "eu".parse::<SiteMap>(),
            Err(ConfigError::MalformedSite("eu".into()))
        );
        assert_eq!(
            "eu=".parse::<SiteMap>(),
            Err(ConfigError::MalformedSite("eu=".into()))
        );
        assert_eq!(
            "=stores_eu".parse::<SiteMap>(),
            Err(ConfigError::MalformedSite("=stores_eu".into()))
        );
    }

    #[test]
    fn test_parse_rejects_duplicates_and_empty() {
        assert_eq!(
            "eu=a,eu=b".parse::<SiteMap>(),
            Err(ConfigError::DuplicateSite("eu".into()))
        );
        assert_eq!(" , ".parse::<SiteMap>(), Err(ConfigError::NoSites));
    }

    #[tokio::test]
    async fn test_unknown_site_fails_closed() {
        let sites: SiteMap = "eu=stores_eu".parse().unwrap();
        let resolver = TenantResolver::connect(&DbConfig::in_memory(), &sites)
            .await
            .unwrap();

        assert_eq!(resolver.sites(), vec!["eu"]);
        assert!(resolver.resolve("eu").is_ok());

        let err = resolver.resolve("mars").err().unwrap();
        assert_eq!(err.code, ErrorCode::SiteNotFound);
    }

    #[tokio::test]
    async fn test_sites_are_isolated() {
        let sites: SiteMap = "eu=stores_eu,us=stores_us".parse().unwrap();
        let resolver = TenantResolver::connect(&DbConfig::in_memory(), &sites)
            .await
            .unwrap();

        let store = Store::mock(0);
        let eu = resolver.resolve("eu").unwrap();
        eu.upsert(&store.code, &store).await.unwrap();

        let us = resolver.resolve("us").unwrap();
        assert!(us.find_all().await.unwrap().is_empty());
        assert_eq!(
            eu.find_by_field(StoreField::Code, "store_code0")
                .await
                .unwrap(),
            vec![store]
        );
    }

    #[tokio::test]
    async fn test_embedded_endpoint_uses_a_directory_per_site() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DbConfig {
            endpoint: format!("rocksdb://{}", tmp.path().display()),
            ..DbConfig::in_memory()
        };
        let sites: SiteMap = "eu=stores_eu,us=stores_us".parse().unwrap();

        let resolver = TenantResolver::connect(&config, &sites).await.unwrap();
        let store = Store::mock(1);
        resolver
            .resolve("us")
            .unwrap()
            .upsert(&store.code, &store)
            .await
            .unwrap();

        assert!(tmp.path().join("stores_eu").is_dir());
        assert!(tmp.path().join("stores_us").is_dir());
        assert_eq!(
            resolver.resolve("us").unwrap().find_all().await.unwrap(),
            vec![store]
        );
    }
}
