//! Store Repository (SurrealDB)

use async_trait::async_trait;
use shared::models::{Store, StoreField};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use super::{RepoError, RepoResult, StoreRepository};

const TABLE: &str = "store";

/// Idempotent schema for the store table
///
/// Records are addressed as `store:[code]`; the array key also accepts an
/// empty code. The unique index on `code` backs that up for anything
/// writing to the table directly.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS store SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS store_code ON TABLE store FIELDS code UNIQUE;
    DEFINE INDEX IF NOT EXISTS store_name ON TABLE store FIELDS name;
";

#[derive(Clone)]
pub struct SurrealStoreRepository {
    db: Surreal<Any>,
    site: String,
    database: String,
}

impl SurrealStoreRepository {
    pub fn new(db: Surreal<Any>, site: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            db,
            site: site.into(),
            database: database.into(),
        }
    }

    /// Create the store table and its indexes if missing
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        let result = async {
            self.db.query(SCHEMA).await?.check()?;
            Ok::<_, RepoError>(())
        }
        .await;
        result.map_err(|e| self.failed("ensure_schema", e))
    }

    async fn select(&self, field: Option<StoreField>, value: &str) -> RepoResult<Vec<Store>> {
        // field names come from StoreField, never from the request
        let query = match field {
            Some(field) => format!("SELECT * OMIT id FROM {TABLE} WHERE {field} = $value"),
            None => format!("SELECT * OMIT id FROM {TABLE}"),
        };
        let stores: Vec<Store> = self
            .db
            .query(query)
            .bind(("value", value.to_owned()))
            .await?
            .take(0)?;
        Ok(stores)
    }

    fn failed(&self, operation: &str, err: RepoError) -> RepoError {
        tracing::error!(
            site = %self.site,
            database = %self.database,
            operation,
            error = %err,
            "Store query failed"
        );
        err
    }
}

#[async_trait]
impl StoreRepository for SurrealStoreRepository {
    async fn find_by_field(&self, field: StoreField, value: &str) -> RepoResult<Vec<Store>> {
        self.select(Some(field), value)
            .await
            .map_err(|e| self.failed("find_by_field", e))
    }

    async fn find_all(&self) -> RepoResult<Vec<Store>> {
        self.select(None, "")
            .await
            .map_err(|e| self.failed("find_all", e))
    }

    async fn upsert(&self, code: &str, store: &Store) -> RepoResult<()> {
        let result = async {
            self.db
                .query("UPSERT type::thing($table, [$code]) CONTENT $store RETURN NONE")
                .bind(("table", TABLE))
                .bind(("code", code.to_owned()))
                .bind(("store", store.clone()))
                .await?
                .check()?;
            Ok::<_, RepoError>(())
        }
        .await;
        result.map_err(|e| self.failed("upsert", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DbConfig;
    use crate::db::open_database;

    async fn repository() -> SurrealStoreRepository {
        let db = open_database(&DbConfig::in_memory(), "stores_test")
            .await
            .unwrap();
        let repo = SurrealStoreRepository::new(db, "test", "stores_test");
        repo.ensure_schema().await.unwrap();
        repo
    }

    fn store(code: &str, name: &str) -> Store {
        Store {
            code: code.into(),
            name: name.into(),
            description: format!("{name} description"),
            catalogs: vec!["c1".into(), "c2".into()],
            area: "A1".into(),
            delete: false,
        }
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let repo = repository().await;
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(
            repo.find_by_field(StoreField::Code, "S1")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_upsert_then_find_by_code() {
        let repo = repository().await;
        let s1 = store("S1", "Main");
        repo.upsert(&s1.code, &s1).await.unwrap();

        let found = repo.find_by_field(StoreField::Code, "S1").await.unwrap();
        assert_eq!(found, vec![s1]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_document() {
        let repo = repository().await;
        let first = store("S1", "Main");
        repo.upsert(&first.code, &first).await.unwrap();

        let second = Store {
            code: "S1".into(),
            name: "Renamed".into(),
            ..Store::default()
        };
        repo.upsert(&second.code, &second).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![second]);
    }

    #[tokio::test]
    async fn test_find_by_name_returns_every_match() {
        let repo = repository().await;
        for s in [store("S1", "Outlet"), store("S2", "Outlet"), store("S3", "Main")] {
            repo.upsert(&s.code, &s).await.unwrap();
        }

        let outlets = repo.find_by_field(StoreField::Name, "Outlet").await.unwrap();
        let mut codes: Vec<_> = outlets.iter().map(|s| s.code.as_str()).collect();
        codes.sort();
        assert_eq!(codes, vec!["S1", "S2"]);

        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_code_is_a_valid_key() {
        let repo = repository().await;
        let blank = store("", "Blank");
        repo.upsert(&blank.code, &blank).await.unwrap();

        let renamed = store("", "Renamed");
        repo.upsert(&renamed.code, &renamed).await.unwrap();

        let found = repo.find_by_field(StoreField::Code, "").await.unwrap();
        assert_eq!(found, vec![renamed]);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_code_with_id_delimiters() {
        let repo = repository().await;
        let odd = store("a:b⟩c", "Odd");
        repo.upsert(&odd.code, &odd).await.unwrap();

        let found = repo.find_by_field(StoreField::Code, "a:b⟩c").await.unwrap();
        assert_eq!(found, vec![odd]);
    }

    #[tokio::test]
    async fn test_delete_flag_is_not_filtered() {
        let repo = repository().await;
        let deleted = Store {
            delete: true,
            ..store("S1", "Gone")
        };
        repo.upsert(&deleted.code, &deleted).await.unwrap();

        let found = repo.find_by_field(StoreField::Code, "S1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].delete);
    }
}
