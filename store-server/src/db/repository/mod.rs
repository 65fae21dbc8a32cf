//! Repository Module
//!
//! Store persistence behind the [`StoreRepository`] trait, so handlers do
//! not care which database (or test double) a site resolves to.

pub mod store;

pub use store::SurrealStoreRepository;

use async_trait::async_trait;
use shared::error::AppError;
use shared::models::{Store, StoreField};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Store collection of a single site database
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// All stores whose `field` equals `value`, in storage order
    async fn find_by_field(&self, field: StoreField, value: &str) -> RepoResult<Vec<Store>>;

    /// Every store in the collection
    async fn find_all(&self) -> RepoResult<Vec<Store>>;

    /// Replace the store keyed by `code` with `store`, inserting it when
    /// no such store exists
    async fn upsert(&self, code: &str, store: &Store) -> RepoResult<()>;
}
