//! Store API Handlers
//!
//! Every handler checks its mandatory query parameters first and touches
//! no database until they are present.

use std::convert::Infallible;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequestParts, State},
};
use http::request::Parts;

use crate::core::ServerState;
use crate::db::StoreRepository;
use crate::utils::query::first_values;
use crate::utils::{AppError, AppResult};
use shared::models::{Store, StoreField};

pub const SITE_REQUIRED: &str = "API site is a mandatory attribute";
pub const CODE_REQUIRED: &str = "store code is a mandatory attribute";
pub const NAME_REQUIRED: &str = "store name is a mandatory attribute";

/// Number of mock stores generated when `count` is absent or not an integer
pub const DEFAULT_MOCK_COUNT: usize = 10;

/// Query parameters accepted by the store routes
///
/// Extraction never fails: unknown keys are ignored and a repeated key
/// keeps its first value, so every problem surfaces as an [`AppError`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StoreQuery {
    pub site: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub count: Option<String>,
}

impl StoreQuery {
    pub fn parse(query: &str) -> Self {
        let mut values = first_values(query);
        Self {
            site: values.remove("site"),
            code: values.remove("code"),
            name: values.remove("name"),
            count: values.remove("count"),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for StoreQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}

/// Value of a mandatory parameter; empty counts as missing
fn required<'a>(value: &'a Option<String>, message: &'static str) -> AppResult<&'a str> {
    value.as_deref().filter(|v| !v.is_empty()).ok_or_else(|| {
        tracing::warn!("{}", message);
        AppError::required_field(message)
    })
}

/// Parse the `count` parameter of `/addMockStores`
///
/// Negative values generate nothing.
pub fn mock_count(raw: Option<&str>) -> usize {
    match raw.map(str::parse::<i64>) {
        Some(Ok(n)) => usize::try_from(n).unwrap_or(0),
        _ => {
            tracing::warn!(
                count = raw.unwrap_or_default(),
                "Missing or invalid 'count', using {}",
                DEFAULT_MOCK_COUNT
            );
            DEFAULT_MOCK_COUNT
        }
    }
}

async fn first_match(
    repo: &dyn StoreRepository,
    field: StoreField,
    value: &str,
) -> AppResult<Store> {
    repo.find_by_field(field, value)
        .await?
        .into_iter()
        .next()
        .ok_or_else(AppError::store_not_found)
}

/// GET /store?site=&code= - store by code
pub async fn get_by_code(
    State(state): State<ServerState>,
    query: StoreQuery,
) -> AppResult<Json<Store>> {
    let site = required(&query.site, SITE_REQUIRED)?;
    let code = required(&query.code, CODE_REQUIRED)?;

    let repo = state.tenants.resolve(site)?;
    first_match(repo.as_ref(), StoreField::Code, code)
        .await
        .map(Json)
}

/// GET /storeName?site=&name= - first store with that name
pub async fn get_by_name(
    State(state): State<ServerState>,
    query: StoreQuery,
) -> AppResult<Json<Store>> {
    let site = required(&query.site, SITE_REQUIRED)?;
    let name = required(&query.name, NAME_REQUIRED)?;

    let repo = state.tenants.resolve(site)?;
    first_match(repo.as_ref(), StoreField::Name, name)
        .await
        .map(Json)
}

/// GET /storesAll?site= - every store of the site
pub async fn list_all(
    State(state): State<ServerState>,
    query: StoreQuery,
) -> AppResult<Json<Vec<Store>>> {
    let site = required(&query.site, SITE_REQUIRED)?;

    let repo = state.tenants.resolve(site)?;
    let stores = repo.find_all().await?;
    Ok(Json(stores))
}

/// POST /addStore?site= - insert or replace a store, keyed on its code
///
/// The body is decoded by hand so a missing `site` is reported before a
/// bad payload.
pub async fn add(
    State(state): State<ServerState>,
    query: StoreQuery,
    body: Bytes,
) -> AppResult<()> {
    let site = required(&query.site, SITE_REQUIRED)?;
    let repo = state.tenants.resolve(site)?;

    let store: Store = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(site, error = %e, "Rejected store payload");
        AppError::invalid_format(format!("invalid store payload: {e}"))
    })?;
    tracing::debug!(site, ?store, "Upserting store");

    repo.upsert(&store.code, &store).await?;
    tracing::info!(site, code = %store.code, "Store saved");
    Ok(())
}

/// GET /addMockStores?site=&count= - seed the site with synthetic stores
///
/// Upserts run one after another; a failed one is logged and the rest
/// still run. Any failure turns the response into an error afterwards.
pub async fn add_mock(
    State(state): State<ServerState>,
    query: StoreQuery,
) -> AppResult<()> {
    let site = required(&query.site, SITE_REQUIRED)?;
    let repo = state.tenants.resolve(site)?;

    let count = mock_count(query.count.as_deref());
    tracing::info!(site, count, "Generating mock stores");

    let mut failed = 0usize;
    for index in 0..count {
        let store = Store::mock(index);
        match repo.upsert(&store.code, &store).await {
            Ok(()) => tracing::debug!(site, index, "Inserted mock store"),
            Err(e) => {
                failed += 1;
                tracing::warn!(site, index, error = %e, "Mock store upsert failed");
            }
        }
    }

    if failed > 0 {
        return Err(AppError::database(format!(
            "{failed} of {count} mock stores failed"
        )));
    }
    Ok(())
}
