//! Store API module
//!
//! Every route requires `site`, which selects the database the request
//! runs against.

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/store", get(handler::get_by_code))
        .route("/storeName", get(handler::get_by_name))
        .route("/storesAll", get(handler::list_all))
        .route("/addStore", post(handler::add))
        .route("/addMockStores", get(handler::add_mock))
}
