//! # Router and Shared State
//!
//! Builds the axum router over the repository handles. The tenancy boundary
//! is a business id taken from the `x-business-id` header, standing in for
//! the deferred authentication layer.

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::store::{
    ContactRepository, MemoryStore, ProductRepository, TransactionRepository, UserRepository,
};

use super::errors::ApiError;
use super::{auth, contacts, products, transactions};

/// Default hard cap on requested page sizes.
pub const DEFAULT_MAX_LIMIT: i64 = 100;

/// Repository handles shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    /// Hard cap applied to requested page sizes, settable from the CLI.
    pub max_limit: i64,
}

impl AppState {
    /// All repositories backed by one in-memory store.
    pub fn in_memory() -> Self {
        Self::in_memory_with_cap(DEFAULT_MAX_LIMIT)
    }

    pub fn in_memory_with_cap(max_limit: i64) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            contacts: store.clone(),
            products: store.clone(),
            transactions: store,
            max_limit,
        }
    }
}

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/contacts", post(contacts::create).get(contacts::list))
        .route(
            "/api/contacts/{id}",
            get(contacts::fetch)
                .put(contacts::update)
                .delete(contacts::remove),
        )
        .route("/api/products", post(products::create).get(products::list))
        .route(
            "/api/products/{id}",
            get(products::fetch)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/api/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route("/api/transactions/{id}", get(transactions::fetch))
        .route(
            "/api/transactions/{id}/status",
            axum::routing::put(transactions::set_status),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Extract the owning business id from the tenancy header.
pub(super) fn business_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let raw = headers
        .get("x-business-id")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingBusiness)?;
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidBusiness)
}
