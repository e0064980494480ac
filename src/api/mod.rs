//! # HTTP Surface
//!
//! Thin axum layer wiring the validation chains to the entity write paths.
//! Handlers never see a payload the chains have not passed; the store never
//! sees a document the model has not checked.

mod auth;
mod contacts;
mod errors;
mod products;
mod response;
mod server;
mod transactions;
mod views;

pub use errors::{ApiError, ApiResult};
pub use response::{DeletedResponse, ListResponse, SingleResponse};
pub use server::{router, AppState, DEFAULT_MAX_LIMIT};
pub use views::{ContactView, ProductView, TransactionView, UserView};
