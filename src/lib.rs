//! tallybook - a multi-tenant bookkeeping backend
//!
//! Contacts, products, and transactions per business, guarded by
//! per-endpoint validation chains.

pub mod api;
pub mod cli;
pub mod model;
pub mod observability;
pub mod store;
pub mod validation;
