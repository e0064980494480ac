//! # Entity Models
//!
//! Typed document shapes for the four entity kinds, with write-time
//! constraint enforcement and derived values.
//!
//! Every entity is scoped to one owning business (`business_id`), set once at
//! creation and never rewritten through the update paths.

mod contact;
mod errors;
mod product;
mod transaction;
mod user;

pub use contact::{Contact, ContactDraft, ContactKind};
pub use errors::{ConstraintViolation, ModelError, ModelResult};
pub use product::{Product, ProductDraft};
pub use transaction::{
    Counterparty, LineItem, Transaction, TransactionDraft, TransactionKind, TransactionStatus,
};
pub use user::{LoginDraft, SignupDraft, User};

/// Declarative query-acceleration hint for the backing store.
///
/// Hints are performance aids, not behavioral invariants; a store is free to
/// ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    /// Indexed field names, in order
    pub fields: &'static [&'static str],
    /// Index flavor
    pub kind: IndexKind,
}

/// Index flavor for an [`IndexHint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Ascending single- or multi-field index
    Ascending,
    /// Descending single-field index
    Descending,
    /// Text-search index over string fields
    Text,
}
