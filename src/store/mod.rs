//! # Document Store Collaborator
//!
//! Per-entity repositories over a document store. The store is an external
//! collaborator in production; the in-memory implementation here backs tests
//! and the self-contained server.
//!
//! Every read is scoped by `business_id`; no repository method can cross the
//! tenancy boundary.

mod memory;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Contact, ContactKind, Product, Transaction, TransactionKind, User};

pub use memory::MemoryStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the repositories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Unique-email constraint on users
    #[error("Email is already registered")]
    EmailExists,

    /// No document with that id inside the business scope
    #[error("Record not found")]
    NotFound,

    /// Lock poisoning or other internal failure
    #[error("storage error: {0}")]
    Internal(String),
}

/// Filter for contact listings.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Restrict to one kind
    pub kind: Option<ContactKind>,
    /// Drop soft-deleted contacts
    pub active_only: bool,
    /// Case-insensitive substring over name, email, and phone (the fields
    /// covered by the text index hint)
    pub search: Option<String>,
}

/// Filter and page window for transaction listings.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub kind: Option<TransactionKind>,
    /// Documents to skip (page window)
    pub offset: usize,
    /// Page size
    pub limit: usize,
}

/// User storage.
pub trait UserRepository: Send + Sync {
    fn create(&self, user: User) -> StoreResult<()>;
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    fn email_exists(&self, email: &str) -> StoreResult<bool>;
}

/// Contact storage, scoped by business.
pub trait ContactRepository: Send + Sync {
    fn insert(&self, contact: Contact) -> StoreResult<()>;
    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Contact>>;
    fn list(&self, business_id: Uuid, filter: &ContactFilter) -> StoreResult<Vec<Contact>>;
    /// Replace the stored document; `NotFound` if it does not exist in scope.
    fn update(&self, contact: Contact) -> StoreResult<()>;
}

/// Product storage, scoped by business.
pub trait ProductRepository: Send + Sync {
    fn insert(&self, product: Product) -> StoreResult<()>;
    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Product>>;
    fn list(&self, business_id: Uuid, active_only: bool) -> StoreResult<Vec<Product>>;
    fn update(&self, product: Product) -> StoreResult<()>;
}

/// Transaction storage, scoped by business.
///
/// Both write methods recompute `total_amount` from the lines immediately
/// before persisting; a caller-supplied total never reaches the store.
pub trait TransactionRepository: Send + Sync {
    fn insert(&self, tx: Transaction) -> StoreResult<()>;
    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Transaction>>;
    /// Newest-first listing (the descending date index hint).
    fn list(&self, business_id: Uuid, query: &TransactionQuery) -> StoreResult<Vec<Transaction>>;
    fn update(&self, tx: Transaction) -> StoreResult<()>;
}
