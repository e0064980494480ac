//! # In-Memory Store
//!
//! `RwLock`-backed repositories partitioned by `business_id`, the partition
//! key mirroring the business-id index hints. Suited to tests and the
//! self-contained server; a production deployment swaps in a real document
//! store behind the same traits.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::model::{Contact, Product, Transaction, User};

use super::{
    ContactFilter, ContactRepository, ProductRepository, StoreError, StoreResult,
    TransactionQuery, TransactionRepository, UserRepository,
};

/// All four in-memory repositories behind one handle.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    contacts: RwLock<HashMap<Uuid, Vec<Contact>>>,
    products: RwLock<HashMap<Uuid, Vec<Product>>>,
    transactions: RwLock<HashMap<Uuid, Vec<Transaction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Internal("lock poisoned".to_string())
}

impl UserRepository for MemoryStore {
    fn create(&self, user: User) -> StoreResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::EmailExists);
        }
        users.push(user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().any(|u| u.email == email))
    }
}

impl ContactRepository for MemoryStore {
    fn insert(&self, contact: Contact) -> StoreResult<()> {
        let mut partitions = self.contacts.write().map_err(poisoned)?;
        partitions
            .entry(contact.business_id)
            .or_default()
            .push(contact);
        Ok(())
    }

    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Contact>> {
        let partitions = self.contacts.read().map_err(poisoned)?;
        Ok(partitions
            .get(&business_id)
            .and_then(|contacts| contacts.iter().find(|c| c.id == id))
            .cloned())
    }

    fn list(&self, business_id: Uuid, filter: &ContactFilter) -> StoreResult<Vec<Contact>> {
        let partitions = self.contacts.read().map_err(poisoned)?;
        let Some(contacts) = partitions.get(&business_id) else {
            return Ok(Vec::new());
        };

        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        Ok(contacts
            .iter()
            .filter(|c| filter.kind.is_none_or(|k| c.kind == k))
            .filter(|c| !filter.active_only || c.is_active)
            .filter(|c| needle.as_ref().is_none_or(|n| matches_search(c, n)))
            .cloned()
            .collect())
    }

    fn update(&self, contact: Contact) -> StoreResult<()> {
        let mut partitions = self.contacts.write().map_err(poisoned)?;
        let slot = partitions
            .get_mut(&contact.business_id)
            .and_then(|contacts| contacts.iter_mut().find(|c| c.id == contact.id))
            .ok_or(StoreError::NotFound)?;
        *slot = contact;
        Ok(())
    }
}

/// Substring match over the text-indexed contact fields.
fn matches_search(contact: &Contact, needle: &str) -> bool {
    contact.name.to_lowercase().contains(needle)
        || contact
            .email
            .as_ref()
            .is_some_and(|e| e.to_lowercase().contains(needle))
        || contact.phone.as_ref().is_some_and(|p| p.contains(needle))
}

impl ProductRepository for MemoryStore {
    fn insert(&self, product: Product) -> StoreResult<()> {
        let mut partitions = self.products.write().map_err(poisoned)?;
        partitions
            .entry(product.business_id)
            .or_default()
            .push(product);
        Ok(())
    }

    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Product>> {
        let partitions = self.products.read().map_err(poisoned)?;
        Ok(partitions
            .get(&business_id)
            .and_then(|products| products.iter().find(|p| p.id == id))
            .cloned())
    }

    fn list(&self, business_id: Uuid, active_only: bool) -> StoreResult<Vec<Product>> {
        let partitions = self.products.read().map_err(poisoned)?;
        Ok(partitions
            .get(&business_id)
            .map(|products| {
                products
                    .iter()
                    .filter(|p| !active_only || p.is_active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update(&self, product: Product) -> StoreResult<()> {
        let mut partitions = self.products.write().map_err(poisoned)?;
        let slot = partitions
            .get_mut(&product.business_id)
            .and_then(|products| products.iter_mut().find(|p| p.id == product.id))
            .ok_or(StoreError::NotFound)?;
        *slot = product;
        Ok(())
    }
}

impl TransactionRepository for MemoryStore {
    fn insert(&self, mut tx: Transaction) -> StoreResult<()> {
        // The derived total is never trusted from the caller.
        tx.recompute_total();
        let mut partitions = self.transactions.write().map_err(poisoned)?;
        partitions.entry(tx.business_id).or_default().push(tx);
        Ok(())
    }

    fn find(&self, business_id: Uuid, id: Uuid) -> StoreResult<Option<Transaction>> {
        let partitions = self.transactions.read().map_err(poisoned)?;
        Ok(partitions
            .get(&business_id)
            .and_then(|txs| txs.iter().find(|t| t.id == id))
            .cloned())
    }

    fn list(&self, business_id: Uuid, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let partitions = self.transactions.read().map_err(poisoned)?;
        let Some(txs) = partitions.get(&business_id) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<Transaction> = txs
            .iter()
            .filter(|t| query.kind.is_none_or(|k| t.kind() == k))
            .filter(|t| query.from.is_none_or(|from| t.date >= from))
            .filter(|t| query.to.is_none_or(|to| t.date <= to))
            .cloned()
            .collect();

        // Newest first, per the descending date index hint.
        matches.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(matches
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    fn update(&self, mut tx: Transaction) -> StoreResult<()> {
        tx.recompute_total();
        let mut partitions = self.transactions.write().map_err(poisoned)?;
        let slot = partitions
            .get_mut(&tx.business_id)
            .and_then(|txs| txs.iter_mut().find(|t| t.id == tx.id))
            .ok_or(StoreError::NotFound)?;
        *slot = tx;
        Ok(())
    }
}
