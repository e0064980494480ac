//! # Contact Entity
//!
//! A customer or vendor belonging to exactly one business. Contacts are
//! never hard-deleted; `is_active` is the soft-delete flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::email_pattern;

use super::errors::{ModelError, ModelResult};
use super::{IndexHint, IndexKind};

/// Contact classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Customer,
    Vendor,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Customer => "customer",
            ContactKind::Vendor => "vendor",
        }
    }
}

/// Contact entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Unique contact identifier
    pub id: Uuid,
    /// Display name, trimmed, 1..=100 chars
    pub name: String,
    /// Optional phone number, trimmed, <=20 chars
    pub phone: Option<String>,
    /// Optional email, trimmed and lowercased
    pub email: Option<String>,
    /// Optional postal address, trimmed, <=200 chars
    pub address: Option<String>,
    /// Customer or vendor
    pub kind: ContactKind,
    /// Owning business (tenancy boundary, immutable post-creation)
    pub business_id: Uuid,
    /// Soft-delete flag
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound contact payload, deserialized after the validation chain passed.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContactKind,
}

impl Contact {
    /// Index hints matching the store's contact access paths.
    pub fn index_hints() -> Vec<IndexHint> {
        vec![
            IndexHint {
                fields: &["name", "email", "phone"],
                kind: IndexKind::Text,
            },
            IndexHint {
                fields: &["business_id", "type"],
                kind: IndexKind::Ascending,
            },
            IndexHint {
                fields: &["business_id", "is_active"],
                kind: IndexKind::Ascending,
            },
        ]
    }

    /// Build a new contact from a draft, enforcing field constraints.
    pub fn create(draft: ContactDraft, business_id: Uuid) -> ModelResult<Self> {
        let fields = check_fields(draft)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            kind: fields.kind,
            business_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an update draft through the same constraint checks.
    ///
    /// `business_id` is deliberately untouched.
    pub fn apply(&mut self, draft: ContactDraft) -> ModelResult<()> {
        let fields = check_fields(draft)?;
        self.name = fields.name;
        self.phone = fields.phone;
        self.email = fields.email;
        self.address = fields.address;
        self.kind = fields.kind;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Soft delete: the document stays readable, flagged inactive.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Derived display name, computed on read and never persisted.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.kind.as_str())
    }
}

/// Checked and normalized contact fields.
struct CheckedFields {
    name: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    kind: ContactKind,
}

fn check_fields(draft: ContactDraft) -> ModelResult<CheckedFields> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(ModelError::constraint("name", "Contact name is required"));
    }
    if name.chars().count() > 100 {
        return Err(ModelError::constraint(
            "name",
            "Name cannot exceed 100 characters",
        ));
    }

    let phone = normalize_optional(draft.phone);
    if let Some(phone) = &phone {
        if phone.chars().count() > 20 {
            return Err(ModelError::constraint(
                "phone",
                "Phone number cannot exceed 20 characters",
            ));
        }
    }

    let email = normalize_optional(draft.email).map(|e| e.to_lowercase());
    if let Some(email) = &email {
        if !email_pattern().is_match(email) {
            return Err(ModelError::constraint("email", "Please enter a valid email"));
        }
    }

    let address = normalize_optional(draft.address);
    if let Some(address) = &address {
        if address.chars().count() > 200 {
            return Err(ModelError::constraint(
                "address",
                "Address cannot exceed 200 characters",
            ));
        }
    }

    Ok(CheckedFields {
        name,
        phone,
        email,
        address,
        kind: draft.kind,
    })
}

/// Trim an optional string; whitespace-only input collapses to `None`.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ContactDraft {
        ContactDraft {
            name: name.to_string(),
            phone: None,
            email: None,
            address: None,
            kind: ContactKind::Customer,
        }
    }

    #[test]
    fn test_create_sets_defaults() {
        let business = Uuid::new_v4();
        let contact = Contact::create(draft("Acme"), business).unwrap();

        assert_eq!(contact.name, "Acme");
        assert!(contact.is_active);
        assert_eq!(contact.business_id, business);
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[test]
    fn test_name_is_trimmed() {
        let contact = Contact::create(draft("  Acme  "), Uuid::new_v4()).unwrap();
        assert_eq!(contact.name, "Acme");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Contact::create(draft("   "), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.violation().unwrap().message, "Contact name is required");
    }

    #[test]
    fn test_name_over_100_rejected() {
        let err = Contact::create(draft(&"x".repeat(101)), Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Name cannot exceed 100 characters"
        );
    }

    #[test]
    fn test_name_at_100_accepted() {
        assert!(Contact::create(draft(&"x".repeat(100)), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_email_lowercased() {
        let mut d = draft("Acme");
        d.email = Some(" Sales@Example.COM ".to_string());
        let contact = Contact::create(d, Uuid::new_v4()).unwrap();
        assert_eq!(contact.email.as_deref(), Some("sales@example.com"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut d = draft("Acme");
        d.email = Some("not-an-email".to_string());
        let err = Contact::create(d, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.violation().unwrap().field, "email");
    }

    #[test]
    fn test_phone_over_20_rejected() {
        let mut d = draft("Acme");
        d.phone = Some("1".repeat(21));
        let err = Contact::create(d, Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Phone number cannot exceed 20 characters"
        );
    }

    #[test]
    fn test_display_name_derived() {
        let contact = Contact::create(draft("Acme"), Uuid::new_v4()).unwrap();
        assert_eq!(contact.display_name(), "Acme (customer)");

        let mut d = draft("Steel Co");
        d.kind = ContactKind::Vendor;
        let vendor = Contact::create(d, Uuid::new_v4()).unwrap();
        assert_eq!(vendor.display_name(), "Steel Co (vendor)");
    }

    #[test]
    fn test_apply_keeps_business_and_bumps_updated() {
        let business = Uuid::new_v4();
        let mut contact = Contact::create(draft("Acme"), business).unwrap();
        let created = contact.created_at;

        contact.apply(draft("Acme Ltd")).unwrap();
        assert_eq!(contact.name, "Acme Ltd");
        assert_eq!(contact.business_id, business);
        assert_eq!(contact.created_at, created);
        assert!(contact.updated_at >= created);
    }

    #[test]
    fn test_deactivate_is_soft() {
        let mut contact = Contact::create(draft("Acme"), Uuid::new_v4()).unwrap();
        contact.deactivate();
        assert!(!contact.is_active);
        assert_eq!(contact.name, "Acme");
    }

    #[test]
    fn test_index_hints_cover_tenancy_paths() {
        let hints = Contact::index_hints();
        assert!(hints
            .iter()
            .any(|h| h.fields == ["business_id", "type"] && h.kind == IndexKind::Ascending));
        assert!(hints.iter().any(|h| h.kind == IndexKind::Text));
    }
}
