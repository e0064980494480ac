//! # Product Entity
//!
//! A stock-tracked item sold or purchased by a business.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::errors::{ModelError, ModelResult};
use super::{IndexHint, IndexKind};

/// Product entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    /// Trimmed, 1..=100 chars
    pub name: String,
    /// Optional, trimmed, <=500 chars
    pub description: Option<String>,
    /// Unit price, >= 0
    pub price: f64,
    /// Units on hand, >= 0
    pub stock: u32,
    /// Trimmed, 1..=50 chars
    pub category: String,
    /// Owning business (tenancy boundary)
    pub business_id: Uuid,
    /// Soft-delete flag
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound product payload, deserialized after the validation chain passed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub category: String,
}

impl Product {
    pub fn index_hints() -> Vec<IndexHint> {
        vec![
            IndexHint {
                fields: &["business_id", "category"],
                kind: IndexKind::Ascending,
            },
            IndexHint {
                fields: &["business_id", "is_active"],
                kind: IndexKind::Ascending,
            },
        ]
    }

    /// Build a new product from a draft, enforcing field constraints.
    pub fn create(draft: ProductDraft, business_id: Uuid) -> ModelResult<Self> {
        let fields = check_fields(draft)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
            category: fields.category,
            business_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an update draft through the same constraint checks.
    pub fn apply(&mut self, draft: ProductDraft) -> ModelResult<()> {
        let fields = check_fields(draft)?;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.stock = fields.stock;
        self.category = fields.category;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Soft delete.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

struct CheckedFields {
    name: String,
    description: Option<String>,
    price: f64,
    stock: u32,
    category: String,
}

fn check_fields(draft: ProductDraft) -> ModelResult<CheckedFields> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(ModelError::constraint("name", "Product name is required"));
    }
    if name.chars().count() > 100 {
        return Err(ModelError::constraint(
            "name",
            "Name cannot exceed 100 characters",
        ));
    }

    let description = draft
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    if let Some(description) = &description {
        if description.chars().count() > 500 {
            return Err(ModelError::constraint(
                "description",
                "Description cannot exceed 500 characters",
            ));
        }
    }

    if draft.price < 0.0 {
        return Err(ModelError::constraint("price", "Price cannot be negative"));
    }

    let category = draft.category.trim().to_string();
    if category.is_empty() {
        return Err(ModelError::constraint("category", "Category is required"));
    }
    if category.chars().count() > 50 {
        return Err(ModelError::constraint(
            "category",
            "Category cannot exceed 50 characters",
        ));
    }

    Ok(CheckedFields {
        name,
        description,
        price: draft.price,
        stock: draft.stock,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            stock: 5,
            category: "hardware".to_string(),
        }
    }

    #[test]
    fn test_create_sets_defaults() {
        let product = Product::create(draft(), Uuid::new_v4()).unwrap();
        assert!(product.is_active);
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut d = draft();
        d.price = -1.0;
        let err = Product::create(d, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.violation().unwrap().field, "price");
    }

    #[test]
    fn test_category_over_50_rejected() {
        let mut d = draft();
        d.category = "c".repeat(51);
        let err = Product::create(d, Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Category cannot exceed 50 characters"
        );
    }

    #[test]
    fn test_description_trimmed_and_bounded() {
        let mut d = draft();
        d.description = Some("  solid  ".to_string());
        let product = Product::create(d, Uuid::new_v4()).unwrap();
        assert_eq!(product.description.as_deref(), Some("solid"));

        let mut d = draft();
        d.description = Some("x".repeat(501));
        assert!(Product::create(d, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_zero_price_and_stock_accepted() {
        let mut d = draft();
        d.price = 0.0;
        d.stock = 0;
        assert!(Product::create(d, Uuid::new_v4()).is_ok());
    }
}
