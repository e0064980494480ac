//! # Transaction Entity
//!
//! A sale or purchase against a contact, carrying ordered product line
//! items. `total_amount` is derived: it is recomputed from the lines
//! immediately before every persistence and a client-submitted value never
//! survives.
//!
//! The counterparty is a tagged union rather than a nullable
//! customer-id/vendor-id pair, so a sale without a customer (or a purchase
//! without a vendor) is unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{ConstraintViolation, ModelError, ModelResult};
use super::{IndexHint, IndexKind};

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sale,
    Purchase,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Purchase => "purchase",
        }
    }
}

/// Transaction lifecycle state. Transactions are never deleted; the status
/// is the only mutable lifecycle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Completed
    }
}

/// The contact on the other side of a transaction.
///
/// Sales reference a customer, purchases a vendor; no other combination
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterparty {
    Customer(Uuid),
    Vendor(Uuid),
}

impl Counterparty {
    /// The transaction kind implied by this counterparty.
    pub fn kind(&self) -> TransactionKind {
        match self {
            Counterparty::Customer(_) => TransactionKind::Sale,
            Counterparty::Vendor(_) => TransactionKind::Purchase,
        }
    }

    /// The referenced contact id.
    pub fn contact_id(&self) -> Uuid {
        match self {
            Counterparty::Customer(id) | Counterparty::Vendor(id) => *id,
        }
    }

    pub fn customer_id(&self) -> Option<Uuid> {
        match self {
            Counterparty::Customer(id) => Some(*id),
            Counterparty::Vendor(_) => None,
        }
    }

    pub fn vendor_id(&self) -> Option<Uuid> {
        match self {
            Counterparty::Vendor(id) => Some(*id),
            Counterparty::Customer(_) => None,
        }
    }
}

/// One product line of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "productId")]
    pub product_id: Uuid,
    /// Units, >= 1
    pub quantity: u32,
    /// Unit price, >= 0
    pub price: f64,
}

impl LineItem {
    /// Line subtotal.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Transaction entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    /// Customer for sales, vendor for purchases
    pub counterparty: Counterparty,
    /// Ordered product lines
    pub lines: Vec<LineItem>,
    /// Derived sum of line subtotals; see [`Transaction::recompute_total`]
    pub total_amount: f64,
    /// Business date, defaults to creation time
    pub date: DateTime<Utc>,
    /// Owning business (tenancy boundary)
    pub business_id: Uuid,
    /// Optional free text, trimmed, <=500 chars
    pub notes: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound transaction payload, deserialized after the validation chain
/// passed. Carries the flat wire fields; [`Transaction::create`] folds them
/// into the tagged counterparty.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<Uuid>,
    #[serde(rename = "vendorId", default)]
    pub vendor_id: Option<Uuid>,
    pub products: Vec<LineItem>,
    /// Ignored: the total is always recomputed from the lines
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
}

impl Transaction {
    /// Index hints matching the store's transaction access paths.
    pub fn index_hints() -> Vec<IndexHint> {
        vec![
            IndexHint {
                fields: &["business_id"],
                kind: IndexKind::Ascending,
            },
            IndexHint {
                fields: &["type"],
                kind: IndexKind::Ascending,
            },
            IndexHint {
                fields: &["date"],
                kind: IndexKind::Descending,
            },
            IndexHint {
                fields: &["customer_id"],
                kind: IndexKind::Ascending,
            },
            IndexHint {
                fields: &["vendor_id"],
                kind: IndexKind::Ascending,
            },
        ]
    }

    /// Build a new transaction from a draft, enforcing field constraints and
    /// computing the total. Any submitted `totalAmount` is discarded.
    pub fn create(draft: TransactionDraft, business_id: Uuid) -> ModelResult<Self> {
        let counterparty = fold_counterparty(draft.kind, draft.customer_id, draft.vendor_id)?;
        check_lines(&draft.products)?;
        let notes = check_notes(draft.notes)?;

        let now = Utc::now();
        let mut tx = Self {
            id: Uuid::new_v4(),
            counterparty,
            lines: draft.products,
            total_amount: 0.0,
            date: draft.date.unwrap_or(now),
            business_id,
            notes,
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tx.recompute_total();
        Ok(tx)
    }

    /// The transaction kind, derived from the counterparty.
    pub fn kind(&self) -> TransactionKind {
        self.counterparty.kind()
    }

    /// Recompute `total_amount` as the sum of line subtotals.
    ///
    /// Runs on every write path. An empty line list yields 0.0; a
    /// caller-supplied total is never trusted.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.lines.iter().map(LineItem::subtotal).sum();
    }

    /// Move the transaction to a new lifecycle state.
    pub fn set_status(&mut self, status: TransactionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Fold the flat wire fields into the tagged counterparty, rejecting the
/// combinations the wire format can still express.
fn fold_counterparty(
    kind: TransactionKind,
    customer_id: Option<Uuid>,
    vendor_id: Option<Uuid>,
) -> ModelResult<Counterparty> {
    match kind {
        TransactionKind::Sale => customer_id.map(Counterparty::Customer).ok_or_else(|| {
            ModelError::CounterpartyMismatch(ConstraintViolation::new(
                "customerId",
                "Valid customer ID is required for sales",
            ))
        }),
        TransactionKind::Purchase => vendor_id.map(Counterparty::Vendor).ok_or_else(|| {
            ModelError::CounterpartyMismatch(ConstraintViolation::new(
                "vendorId",
                "Valid vendor ID is required for purchases",
            ))
        }),
    }
}

fn check_lines(lines: &[LineItem]) -> ModelResult<()> {
    for (i, line) in lines.iter().enumerate() {
        if line.quantity < 1 {
            return Err(ModelError::constraint(
                format!("products[{i}].quantity"),
                "Quantity must be at least 1",
            ));
        }
        if line.price < 0.0 {
            return Err(ModelError::constraint(
                format!("products[{i}].price"),
                "Price cannot be negative",
            ));
        }
    }
    Ok(())
}

fn check_notes(notes: Option<String>) -> ModelResult<Option<String>> {
    let notes = notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    if let Some(notes) = &notes {
        if notes.chars().count() > 500 {
            return Err(ModelError::constraint(
                "notes",
                "Notes cannot exceed 500 characters",
            ));
        }
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, price: f64) -> LineItem {
        LineItem {
            product_id: Uuid::new_v4(),
            quantity,
            price,
        }
    }

    fn sale_draft(lines: Vec<LineItem>) -> TransactionDraft {
        TransactionDraft {
            kind: TransactionKind::Sale,
            customer_id: Some(Uuid::new_v4()),
            vendor_id: None,
            products: lines,
            total_amount: None,
            date: None,
            notes: None,
            status: None,
        }
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let tx = Transaction::create(sale_draft(vec![line(2, 10.0), line(3, 1.5)]), Uuid::new_v4())
            .unwrap();
        assert_eq!(tx.total_amount, 24.5);
    }

    #[test]
    fn test_submitted_total_is_discarded() {
        let mut draft = sale_draft(vec![line(2, 10.0)]);
        draft.total_amount = Some(999.0);
        let tx = Transaction::create(draft, Uuid::new_v4()).unwrap();
        assert_eq!(tx.total_amount, 20.0);
    }

    #[test]
    fn test_empty_lines_total_is_zero() {
        // The validated write path never reaches here with no lines, but an
        // internal caller must not be able to smuggle a total in either.
        let mut draft = sale_draft(vec![]);
        draft.total_amount = Some(50.0);
        let tx = Transaction::create(draft, Uuid::new_v4()).unwrap();
        assert_eq!(tx.total_amount, 0.0);
    }

    #[test]
    fn test_sale_requires_customer() {
        let mut draft = sale_draft(vec![line(1, 1.0)]);
        draft.customer_id = None;
        let err = Transaction::create(draft, Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Valid customer ID is required for sales"
        );
    }

    #[test]
    fn test_purchase_requires_vendor() {
        let draft = TransactionDraft {
            kind: TransactionKind::Purchase,
            customer_id: Some(Uuid::new_v4()),
            vendor_id: None,
            products: vec![line(1, 1.0)],
            total_amount: None,
            date: None,
            notes: None,
            status: None,
        };
        let err = Transaction::create(draft, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.violation().unwrap().field, "vendorId");
    }

    #[test]
    fn test_kind_derived_from_counterparty() {
        let tx = Transaction::create(sale_draft(vec![line(1, 1.0)]), Uuid::new_v4()).unwrap();
        assert_eq!(tx.kind(), TransactionKind::Sale);
        assert!(tx.counterparty.customer_id().is_some());
        assert!(tx.counterparty.vendor_id().is_none());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err =
            Transaction::create(sale_draft(vec![line(0, 1.0)]), Uuid::new_v4()).unwrap_err();
        let v = err.violation().unwrap();
        assert_eq!(v.field, "products[0].quantity");
        assert_eq!(v.message, "Quantity must be at least 1");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Transaction::create(
            sale_draft(vec![line(1, 1.0), line(1, -0.01)]),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err.violation().unwrap().field, "products[1].price");
    }

    #[test]
    fn test_notes_over_500_rejected() {
        let mut draft = sale_draft(vec![line(1, 1.0)]);
        draft.notes = Some("n".repeat(501));
        let err = Transaction::create(draft, Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Notes cannot exceed 500 characters"
        );
    }

    #[test]
    fn test_status_defaults_to_completed() {
        let tx = Transaction::create(sale_draft(vec![line(1, 1.0)]), Uuid::new_v4()).unwrap();
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[test]
    fn test_date_defaults_to_creation_time() {
        let tx = Transaction::create(sale_draft(vec![line(1, 1.0)]), Uuid::new_v4()).unwrap();
        assert_eq!(tx.date, tx.created_at);
    }

    #[test]
    fn test_status_transition_bumps_updated() {
        let mut tx = Transaction::create(sale_draft(vec![line(1, 1.0)]), Uuid::new_v4()).unwrap();
        tx.set_status(TransactionStatus::Cancelled);
        assert_eq!(tx.status, TransactionStatus::Cancelled);
        assert!(tx.updated_at >= tx.created_at);
    }

    #[test]
    fn test_date_index_hint_descending() {
        let hints = Transaction::index_hints();
        assert!(hints
            .iter()
            .any(|h| h.fields == ["date"] && h.kind == IndexKind::Descending));
    }
}
