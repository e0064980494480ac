//! # Model Errors
//!
//! Constraint violations raised by the entity write paths. Every violation
//! names the offending field and carries a client-facing message; the write
//! aborts on the first violation in declaration order.

use std::fmt;

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// A single field-level constraint failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Field path (e.g. `products[0].quantity`)
    pub field: String,
    /// Client-facing message
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by entity constructors and update paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A field constraint was violated at write time
    #[error("constraint violated: {0}")]
    Constraint(ConstraintViolation),

    /// The counterparty reference does not match the transaction type
    #[error("constraint violated: {0}")]
    CounterpartyMismatch(ConstraintViolation),

    /// Password hashing failed (never carries the password)
    #[error("password hashing failed")]
    HashingFailed,
}

impl ModelError {
    /// Constraint-violation constructor used throughout the entity checks.
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        ModelError::Constraint(ConstraintViolation::new(field, message))
    }

    /// Returns the violated field and message, if this error carries one.
    pub fn violation(&self) -> Option<&ConstraintViolation> {
        match self {
            ModelError::Constraint(v) | ModelError::CounterpartyMismatch(v) => Some(v),
            ModelError::HashingFailed => None,
        }
    }
}
