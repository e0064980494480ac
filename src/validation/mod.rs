//! # Validation Rule Chains
//!
//! Per-endpoint ordered field predicates over raw request payloads. Every
//! predicate in a chain runs (no short-circuit between fields); failures are
//! collected and the chain fails as a whole iff at least one predicate
//! failed.
//!
//! Failure renders as HTTP 400 with the body
//! `{"success":false,"message":"Validation failed","errors":[{field,message}]}`.
//! On success a chain produces nothing and the handler proceeds.

mod chains;
mod errors;
mod rules;

pub use chains::{
    validate_contact, validate_id_param, validate_login, validate_product, validate_report_query,
    validate_transaction, validate_user, ReportQuery,
};
pub use errors::{FieldError, ValidationError};
pub use rules::{email_pattern, username_pattern, BodyChain, QueryChain};
