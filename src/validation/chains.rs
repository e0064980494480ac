//! # Endpoint Rule Chains
//!
//! One ordered chain per endpoint, mirroring the write paths: user signup,
//! login, product, contact, transaction, id path parameters, and the
//! transaction report query.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::model::TransactionKind;

use super::errors::ValidationError;
use super::rules::{username_pattern, BodyChain, QueryChain};

/// Signup payload rules.
pub fn validate_user(body: &Value) -> Result<(), ValidationError> {
    let mut chain = BodyChain::new(body);

    chain.require_length(
        "username",
        3,
        30,
        "Username must be between 3 and 30 characters",
    );
    chain.require_pattern(
        "username",
        username_pattern(),
        "Username can only contain letters, numbers, and underscores",
    );
    chain.require_email("email", "Please provide a valid email address");
    chain.require_length(
        "password",
        6,
        usize::MAX,
        "Password must be at least 6 characters long",
    );
    chain.require_length(
        "businessName",
        1,
        100,
        "Business name must be between 1 and 100 characters",
    );

    chain.finish()
}

/// Login payload rules.
pub fn validate_login(body: &Value) -> Result<(), ValidationError> {
    let mut chain = BodyChain::new(body);

    chain.require_email("email", "Please provide a valid email address");
    chain.require_non_empty("password", "Password is required");

    chain.finish()
}

/// Product payload rules.
pub fn validate_product(body: &Value) -> Result<(), ValidationError> {
    let mut chain = BodyChain::new(body);

    chain.require_length(
        "name",
        1,
        100,
        "Product name must be between 1 and 100 characters",
    );
    chain.optional_max_length("description", 500, "Description cannot exceed 500 characters");
    chain.require_float_min("price", 0.0, "Price must be a positive number");
    chain.require_int_min("stock", 0, "Stock must be a non-negative integer");
    chain.require_length(
        "category",
        1,
        50,
        "Category must be between 1 and 50 characters",
    );

    chain.finish()
}

/// Contact payload rules.
pub fn validate_contact(body: &Value) -> Result<(), ValidationError> {
    let mut chain = BodyChain::new(body);

    chain.require_length(
        "name",
        1,
        100,
        "Contact name must be between 1 and 100 characters",
    );
    chain.optional_max_length("phone", 20, "Phone number cannot exceed 20 characters");
    chain.optional_email("email", "Please provide a valid email address");
    chain.optional_max_length("address", 200, "Address cannot exceed 200 characters");
    chain.require_one_of(
        "type",
        &["customer", "vendor"],
        "Type must be either customer or vendor",
    );

    chain.finish()
}

/// Transaction payload rules, including the conditional counterparty
/// requirement and per-line checks.
pub fn validate_transaction(body: &Value) -> Result<(), ValidationError> {
    let mut chain = BodyChain::new(body);

    chain.require_one_of(
        "type",
        &["sale", "purchase"],
        "Type must be either sale or purchase",
    );
    chain.require_reference_if_eq(
        "type",
        "sale",
        "customerId",
        "Valid customer ID is required for sales",
    );
    chain.require_reference_if_eq(
        "type",
        "purchase",
        "vendorId",
        "Valid vendor ID is required for purchases",
    );

    if let Some(items) = chain.require_non_empty_array("products", "At least one product is required")
    {
        for (i, item) in items.iter().enumerate() {
            let mut line = chain.element("products", i, item);
            line.require_reference("productId", "Valid product ID is required");
            line.require_int_min("quantity", 1, "Quantity must be at least 1");
            line.require_float_min("price", 0.0, "Price must be a positive number");
        }
    }

    chain.optional_max_length("notes", 500, "Notes cannot exceed 500 characters");

    chain.finish()
}

/// Identifier path-parameter rule: the value must be a syntactically valid
/// entity reference. The message names the parameter, e.g. `Invalid id`.
pub fn validate_id_param(name: &str, value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| ValidationError::single(name, format!("Invalid {name}")))
}

/// Validated transaction report query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub kind: Option<TransactionKind>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ReportQuery {
    /// 1-based page, defaulting to the first.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Page size, defaulting to 20, capped at 100 by validation.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20)
    }
}

/// Report query-string rules. All parameters are optional; present ones must
/// be well-formed.
pub fn validate_report_query(
    params: &HashMap<String, String>,
) -> Result<ReportQuery, ValidationError> {
    let mut chain = QueryChain::new(params);

    let start_date =
        chain.optional_iso8601("startDate", "Start date must be a valid ISO 8601 date");
    let end_date = chain.optional_iso8601("endDate", "End date must be a valid ISO 8601 date");
    let kind = chain
        .optional_one_of(
            "type",
            &["sale", "purchase"],
            "Type must be either sale or purchase",
        )
        .map(|raw| match raw {
            "sale" => TransactionKind::Sale,
            _ => TransactionKind::Purchase,
        });
    let page = chain.optional_int_range("page", 1, i64::MAX, "Page must be a positive integer");
    let limit = chain.optional_int_range("limit", 1, 100, "Limit must be between 1 and 100");

    chain.finish()?;

    Ok(ReportQuery {
        start_date,
        end_date,
        kind,
        page,
        limit,
    })
}
