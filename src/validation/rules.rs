//! # Field Predicates
//!
//! Building blocks for the rule chains: predicate collectors over a raw JSON
//! body ([`BodyChain`]) and over string query parameters ([`QueryChain`]).
//! Every predicate appends to the collector on failure and never
//! short-circuits its siblings.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{FieldError, ValidationError};

/// Email shape check. Matches the legacy pattern: word runs separated by
/// single dots or dashes, a two-or-three letter final label.
pub fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
    })
}

/// Username charset: letters, numbers, underscores.
pub fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern compiles"))
}

/// Predicate collector over a JSON request body.
pub struct BodyChain<'a> {
    body: &'a Value,
    errors: Vec<FieldError>,
}

impl<'a> BodyChain<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self {
            body,
            errors: Vec::new(),
        }
    }

    /// Consume the chain: `Ok` iff no predicate failed.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }

    fn fail(&mut self, field: impl Into<String>, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    fn str_value(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Required string whose length is within `min..=max`.
    pub fn require_length(&mut self, field: &str, min: usize, max: usize, message: &str) {
        match self.str_value(field) {
            Some(s) if (min..=max).contains(&s.chars().count()) => {}
            _ => self.fail(field, message),
        }
    }

    /// Optional string capped at `max` characters.
    pub fn optional_max_length(&mut self, field: &str, max: usize, message: &str) {
        if let Some(value) = self.get(field) {
            match value.as_str() {
                Some(s) if s.chars().count() <= max => {}
                _ => self.fail(field, message),
            }
        }
    }

    /// Required string matching `pattern`.
    pub fn require_pattern(&mut self, field: &str, pattern: &Regex, message: &str) {
        match self.str_value(field) {
            Some(s) if pattern.is_match(s) => {}
            _ => self.fail(field, message),
        }
    }

    /// Required syntactically valid email (checked trimmed and lowercased,
    /// matching the normalization applied downstream).
    pub fn require_email(&mut self, field: &str, message: &str) {
        match self.str_value(field) {
            Some(s) if email_pattern().is_match(&s.trim().to_lowercase()) => {}
            _ => self.fail(field, message),
        }
    }

    /// Optional email; absent values pass.
    pub fn optional_email(&mut self, field: &str, message: &str) {
        if let Some(value) = self.get(field) {
            match value.as_str() {
                Some(s) if email_pattern().is_match(&s.trim().to_lowercase()) => {}
                _ => self.fail(field, message),
            }
        }
    }

    /// Required string with non-whitespace content.
    pub fn require_non_empty(&mut self, field: &str, message: &str) {
        match self.str_value(field) {
            Some(s) if !s.trim().is_empty() => {}
            _ => self.fail(field, message),
        }
    }

    /// Required string drawn from `allowed`.
    pub fn require_one_of(&mut self, field: &str, allowed: &[&str], message: &str) {
        match self.str_value(field) {
            Some(s) if allowed.contains(&s) => {}
            _ => self.fail(field, message),
        }
    }

    /// Optional string drawn from `allowed`.
    pub fn optional_one_of(&mut self, field: &str, allowed: &[&str], message: &str) {
        if let Some(value) = self.get(field) {
            match value.as_str() {
                Some(s) if allowed.contains(&s) => {}
                _ => self.fail(field, message),
            }
        }
    }

    /// Required JSON integer (floats do not coerce) of at least `min`.
    pub fn require_int_min(&mut self, field: &str, min: i64, message: &str) {
        match self.get(field) {
            Some(v) if !v.is_f64() && v.as_i64().is_some_and(|n| n >= min) => {}
            _ => self.fail(field, message),
        }
    }

    /// Required JSON number of at least `min` (integers coerce to float).
    pub fn require_float_min(&mut self, field: &str, min: f64, message: &str) {
        match self.get(field).and_then(Value::as_f64) {
            Some(n) if n >= min => {}
            _ => self.fail(field, message),
        }
    }

    /// Required entity-reference identifier.
    pub fn require_reference(&mut self, field: &str, message: &str) {
        match self.str_value(field) {
            Some(s) if Uuid::parse_str(s).is_ok() => {}
            _ => self.fail(field, message),
        }
    }

    /// Entity-reference identifier required only when `cond_field` holds the
    /// string `cond_value`; otherwise the field is ignored entirely.
    pub fn require_reference_if_eq(
        &mut self,
        cond_field: &str,
        cond_value: &str,
        field: &str,
        message: &str,
    ) {
        if self.str_value(cond_field) == Some(cond_value) {
            self.require_reference(field, message);
        }
    }

    /// Required non-empty array. Returns the elements when the shape holds so
    /// the caller can run per-element predicates.
    pub fn require_non_empty_array(&mut self, field: &str, message: &str) -> Option<&'a [Value]> {
        match self.get(field).and_then(Value::as_array) {
            Some(items) if !items.is_empty() => Some(items),
            _ => {
                self.fail(field, message);
                None
            }
        }
    }

    /// Run predicates against one element of an array field, with
    /// `field[index].name` error paths.
    pub fn element(&mut self, field: &str, index: usize, item: &'a Value) -> ElementChain<'a, '_> {
        ElementChain {
            prefix: format!("{field}[{index}]"),
            item,
            errors: &mut self.errors,
        }
    }
}

/// Predicate collector scoped to one array element.
pub struct ElementChain<'a, 'c> {
    prefix: String,
    item: &'a Value,
    errors: &'c mut Vec<FieldError>,
}

impl ElementChain<'_, '_> {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .push(FieldError::new(format!("{}.{field}", self.prefix), message));
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.item.get(field).filter(|v| !v.is_null())
    }

    pub fn require_reference(&mut self, field: &str, message: &str) {
        match self.get(field).and_then(Value::as_str) {
            Some(s) if Uuid::parse_str(s).is_ok() => {}
            _ => self.fail(field, message),
        }
    }

    pub fn require_int_min(&mut self, field: &str, min: i64, message: &str) {
        match self.get(field) {
            Some(v) if !v.is_f64() && v.as_i64().is_some_and(|n| n >= min) => {}
            _ => self.fail(field, message),
        }
    }

    pub fn require_float_min(&mut self, field: &str, min: f64, message: &str) {
        match self.get(field).and_then(Value::as_f64) {
            Some(n) if n >= min => {}
            _ => self.fail(field, message),
        }
    }
}

/// Predicate collector over string query parameters.
pub struct QueryChain<'a> {
    params: &'a HashMap<String, String>,
    errors: Vec<FieldError>,
}

impl<'a> QueryChain<'a> {
    pub fn new(params: &'a HashMap<String, String>) -> Self {
        Self {
            params,
            errors: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    fn get(&self, field: &str) -> Option<&'a str> {
        self.params.get(field).map(String::as_str)
    }

    /// Optional ISO-8601 instant or calendar date.
    pub fn optional_iso8601(&mut self, field: &str, message: &str) -> Option<DateTime<Utc>> {
        let raw = self.get(field)?;
        match parse_iso8601(raw) {
            Some(instant) => Some(instant),
            None => {
                self.fail(field, message);
                None
            }
        }
    }

    /// Optional value drawn from `allowed`.
    pub fn optional_one_of(&mut self, field: &str, allowed: &[&str], message: &str) -> Option<&'a str> {
        let raw = self.get(field)?;
        if allowed.contains(&raw) {
            Some(raw)
        } else {
            self.fail(field, message);
            None
        }
    }

    /// Optional integer within `min..=max` (numeric strings, as query
    /// parameters always arrive as text).
    pub fn optional_int_range(
        &mut self,
        field: &str,
        min: i64,
        max: i64,
        message: &str,
    ) -> Option<i64> {
        let raw = self.get(field)?;
        match raw.parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => Some(n),
            _ => {
                self.fail(field, message);
                None
            }
        }
    }
}

/// Parse an ISO-8601 value: RFC 3339 instants and bare calendar dates (taken
/// as midnight UTC) both pass.
fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_pattern_accepts_common_shapes() {
        let p = email_pattern();
        assert!(p.is_match("a@b.co"));
        assert!(p.is_match("first.last@sub.example.com"));
        assert!(p.is_match("a-b@c-d.org"));
        assert!(!p.is_match("no-at-sign"));
        assert!(!p.is_match("a@@b.co"));
        assert!(!p.is_match("a@b"));
    }

    #[test]
    fn test_all_failures_collected() {
        let body = json!({});
        let mut chain = BodyChain::new(&body);
        chain.require_length("name", 1, 100, "Name required");
        chain.require_one_of("type", &["customer", "vendor"], "Bad type");
        let err = chain.finish().unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_optional_skips_missing_and_null() {
        let body = json!({ "phone": null });
        let mut chain = BodyChain::new(&body);
        chain.optional_max_length("phone", 20, "too long");
        chain.optional_max_length("address", 200, "too long");
        assert!(chain.finish().is_ok());
    }

    #[test]
    fn test_int_predicate_rejects_float() {
        let body = json!({ "stock": 2.5 });
        let mut chain = BodyChain::new(&body);
        chain.require_int_min("stock", 0, "Stock must be a non-negative integer");
        assert!(chain.finish().is_err());
    }

    #[test]
    fn test_float_predicate_accepts_integer() {
        let body = json!({ "price": 10 });
        let mut chain = BodyChain::new(&body);
        chain.require_float_min("price", 0.0, "Price must be a positive number");
        assert!(chain.finish().is_ok());
    }

    #[test]
    fn test_conditional_reference_only_fires_on_match() {
        let body = json!({ "type": "purchase" });
        let mut chain = BodyChain::new(&body);
        chain.require_reference_if_eq("type", "sale", "customerId", "customer required");
        assert!(chain.finish().is_ok());

        let body = json!({ "type": "sale" });
        let mut chain = BodyChain::new(&body);
        chain.require_reference_if_eq("type", "sale", "customerId", "customer required");
        assert!(chain.finish().is_err());
    }

    #[test]
    fn test_element_paths_are_indexed() {
        let body = json!({ "products": [{ "quantity": 0 }] });
        let mut chain = BodyChain::new(&body);
        if let Some(items) = chain.require_non_empty_array("products", "need products") {
            for (i, item) in items.iter().enumerate() {
                let mut el = chain.element("products", i, item);
                el.require_int_min("quantity", 1, "Quantity must be at least 1");
            }
        }
        let err = chain.finish().unwrap_err();
        assert_eq!(err.errors[0].field, "products[0].quantity");
    }

    #[test]
    fn test_query_int_range_boundaries() {
        let mut params = HashMap::new();
        params.insert("limit".to_string(), "100".to_string());
        let mut chain = QueryChain::new(&params);
        assert_eq!(chain.optional_int_range("limit", 1, 100, "bad"), Some(100));
        assert!(chain.finish().is_ok());

        let mut params = HashMap::new();
        params.insert("limit".to_string(), "150".to_string());
        let mut chain = QueryChain::new(&params);
        assert_eq!(chain.optional_int_range("limit", 1, 100, "bad"), None);
        assert!(chain.finish().is_err());
    }

    #[test]
    fn test_iso8601_accepts_dates_and_instants() {
        assert!(parse_iso8601("2024-03-01").is_some());
        assert!(parse_iso8601("2024-03-01T10:30:00Z").is_some());
        assert!(parse_iso8601("March 1st").is_none());
    }
}
