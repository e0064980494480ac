//! # Validation Errors
//!
//! The structured failure object shared by every rule chain.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One failed predicate: the offending field and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Aggregate failure of a rule chain. Always carries at least one entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Validation failed")]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// Single-error convenience used by the id-parameter check.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "errors": self.errors,
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_body_shape() {
        let err = ValidationError::new(vec![
            FieldError::new("name", "Contact name is required"),
            FieldError::new("type", "Type must be either customer or vendor"),
        ]);

        let body = json!({
            "success": false,
            "message": "Validation failed",
            "errors": err.errors,
        });

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["errors"][1]["message"], "Type must be either customer or vendor");
    }

    #[test]
    fn test_single_shorthand() {
        let err = ValidationError::single("id", "Invalid id");
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "id");
    }
}
