//! # API Errors
//!
//! Error type shared by every handler, with the status mapping and JSON
//! rendering in one place. Validation failures keep their own structured
//! body; everything else renders as `{success:false, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::model::ModelError;
use crate::store::StoreError;
use crate::validation::{FieldError, ValidationError};

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// A rule chain rejected the payload
    #[error("Validation failed")]
    Validation(#[from] ValidationError),

    /// The model rejected the document at write time
    #[error("Validation failed")]
    Model(ModelError),

    /// Body deserialization failed after validation (shape mismatch)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Tenancy header absent
    #[error("Business context is required")]
    MissingBusiness,

    /// Tenancy header malformed
    #[error("Invalid business ID")]
    InvalidBusiness,

    /// Bad credentials on login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No document in scope
    #[error("Record not found")]
    NotFound,

    /// Unique-email conflict on signup
    #[error("Email is already registered")]
    EmailExists,

    /// Store failure
    #[error("Internal error")]
    Internal(String),
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::HashingFailed => ApiError::Internal("password hashing failed".to_string()),
            other => ApiError::Model(other),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailExists => ApiError::EmailExists,
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::Model(_)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidBusiness
            | ApiError::EmailExists => StatusCode::BAD_REQUEST,
            ApiError::MissingBusiness | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            // Chains carry their own error list.
            ApiError::Validation(err) => json!({
                "success": false,
                "message": "Validation failed",
                "errors": err.errors,
            }),
            // Model violations use the same structured shape, one entry.
            ApiError::Model(err) => {
                let errors: Vec<FieldError> = err
                    .violation()
                    .map(|v| vec![FieldError::new(v.field.clone(), v.message.clone())])
                    .unwrap_or_default();
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                })
            }
            other => json!({
                "success": false,
                "message": other.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_status_mapping() {
        let v = ApiError::Validation(ValidationError::single("name", "Contact name is required"));
        assert_eq!(v.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MissingBusiness.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            ApiError::from(StoreError::EmailExists),
            ApiError::EmailExists
        ));
        assert!(matches!(
            ApiError::from(StoreError::NotFound),
            ApiError::NotFound
        ));
    }

    #[test]
    fn test_model_violation_keeps_field() {
        let err = ApiError::from(ModelError::constraint(
            "notes",
            "Notes cannot exceed 500 characters",
        ));
        match err {
            ApiError::Model(m) => {
                assert_eq!(m.violation().unwrap().field, "notes");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
