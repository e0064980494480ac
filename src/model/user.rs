//! # User Entity
//!
//! The account owning a business. A user's id doubles as the `business_id`
//! scoping every other entity. Passwords are stored as Argon2id hashes and
//! never serialized; sessions and tokens belong to the surrounding
//! framework, not this layer.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::validation::email_pattern;

use super::errors::{ModelError, ModelResult};

/// User entity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// 3..=30 chars, alphanumeric and underscore
    pub username: String,
    /// Lowercased, trimmed
    pub email: String,
    /// Argon2id hash, never plaintext
    pub password_hash: String,
    /// Trimmed, 1..=100 chars
    pub business_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup payload, deserialized after the validation chain passed.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "businessName")]
    pub business_name: String,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl User {
    /// Build a new user from a signup draft, enforcing field constraints and
    /// hashing the password.
    pub fn create(draft: SignupDraft) -> ModelResult<Self> {
        let username = draft.username.trim().to_string();
        let len = username.chars().count();
        if !(3..=30).contains(&len) {
            return Err(ModelError::constraint(
                "username",
                "Username must be between 3 and 30 characters",
            ));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ModelError::constraint(
                "username",
                "Username can only contain letters, numbers, and underscores",
            ));
        }

        let email = draft.email.trim().to_lowercase();
        if !email_pattern().is_match(&email) {
            return Err(ModelError::constraint("email", "Please enter a valid email"));
        }

        if draft.password.chars().count() < 6 {
            return Err(ModelError::constraint(
                "password",
                "Password must be at least 6 characters long",
            ));
        }

        let business_name = draft.business_name.trim().to_string();
        let name_len = business_name.chars().count();
        if !(1..=100).contains(&name_len) {
            return Err(ModelError::constraint(
                "businessName",
                "Business name must be between 1 and 100 characters",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: hash_password(&draft.password)?,
            business_name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a candidate password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    /// The tenancy boundary value for entities owned by this user.
    pub fn business_id(&self) -> Uuid {
        self.id
    }
}

/// Hash a password with Argon2id and a fresh salt.
fn hash_password(password: &str) -> ModelResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ModelError::HashingFailed)
}

/// Verify a password against its stored hash. A malformed hash verifies as
/// false rather than erroring; the caller treats it as bad credentials.
fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SignupDraft {
        SignupDraft {
            username: "ada_01".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "secret123".to_string(),
            business_name: "Analytical Engines".to_string(),
        }
    }

    #[test]
    fn test_create_normalizes_email() {
        let user = User::create(draft()).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.business_id(), user.id);
    }

    #[test]
    fn test_password_stored_hashed() {
        let user = User::create(draft()).unwrap();
        assert_ne!(user.password_hash, "secret123");
        assert!(user.verify_password("secret123"));
        assert!(!user.verify_password("wrong"));
    }

    #[test]
    fn test_username_boundary() {
        let mut d = draft();
        d.username = "ab".to_string();
        assert!(User::create(d).is_err());

        let mut d = draft();
        d.username = "abc".to_string();
        assert!(User::create(d).is_ok());
    }

    #[test]
    fn test_username_charset() {
        let mut d = draft();
        d.username = "ada lovelace".to_string();
        let err = User::create(d).unwrap_err();
        assert_eq!(
            err.violation().unwrap().message,
            "Username can only contain letters, numbers, and underscores"
        );
    }

    #[test]
    fn test_short_password_rejected() {
        let mut d = draft();
        d.password = "12345".to_string();
        let err = User::create(d).unwrap_err();
        assert_eq!(err.violation().unwrap().field, "password");
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }
}
