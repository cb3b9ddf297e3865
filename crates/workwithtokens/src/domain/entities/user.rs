//! User - The only persisted entity
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Maximum username length (matches the column width)
pub const MAX_USERNAME_LEN: usize = 50;

/// User - a login identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Check registration input before hashing anything
pub fn validate_registration(username: &str, password: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::Validation(format!(
            "Username must not exceed {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if password.is_empty() {
        return Err(DomainError::Validation("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_regular_input() {
        assert!(validate_registration("testuser", "password123").is_ok());
    }

    #[test]
    fn test_rejects_blank_username() {
        assert!(matches!(
            validate_registration("   ", "pw"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_long_username() {
        let name = "x".repeat(MAX_USERNAME_LEN + 1);
        assert!(validate_registration(&name, "pw").is_err());
        let name = "x".repeat(MAX_USERNAME_LEN);
        assert!(validate_registration(&name, "pw").is_ok());
    }

    #[test]
    fn test_rejects_empty_password() {
        assert!(validate_registration("testuser", "").is_err());
    }
}
