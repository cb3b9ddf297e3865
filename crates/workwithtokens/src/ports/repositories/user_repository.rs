//! User Repository Port
//!
//! Abstract interface for User persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, NewUser, User};

/// Repository interface for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a User by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new User.
    ///
    /// Fails with `DomainError::Conflict` when the username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}
