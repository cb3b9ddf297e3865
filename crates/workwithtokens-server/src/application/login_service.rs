//! Login Application Service (Use Case)
//!
//! Registration and credential checks over the user repository.

use std::sync::Arc;

use workwithtokens::domain::validate_registration;
use workwithtokens::{DomainError, NewUser, User, UserRepository};

use crate::auth::{hash_password, verify_password, JwtManager};

/// Outcome of a login attempt
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated { user: User, access_token: String },
    InvalidCredentials,
}

/// Application service for login operations
pub struct LoginService<R: UserRepository> {
    repo: Arc<R>,
    jwt: Arc<JwtManager>,
}

impl<R: UserRepository> LoginService<R> {
    pub fn new(repo: Arc<R>, jwt: Arc<JwtManager>) -> Self {
        Self { repo, jwt }
    }

    /// Check credentials and issue an access token.
    ///
    /// Unknown users and wrong passwords are an outcome, not an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        tracing::info!("Login attempt for username: {}", username);

        let user = match self.repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed: User not found - {}", username);
                return Ok(LoginOutcome::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            tracing::warn!("Login failed: Invalid password for user - {}", username);
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let access_token = self
            .jwt
            .issue_token(user.id, &user.username)
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::info!("Login successful for user: {}", username);
        Ok(LoginOutcome::Authenticated { user, access_token })
    }

    /// Create a user with a hashed password
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let username = username.trim();
        validate_registration(username, password)?;

        if self.repo.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        self.repo.create(&NewUser::new(username, password_hash)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct InMemoryUsers {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(DomainError::Conflict("Username already exists".to_string()));
            }
            let created = User {
                id: users.len() as i32 + 1,
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            users.push(created.clone());
            Ok(created)
        }
    }

    fn jwt() -> Arc<JwtManager> {
        Arc::new(JwtManager::new(&JwtConfig {
            secret: "test-secret".to_string(),
            ttl: Duration::from_secs(60),
            uses_default_secret: false,
        }))
    }

    fn service() -> LoginService<InMemoryUsers> {
        LoginService::new(Arc::new(InMemoryUsers::default()), jwt())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let user = service.register("testuser", "password123").await.unwrap();
        assert_ne!(user.password_hash, "password123");

        match service.login("testuser", "password123").await.unwrap() {
            LoginOutcome::Authenticated { user: logged_in, access_token } => {
                assert_eq!(logged_in.id, user.id);
                let claims = service.jwt.verify(&access_token).unwrap();
                assert_eq!(claims.sub, user.id);
                assert_eq!(claims.username, "testuser");
            }
            LoginOutcome::InvalidCredentials => panic!("expected a token"),
        }
    }

    #[tokio::test]
    async fn test_wrong_password_is_not_an_error() {
        let service = service();
        service.register("testuser", "password123").await.unwrap();

        let outcome = service.login("testuser", "nope").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let outcome = service().login("ghost", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = service();
        service.register("testuser", "a").await.unwrap();
        let err = service.register("testuser", "b").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_stores_trimmed_username() {
        let service = service();
        let user = service.register("  alice ", "password123").await.unwrap();
        assert_eq!(user.username, "alice");

        let err = service.register("alice", "other").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let outcome = service.login("alice", "password123").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Authenticated { .. }));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let err = service().register("", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
