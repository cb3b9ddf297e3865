//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn external<T: Into<String>>(message: T) -> Self {
        Self::ExternalService(message.into())
    }
}

/// Errors raised by vector math
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("Vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

impl From<VectorError> for DomainError {
    fn from(err: VectorError) -> Self {
        DomainError::Validation(err.to_string())
    }
}
