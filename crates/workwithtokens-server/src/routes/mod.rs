//! WorkWithTokens API Routes
//!
//! - /chat - Structured answers with token counts (Claude, OpenAI)
//! - /chat/model, /chat/pricing - Provider settings and cost estimates
//! - /embed - Embedding vectors and word similarity
//! - /rag - Questions over the vector store, document upload
//! - /ft - Fine-tuned translation model
//! - /login - Login and registration (public)

pub mod chat;
pub mod embedding;
pub mod fine_tune;
pub mod login;
pub mod rag;
pub mod swagger;

use axum::{extract::rejection::JsonRejection, http::StatusCode};
use workwithtokens::DomainError;

/// HTTP status for a domain error
pub fn domain_error(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("{}", e);
    }
    (status, e.to_string())
}

/// 400 for a body that is not the expected JSON object
pub fn bad_json(rejection: JsonRejection) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, rejection.body_text())
}

/// 503 for a feature whose provider is not configured
pub fn unavailable(what: &str) -> (StatusCode, String) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        format!("{} not available", what),
    )
}
