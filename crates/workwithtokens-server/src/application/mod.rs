//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod chat_service;
mod embedding_service;
mod fine_tune_service;
mod login_service;
mod rag_service;

pub use chat_service::{validate_request as validate_chat_request, ChatService};
pub use embedding_service::VectorService;
pub use fine_tune_service::FineTuneService;
pub use login_service::{LoginOutcome, LoginService};
pub use rag_service::RagService;
