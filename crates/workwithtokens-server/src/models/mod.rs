//! WorkWithTokens Data Models
//!
//! - Chat: Structured answers, model settings, cost estimates
//! - Embedding: Vectors and word comparison
//! - RAG: Answers over the vector store, document upload
//! - Fine-tune: Translation schema
//! - Login: Credentials and tokens

mod chat;
mod embedding;
mod fine_tune;
mod login;
mod rag;

pub use chat::*;
pub use embedding::*;
pub use fine_tune::*;
pub use login::*;
pub use rag::*;
