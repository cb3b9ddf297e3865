//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - User: Login identity (the only persisted entity)
//! - ChatAnswer: Structured LLM answer with token counts
//! - RagAnswer: Answer from the hosted file-search assistant
//! - FineTuneAnswer: Translation schema of the fine-tuned model

mod chat;
mod fine_tune;
mod rag;
mod user;

pub use chat::*;
pub use fine_tune::*;
pub use rag::*;
pub use user::*;
