//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod anthropic;
pub mod http_error;
pub mod openai;
pub mod postgres;
pub mod tokenizer;
pub mod voyage;

// Re-exports
pub use anthropic::AnthropicClient;
pub use openai::{
    OpenAiAssistantsClient, OpenAiChatClient, OpenAiEmbeddingClient, OpenAiHttp,
    OpenAiResponsesClient,
};
pub use postgres::PgUserRepository;
pub use tokenizer::TiktokenCounter;
pub use voyage::VoyageEmbeddingClient;
