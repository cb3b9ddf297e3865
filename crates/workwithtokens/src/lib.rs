//! WorkWithTokens Domain Library
//!
//! Core domain types and interfaces for the WorkWithTokens playground:
//! prompting LLM providers with token accounting, embeddings and similarity,
//! and retrieval-augmented answers over a hosted vector store.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (User, ChatAnswer, RagAnswer, ...)
//!   - `value_objects/`: Immutable value types (ChatProvider, EmbeddingProvider)
//!   - `services/`: Pure functions (vector math, reply parsing, pricing, prompts)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use workwithtokens::domain::services::vector::cosine_similarity;
//! use workwithtokens::ports::{EmbeddingService, LlmProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ChatAnswer, ChatProvider, DomainError, EmbeddingProvider, FineTuneAnswer, ModelSettings,
    NewUser, RagAnswer, RagUpload, RunStatus, TokenCounts, User, VectorError,
    VectorStoreSnapshot,
};
pub use ports::{
    // Provider services
    AssistantBackend,
    AssistantSpec,
    ChatMessage,
    CompletionOptions,
    CompletionResponse,
    EmbeddingService,
    LlmProvider,
    MessageRole,
    TokenCounter,
    TokenUsage,
    // Repositories
    UserRepository,
};
