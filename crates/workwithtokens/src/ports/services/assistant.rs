//! Assistant Backend Port
//!
//! Hosted assistant with file search: the remote objects (assistants,
//! threads, runs, files, vector stores) are owned by the provider and only
//! referenced here by id.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, RunStatus, VectorStoreSnapshot};

/// What the assistant is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSpec {
    pub name: String,
    pub model: String,
    pub instructions: String,
    pub vector_store_id: String,
}

/// Hosted assistant / vector store API
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Create an assistant and return its id
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, DomainError>;

    /// Create an empty thread and return its id
    async fn create_thread(&self) -> Result<String, DomainError>;

    /// Append a user message to a thread
    async fn add_user_message(&self, thread_id: &str, content: &str) -> Result<(), DomainError>;

    /// Start a run of `assistant_id` over a thread and return the run id
    async fn create_run(&self, thread_id: &str, assistant_id: &str)
        -> Result<String, DomainError>;

    /// Current status of a run
    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus, DomainError>;

    /// Ask the provider to stop a run that is still queued or in progress
    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), DomainError>;

    /// Text of the newest assistant message in a thread, if any
    async fn latest_assistant_text(&self, thread_id: &str)
        -> Result<Option<String>, DomainError>;

    /// Upload a document for file search and return the file id
    async fn upload_file(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError>;

    /// Attach an uploaded file to a vector store; returns the file's indexing status
    async fn attach_file(&self, vector_store_id: &str, file_id: &str)
        -> Result<String, DomainError>;

    /// Current state of a vector store
    async fn vector_store(&self, vector_store_id: &str)
        -> Result<VectorStoreSnapshot, DomainError>;
}
