//! RAG Application Service (Use Case)
//!
//! Answers questions over the documents of a hosted vector store: one
//! thread and one run per question, polled until the run settles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use workwithtokens::domain::services::prompts::RAG_INSTRUCTIONS;
use workwithtokens::{AssistantBackend, AssistantSpec, DomainError, RagAnswer, RagUpload};

use crate::config::RagConfig;

const ASSISTANT_NAME: &str = "RAG Assistant";

/// Application service for retrieval-augmented answers
pub struct RagService<B: AssistantBackend> {
    backend: Arc<B>,
    vector_store_id: String,
    model: String,
    /// Created on first use unless configured
    assistant_id: OnceCell<String>,
    poll_interval: Duration,
    max_polls: u32,
}

impl<B: AssistantBackend> RagService<B> {
    pub fn new(
        backend: Arc<B>,
        vector_store_id: String,
        model: String,
        assistant_id: Option<String>,
        config: &RagConfig,
    ) -> Self {
        Self {
            backend,
            vector_store_id,
            model,
            assistant_id: OnceCell::new_with(assistant_id),
            poll_interval: config.poll_interval,
            max_polls: config.max_polls,
        }
    }

    async fn assistant_id(&self) -> Result<&str, DomainError> {
        let id = self
            .assistant_id
            .get_or_try_init(|| async {
                let spec = AssistantSpec {
                    name: ASSISTANT_NAME.to_string(),
                    model: self.model.clone(),
                    instructions: RAG_INSTRUCTIONS.to_string(),
                    vector_store_id: self.vector_store_id.clone(),
                };
                let id = self.backend.create_assistant(&spec).await?;
                tracing::info!("Created assistant {} over {}", id, self.vector_store_id);
                Ok::<_, DomainError>(id)
            })
            .await?;
        Ok(id.as_str())
    }

    /// Ask a question over the vector store
    pub async fn ask(&self, query: &str) -> Result<RagAnswer, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::Validation("Query is required".to_string()));
        }

        let assistant_id = self.assistant_id().await?;
        let thread_id = self.backend.create_thread().await?;
        self.backend.add_user_message(&thread_id, query).await?;
        let run_id = self.backend.create_run(&thread_id, assistant_id).await?;

        self.wait_for_run(&thread_id, &run_id).await?;

        let text = self
            .backend
            .latest_assistant_text(&thread_id)
            .await?
            .unwrap_or_default();

        Ok(RagAnswer::from_model_output(&text))
    }

    async fn wait_for_run(&self, thread_id: &str, run_id: &str) -> Result<(), DomainError> {
        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let status = self.backend.run_status(thread_id, run_id).await?;
            if status.is_completed() {
                tracing::debug!("Run {} completed after {} polls", run_id, attempt);
                return Ok(());
            }
            if status.is_fatal() {
                tracing::warn!("Run {} ended with {}", run_id, status);
                return Err(DomainError::external(format!("Run failed: {}", status)));
            }
        }

        // The remote run would otherwise keep going
        if let Err(e) = self.backend.cancel_run(thread_id, run_id).await {
            tracing::warn!("Failed to cancel run {}: {}", run_id, e);
        }

        Err(DomainError::external(format!(
            "Run did not complete after {} polls",
            self.max_polls
        )))
    }

    /// Upload a document and index it into the vector store
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<RagUpload, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::Validation("file is required".to_string()));
        }

        let file_id = self
            .backend
            .upload_file(file_name, content_type, bytes)
            .await?;
        let status = self
            .backend
            .attach_file(&self.vector_store_id, &file_id)
            .await?;
        let store = self.backend.vector_store(&self.vector_store_id).await?;

        tracing::info!(
            "Indexed {} into {} ({} files)",
            file_name,
            store.id,
            store.file_count
        );

        Ok(RagUpload {
            file_name: file_name.to_string(),
            vector_store_id: self.vector_store_id.clone(),
            file_count: store.file_count,
            status,
        })
    }
}
