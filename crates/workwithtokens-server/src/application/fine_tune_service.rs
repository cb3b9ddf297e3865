//! Fine-tune Application Service (Use Case)

use std::sync::Arc;

use workwithtokens::domain::services::reply::extract_json_object;
use workwithtokens::{DomainError, FineTuneAnswer};

use crate::adapters::OpenAiResponsesClient;

/// Queries the fine-tuned translation model
pub struct FineTuneService {
    client: Arc<OpenAiResponsesClient>,
    model: String,
}

impl FineTuneService {
    pub fn new(client: Arc<OpenAiResponsesClient>, model: String) -> Self {
        Self { client, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn ask(&self, query: &str) -> Result<FineTuneAnswer, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::Validation("query should not be empty".to_string()));
        }

        let raw = self.client.create(&self.model, query).await?;
        tracing::info!("Fine-tuned model answered with {} chars", raw.len());

        parse_answer(&raw)
    }
}

fn parse_answer(raw: &str) -> Result<FineTuneAnswer, DomainError> {
    let json = extract_json_object(raw).unwrap_or(raw);
    serde_json::from_str(json).map_err(|e| {
        tracing::warn!("Fine-tuned model returned unexpected output: {}", raw);
        DomainError::external(format!("Invalid JSON returned: {e}"))
    })
}
