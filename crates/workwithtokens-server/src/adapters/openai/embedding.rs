//! Embeddings adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use workwithtokens::{DomainError, EmbeddingService};

use super::OpenAiHttp;
use crate::adapters::http_error;

/// OpenAI embeddings via `/v1/embeddings`
pub struct OpenAiEmbeddingClient {
    http: OpenAiHttp,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingResponse {
    #[serde(default)]
    pub data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingData {
    pub embedding: Vec<f32>,
}

impl EmbeddingResponse {
    /// First vector, or an error naming the provider
    pub fn into_first(self, provider: &str) -> Result<Vec<f32>, DomainError> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::external(format!("No embedding returned by {provider}")))
    }
}

impl OpenAiEmbeddingClient {
    pub fn new(http: OpenAiHttp, model: String) -> Self {
        Self { http, model }
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .http
            .post("/v1/embeddings")
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        if !response.status().is_success() {
            return Err(http_error::from_response(response, "OpenAI embedding failed").await);
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        body.into_first("OpenAI")
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
