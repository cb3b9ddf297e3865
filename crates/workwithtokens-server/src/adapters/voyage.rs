//! Voyage AI embeddings adapter (served as the "nomic" endpoint)

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use workwithtokens::{DomainError, EmbeddingService};

use super::http_error;
use super::openai::EmbeddingResponse;

const DEFAULT_BASE_URL: &str = "https://api.voyageai.com";

pub struct VoyageEmbeddingClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

impl VoyageEmbeddingClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl EmbeddingService for VoyageEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("Voyage", e))?;

        if !response.status().is_success() {
            return Err(http_error::from_response(response, "Voyage embedding failed").await);
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| http_error::from_reqwest("Voyage", e))?;

        body.into_first("Voyage")
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_input_is_sent_as_array() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/embeddings")
                    .header("authorization", "Bearer pa-test")
                    .json_body(json!({"model": "voyage-3", "input": ["hello world"]}));
                then.status(200).json_body(json!({
                    "object": "list",
                    "data": [{"object": "embedding", "embedding": [0.1, 0.2], "index": 0}],
                    "model": "voyage-3",
                    "usage": {"total_tokens": 2}
                }));
            })
            .await;

        let client = VoyageEmbeddingClient::new("pa-test".to_string(), "voyage-3".to_string())
            .with_base_url(server.base_url());
        let vector = client.embed("hello world").await.unwrap();

        mock.assert_async().await;
        assert_eq!(vector.len(), 2);
        assert_eq!(client.model_id(), "voyage-3");
    }

    #[tokio::test]
    async fn test_unauthorized_is_external_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(401).json_body(json!({"detail": "Provided API key is invalid."}));
            })
            .await;

        let client = VoyageEmbeddingClient::new("bad".to_string(), "voyage-3".to_string())
            .with_base_url(server.base_url());
        let err = client.embed("x").await.unwrap_err();
        assert_eq!(err.to_string(), "External service error: Voyage embedding failed");
    }
}
