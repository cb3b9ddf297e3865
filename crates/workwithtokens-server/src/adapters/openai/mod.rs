//! OpenAI adapters
//!
//! - `chat`: Chat Completions (LlmProvider)
//! - `embedding`: Embeddings (EmbeddingService)
//! - `assistants`: Assistants, Threads, Files and Vector Stores (AssistantBackend)
//! - `responses`: Responses API for the fine-tuned model

mod assistants;
mod chat;
mod embedding;
mod responses;

pub use assistants::OpenAiAssistantsClient;
pub use chat::OpenAiChatClient;
pub use embedding::OpenAiEmbeddingClient;
pub(crate) use embedding::EmbeddingResponse;
pub use responses::OpenAiResponsesClient;

use reqwest::{Client, RequestBuilder};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Connection shared by the OpenAI clients
#[derive(Clone)]
pub struct OpenAiHttp {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiHttp {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Point the clients at another host (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
    }
}
