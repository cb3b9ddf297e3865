//! WorkWithTokens API Client

use anyhow::{bail, Context, Result};
use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// API Client for the WorkWithTokens server
pub struct WwtClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// ============================================
// API Request / Response Types
// ============================================

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
    pub username: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    provider: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettingsResponse {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct EmbedResponse {
    pub length: usize,
    pub vector: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    word1: &'a str,
    word2: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    pub word1: String,
    pub word2: String,
    pub similarity: String,
    #[serde(rename = "similarityExplanation")]
    pub similarity_explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct RagResponse {
    pub query: String,
    pub answer: RagAnswer,
}

#[derive(Debug, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(rename = "fromData")]
    pub from_data: bool,
    #[serde(rename = "fromAI")]
    pub from_ai: bool,
    pub tokens: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagUploadResponse {
    pub file_name: String,
    pub vector_store_id: String,
    pub file_count: u64,
    pub status: String,
}

#[derive(Debug, Serialize)]
struct FineTuneRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTuneResponse {
    pub answer_in_english: String,
    pub answer_in_romanian: String,
    pub translate_to_hebrew: String,
    pub is_it_slang: bool,
}

impl WwtClient {
    /// Create a new API client
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token (when logged in), send, and decode the body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let resp = request
            .send()
            .await
            .context("Failed to connect to WorkWithTokens API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.send(
            self.client
                .post(self.url("/login"))
                .json(&Credentials { username, password }),
        )
        .await
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<RegisterResponse> {
        self.send(
            self.client
                .post(self.url("/login/register"))
                .json(&Credentials { username, password }),
        )
        .await
    }

    /// Structured answer plus token counts, as a flat JSON object
    pub async fn chat(&self, message: &str, provider: &str) -> Result<Map<String, Value>> {
        self.send(
            self.client
                .post(self.url("/chat"))
                .json(&ChatRequest { message, provider }),
        )
        .await
    }

    pub async fn model(&self, provider: &str) -> Result<ModelSettingsResponse> {
        let url = format!(
            "{}?provider={}",
            self.url("/chat/model"),
            urlencoding::encode(provider)
        );
        self.send(self.client.get(url)).await
    }

    pub async fn embed(&self, provider: &str, text: &str) -> Result<EmbedResponse> {
        self.send(
            self.client
                .post(self.url(&format!("/embed/{}", provider)))
                .json(&serde_json::json!({ "text": text })),
        )
        .await
    }

    pub async fn compare(&self, word1: &str, word2: &str) -> Result<CompareResponse> {
        self.send(
            self.client
                .post(self.url("/embed/openai/compare"))
                .json(&CompareRequest { word1, word2 }),
        )
        .await
    }

    pub async fn rag_ask(&self, question: &str) -> Result<RagResponse> {
        let url = format!("{}?q={}", self.url("/rag"), urlencoding::encode(question));
        self.send(self.client.get(url)).await
    }

    pub async fn rag_upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<RagUploadResponse> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        self.send(self.client.post(self.url("/rag/upload")).multipart(form))
            .await
    }

    pub async fn fine_tune(&self, query: &str) -> Result<FineTuneResponse> {
        self.send(
            self.client
                .post(self.url("/ft"))
                .json(&FineTuneRequest { query }),
        )
        .await
    }
}
