//! Chat Completions adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use workwithtokens::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, ModelSettings,
    TokenUsage,
};

use super::OpenAiHttp;
use crate::adapters::http_error;

/// OpenAI chat model via `/v1/chat/completions`
pub struct OpenAiChatClient {
    http: OpenAiHttp,
    settings: ModelSettings,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAiChatClient {
    pub fn new(http: OpenAiHttp, settings: ModelSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl LlmProvider for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            temperature: options.temperature.unwrap_or(self.settings.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.settings.max_tokens),
        };

        let response = self
            .http
            .post("/v1/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        if !response.status().is_success() {
            return Err(http_error::from_response(response, "OpenAI API failed").await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::external("OpenAI returned no choices"))?;

        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: body.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn settings(&self) -> &ModelSettings {
        &self.settings
    }
}
