//! Anthropic Messages API adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use workwithtokens::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, MessageRole,
    ModelSettings, TokenUsage,
};

use super::http_error;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Claude via the Messages API
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    version: String,
    settings: ModelSettings,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: Vec<TextBlock<'a>>,
}

#[derive(Serialize)]
struct TextBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, version: String, settings: ModelSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            version,
            settings,
        }
    }

    /// Point the client at another host (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for AnthropicClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        // The Messages API takes the system prompt as a top-level field
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();

        let request = MessagesRequest {
            model: &self.settings.model,
            temperature: options.temperature.unwrap_or(self.settings.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.settings.max_tokens),
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages: messages
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .map(|m| RequestMessage {
                    role: "user",
                    content: vec![TextBlock {
                        kind: "text",
                        text: &m.content,
                    }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.version)
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("Claude", e))?;

        if !response.status().is_success() {
            return Err(http_error::from_response(response, "Claude API failed").await);
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| http_error::from_reqwest("Claude", e))?;

        let content = body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default();
        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: body.model,
            usage,
            finish_reason: body.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "claude"
    }

    fn settings(&self) -> &ModelSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> AnthropicClient {
        AnthropicClient::new(
            "sk-ant-test".to_string(),
            "2023-06-01".to_string(),
            ModelSettings::new("claude-3-5-sonnet-20241022", 0.3, 1024),
        )
        .with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn test_sends_headers_and_text_blocks() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "sk-ant-test")
                    .header("anthropic-version", "2023-06-01")
                    .json_body(json!({
                        "model": "claude-3-5-sonnet-20241022",
                        "temperature": 0.3,
                        "max_tokens": 1024,
                        "messages": [{
                            "role": "user",
                            "content": [{"type": "text", "text": "hello"}]
                        }]
                    }));
                then.status(200).json_body(json!({
                    "model": "claude-3-5-sonnet-20241022",
                    "content": [{"type": "text", "text": "{\"subject\":\"greeting\"}"}],
                    "stop_reason": "end_turn",
                    "usage": {"input_tokens": 12, "output_tokens": 5}
                }));
            })
            .await;

        let reply = client(&server).complete_simple("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "{\"subject\":\"greeting\"}");
    }

    #[tokio::test]
    async fn test_system_message_is_top_level() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .json_body_partial(r#"{"system": "be brief"}"#);
                then.status(200).json_body(json!({
                    "model": "m",
                    "content": [{"type": "text", "text": "ok"}],
                    "usage": {"input_tokens": 3, "output_tokens": 1}
                }));
            })
            .await;

        let response = client(&server)
            .complete(
                &[ChatMessage::system("be brief"), ChatMessage::user("hi")],
                &CompletionOptions::default(),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.usage.total_tokens, 4);
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(401).json_body(json!({
                    "type": "error",
                    "error": {"type": "authentication_error", "message": "invalid x-api-key"}
                }));
            })
            .await;

        let err = client(&server).complete_simple("hello").await.unwrap_err();
        match err {
            DomainError::ExternalService(message) => assert_eq!(message, "invalid x-api-key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_uses_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(500);
            })
            .await;

        let err = client(&server).complete_simple("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "External service error: Claude API failed");
    }
}
