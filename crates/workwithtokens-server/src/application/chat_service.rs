//! Chat Application Service (Use Case)
//!
//! Prompts a provider for a structured JSON answer and counts the tokens
//! of both sides of the exchange.

use std::sync::Arc;

use workwithtokens::domain::services::prompts::structured_prompt;
use workwithtokens::{
    ChatAnswer, ChatMessage, ChatProvider, CompletionOptions, DomainError, LlmProvider,
    ModelSettings, TokenCounter, TokenCounts,
};

/// Longest accepted chat message, in characters
pub const MAX_MESSAGE_CHARS: usize = 10_000;

/// Check a chat request and resolve its provider
pub fn validate_request(message: &str, provider: &str) -> Result<ChatProvider, DomainError> {
    if message.trim().is_empty() {
        return Err(DomainError::Validation("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(DomainError::Validation(format!(
            "Message must not exceed {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    if provider.trim().is_empty() {
        return Err(DomainError::Validation("Provider is required".to_string()));
    }
    provider.parse::<ChatProvider>().map_err(DomainError::Validation)
}

/// Application service for chat operations
pub struct ChatService {
    claude: Option<Arc<dyn LlmProvider>>,
    openai: Option<Arc<dyn LlmProvider>>,
    counter: Arc<dyn TokenCounter>,
}

impl ChatService {
    pub fn new(
        claude: Option<Arc<dyn LlmProvider>>,
        openai: Option<Arc<dyn LlmProvider>>,
        counter: Arc<dyn TokenCounter>,
    ) -> Self {
        Self {
            claude,
            openai,
            counter,
        }
    }

    fn provider(&self, provider: ChatProvider) -> Option<&Arc<dyn LlmProvider>> {
        match provider {
            ChatProvider::Claude => self.claude.as_ref(),
            ChatProvider::OpenAi => self.openai.as_ref(),
        }
    }

    pub fn is_configured(&self, provider: ChatProvider) -> bool {
        self.provider(provider).is_some()
    }

    /// Model and sampling settings used for `provider`
    pub fn settings(&self, provider: ChatProvider) -> Option<&ModelSettings> {
        self.provider(provider).map(|p| p.settings())
    }

    /// Ask `provider` and shape its reply.
    ///
    /// Prompt tokens count the user message only; response tokens count the
    /// trimmed reply.
    pub async fn ask(
        &self,
        provider: ChatProvider,
        message: &str,
    ) -> Result<ChatAnswer, DomainError> {
        let llm = self.provider(provider).ok_or_else(|| {
            DomainError::external(format!("{} is not configured", provider.display_name()))
        })?;

        let prompt_tokens = self.counter.count(message);
        let settings = llm.settings();
        let response = llm
            .complete(
                &[ChatMessage::user(structured_prompt(provider, message))],
                &CompletionOptions::new(settings.max_tokens, settings.temperature),
            )
            .await?;

        let text = response.content.trim();
        let tokens = TokenCounts::new(prompt_tokens, self.counter.count(text));

        tracing::info!(
            "{} answered ({} prompt / {} response tokens)",
            provider.display_name(),
            tokens.prompt_tokens,
            tokens.response_tokens
        );

        Ok(ChatAnswer::from_reply(provider, text, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use workwithtokens::{CompletionResponse, TokenUsage};

    /// Replies with a canned text and records the prompts it saw
    struct ScriptedLlm {
        reply: Result<String, String>,
        settings: ModelSettings,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                settings: ModelSettings::new("test-model", 0.3, 60),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                settings: ModelSettings::new("test-model", 0.3, 60),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, DomainError> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    content: text.clone(),
                    model: self.settings.model.clone(),
                    usage: TokenUsage::default(),
                    finish_reason: None,
                }),
                Err(message) => Err(DomainError::external(message.clone())),
            }
        }

        fn provider_name(&self) -> &str {
            "scripted"
        }

        fn settings(&self) -> &ModelSettings {
            &self.settings
        }
    }

    /// One token per whitespace-separated word
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    fn service(claude: Option<Arc<ScriptedLlm>>, openai: Option<Arc<ScriptedLlm>>) -> ChatService {
        ChatService::new(
            claude.map(|c| c as Arc<dyn LlmProvider>),
            openai.map(|o| o as Arc<dyn LlmProvider>),
            Arc::new(WordCounter),
        )
    }

    #[test]
    fn test_validate_request() {
        assert_eq!(
            validate_request("hi", "claude").unwrap(),
            ChatProvider::Claude
        );
        assert_eq!(
            validate_request("hi", "openai").unwrap(),
            ChatProvider::OpenAi
        );
        assert!(validate_request("", "claude").is_err());
        assert!(validate_request("hi", "").is_err());
        assert!(validate_request("hi", "gemini").is_err());
        assert!(validate_request(&"a".repeat(MAX_MESSAGE_CHARS), "openai").is_ok());
        assert!(validate_request(&"a".repeat(MAX_MESSAGE_CHARS + 1), "openai").is_err());
    }

    #[test]
    fn test_provider_error_names_rule() {
        let err = validate_request("hi", "gemini").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Provider must be either \"openai\" or \"claude\""
        );
    }

    #[tokio::test]
    async fn test_parsed_reply_with_counts() {
        let llm = ScriptedLlm::replying("  {\"subject\": \"rust\", \"the answer\": \"a language\"}  ");
        let service = service(Some(llm.clone()), None);

        let answer = service
            .ask(ChatProvider::Claude, "what is rust")
            .await
            .unwrap();

        assert!(!answer.is_error());
        assert_eq!(answer.fields["subject"], "rust");
        assert_eq!(answer.tokens.prompt_tokens, 3);
        assert_eq!(answer.tokens.response_tokens, 6);
        assert_eq!(answer.tokens.total_tokens, 9);

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("\"what is rust\""));
        assert!(prompts[0].contains("do the ai know the answer"));
    }

    #[tokio::test]
    async fn test_reply_without_json_is_in_band_error() {
        let service = service(None, Some(ScriptedLlm::replying("Sorry, I can't.")));

        let answer = service.ask(ChatProvider::OpenAi, "cats").await.unwrap();

        assert_eq!(
            answer.error.as_deref(),
            Some("No JSON found in OpenAI response")
        );
        assert_eq!(answer.raw.as_deref(), Some("Sorry, I can't."));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let service = service(Some(ScriptedLlm::failing("overloaded")), None);
        let err = service.ask(ChatProvider::Claude, "hi").await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(m) if m == "overloaded"));
    }

    #[tokio::test]
    async fn test_unconfigured_provider() {
        let service = service(None, None);
        assert!(!service.is_configured(ChatProvider::Claude));
        assert!(service.settings(ChatProvider::OpenAi).is_none());
        assert!(service.ask(ChatProvider::Claude, "hi").await.is_err());
    }
}
