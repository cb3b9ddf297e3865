//! Chat - Structured answers with token accounting
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::services::reply::{interpret_reply, StructuredReply};
use crate::domain::value_objects::ChatProvider;

/// Token counts for one prompt/response exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCounts {
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    pub total_tokens: usize,
}

impl TokenCounts {
    pub fn new(prompt_tokens: usize, response_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            response_tokens,
            total_tokens: prompt_tokens + response_tokens,
        }
    }
}

/// Field names reserved for token counts in the flattened answer
pub const RESERVED_FIELDS: [&str; 3] = ["promptTokens", "responseTokens", "totalTokens"];

/// ChatAnswer - the model's JSON object (or the reason it is missing)
/// together with token counts
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    /// Fields of the JSON object the model returned
    pub fields: BTreeMap<String, Value>,
    pub error: Option<String>,
    pub raw: Option<String>,
    pub details: Option<String>,
    pub tokens: TokenCounts,
}

impl ChatAnswer {
    /// Build an answer from the model's reply text.
    ///
    /// Malformed output is reported in `error`/`raw`/`details`; it never fails.
    pub fn from_reply(provider: ChatProvider, text: &str, tokens: TokenCounts) -> Self {
        match interpret_reply(text) {
            StructuredReply::Parsed(mut fields) => {
                for key in RESERVED_FIELDS {
                    fields.remove(key);
                }
                Self {
                    fields,
                    error: None,
                    raw: None,
                    details: None,
                    tokens,
                }
            }
            StructuredReply::NoJson { raw } => Self {
                fields: BTreeMap::new(),
                error: Some(format!(
                    "No JSON found in {} response",
                    provider.display_name()
                )),
                raw: Some(raw),
                details: None,
                tokens,
            },
            StructuredReply::Invalid { raw, details } => Self {
                fields: BTreeMap::new(),
                error: Some("Invalid JSON returned".to_string()),
                raw: Some(raw),
                details: Some(details),
                tokens,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_counts_sum() {
        let counts = TokenCounts::new(12, 30);
        assert_eq!(counts.total_tokens, 42);
    }

    #[test]
    fn test_parsed_reply_keeps_fields() {
        let text = r#"{"subject": "rust", "the answer": "ownership"}"#;
        let answer = ChatAnswer::from_reply(ChatProvider::Claude, text, TokenCounts::new(1, 2));
        assert!(!answer.is_error());
        assert_eq!(answer.fields.get("subject"), Some(&json!("rust")));
        assert_eq!(answer.fields.get("the answer"), Some(&json!("ownership")));
    }

    #[test]
    fn test_reserved_fields_are_dropped() {
        let text = r#"{"subject": "x", "totalTokens": 9999}"#;
        let answer = ChatAnswer::from_reply(ChatProvider::OpenAi, text, TokenCounts::new(1, 2));
        assert!(!answer.fields.contains_key("totalTokens"));
        assert_eq!(answer.tokens.total_tokens, 3);
    }

    #[test]
    fn test_reply_without_json_reports_provider() {
        let answer =
            ChatAnswer::from_reply(ChatProvider::OpenAi, "sorry, no", TokenCounts::default());
        assert_eq!(
            answer.error.as_deref(),
            Some("No JSON found in OpenAI response")
        );
        assert_eq!(answer.raw.as_deref(), Some("sorry, no"));
        assert!(answer.details.is_none());
    }

    #[test]
    fn test_broken_json_is_reported_in_band() {
        let answer = ChatAnswer::from_reply(
            ChatProvider::Claude,
            "here: {\"subject\": }",
            TokenCounts::default(),
        );
        assert_eq!(answer.error.as_deref(), Some("Invalid JSON returned"));
        assert_eq!(answer.raw.as_deref(), Some("{\"subject\": }"));
        assert!(answer.details.is_some());
    }
}
