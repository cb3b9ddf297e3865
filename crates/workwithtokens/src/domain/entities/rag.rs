//! RAG - Answers produced by a hosted file-search assistant
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::services::reply::extract_json_object;

/// Answer returned by the RAG assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(rename = "fromData")]
    pub from_data: bool,
    #[serde(rename = "fromAI")]
    pub from_ai: bool,
    pub tokens: i64,
}

impl RagAnswer {
    /// Interpret the assistant's text output.
    ///
    /// The assistant is instructed to answer with
    /// `{"answer", "fromData", "fromAI", "tokens"}`. Anything that does not
    /// parse as a JSON object is returned verbatim as an AI answer.
    pub fn from_model_output(text: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(text.trim())
            .ok()
            .filter(Value::is_object)
            .or_else(|| {
                extract_json_object(text)
                    .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
                    .filter(Value::is_object)
            });

        let Some(parsed) = parsed else {
            return Self::fallback(text);
        };

        let answer = match parsed.get("answer") {
            None | Some(Value::Null) => text.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            answer,
            from_data: is_truthy(parsed.get("fromData")),
            from_ai: is_truthy(parsed.get("fromAI")),
            tokens: numeric_value(parsed.get("tokens")),
        }
    }

    fn fallback(text: &str) -> Self {
        Self {
            answer: text.to_string(),
            from_data: false,
            from_ai: true,
            tokens: 0,
        }
    }
}

/// JavaScript-style truthiness
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Numeric coercion; anything that is not a number becomes 0
fn numeric_value(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.round() as i64)
            .unwrap_or(0),
        Some(Value::Bool(true)) => 1,
        _ => 0,
    }
}

/// Status of an assistant run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// The run finished successfully
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// The run ended and will never produce an answer
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// State of the hosted vector store after an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreSnapshot {
    pub id: String,
    pub file_count: u64,
    pub status: String,
}

/// Result of adding a document to the vector store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagUpload {
    pub file_name: String,
    pub vector_store_id: String,
    pub file_count: u64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_well_formed_output() {
        let out = r#"{"answer": "Paris", "fromData": true, "fromAI": false, "tokens": 42}"#;
        let answer = RagAnswer::from_model_output(out);
        assert_eq!(answer.answer, "Paris");
        assert!(answer.from_data);
        assert!(!answer.from_ai);
        assert_eq!(answer.tokens, 42);
    }

    #[test]
    fn test_plain_text_falls_back() {
        let answer = RagAnswer::from_model_output("I could not find that.");
        assert_eq!(
            answer,
            RagAnswer {
                answer: "I could not find that.".to_string(),
                from_data: false,
                from_ai: true,
                tokens: 0,
            }
        );
    }

    #[test]
    fn test_missing_answer_uses_whole_text() {
        let out = r#"{"fromData": 1, "tokens": "17"}"#;
        let answer = RagAnswer::from_model_output(out);
        assert_eq!(answer.answer, out);
        assert!(answer.from_data);
        assert!(!answer.from_ai);
        assert_eq!(answer.tokens, 17);
    }

    #[test]
    fn test_fenced_json_is_extracted() {
        let out = "```json\n{\"answer\": \"42\", \"fromAI\": \"yes\"}\n```";
        let answer = RagAnswer::from_model_output(out);
        assert_eq!(answer.answer, "42");
        assert!(answer.from_ai);
        assert_eq!(answer.tokens, 0);
    }

    #[test]
    fn test_non_numeric_tokens_become_zero() {
        let out = r#"{"answer": "x", "tokens": "many"}"#;
        assert_eq!(RagAnswer::from_model_output(out).tokens, 0);
    }

    #[test]
    fn test_serializes_with_client_field_names() {
        let answer = RagAnswer::from_model_output("text");
        let json = serde_json::to_value(&answer).unwrap();
        assert!(json.get("fromData").is_some());
        assert!(json.get("fromAI").is_some());
    }

    #[test]
    fn test_run_status_classification() {
        let status: RunStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, RunStatus::InProgress);
        assert!(!status.is_fatal());
        assert!(RunStatus::Expired.is_fatal());
        assert!(!RunStatus::Incomplete.is_fatal());
        assert!(!RunStatus::RequiresAction.is_fatal());
        assert!(RunStatus::Completed.is_completed());
        let unknown: RunStatus = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(unknown, RunStatus::Unknown);
    }
}
