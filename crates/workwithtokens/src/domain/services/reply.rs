//! Interpretation of LLM replies that are supposed to be a JSON object

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// What a reply turned out to contain
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredReply {
    /// The reply held a JSON object
    Parsed(BTreeMap<String, Value>),
    /// No `{ ... }` span at all
    NoJson { raw: String },
    /// A `{ ... }` span that is not a valid JSON object
    Invalid { raw: String, details: String },
}

/// Slice from the first `{` to the last `}` (inclusive)
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Classify a reply. Never fails; errors are carried in the variant.
pub fn interpret_reply(text: &str) -> StructuredReply {
    let trimmed = text.trim();
    let Some(json) = extract_json_object(trimmed) else {
        return StructuredReply::NoJson {
            raw: trimmed.to_string(),
        };
    };

    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => StructuredReply::Parsed(into_btree(map)),
        Ok(other) => StructuredReply::Invalid {
            raw: json.to_string(),
            details: format!("expected a JSON object, got {}", type_name(&other)),
        },
        Err(e) => StructuredReply::Invalid {
            raw: json.to_string(),
            details: e.to_string(),
        },
    }
}

fn into_btree(map: Map<String, Value>) -> BTreeMap<String, Value> {
    map.into_iter().collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
