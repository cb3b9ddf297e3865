//! Mapping of provider HTTP failures onto domain errors

use serde_json::Value;
use workwithtokens::DomainError;

/// Turn a non-2xx provider response into an external-service error.
///
/// Uses the provider's `error.message` when the body carries one,
/// otherwise `fallback`.
pub async fn from_response(response: reqwest::Response, fallback: &str) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Provider call failed with {}: {}", status, body);

    DomainError::external(provider_message(&body).unwrap_or_else(|| fallback.to_string()))
}

/// Transport or decoding failure talking to a provider
pub fn from_reqwest(provider: &str, e: reqwest::Error) -> DomainError {
    DomainError::external(format!("{} request failed: {}", provider, e))
}

fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        error => error.get("message")?.as_str().map(str::to_string),
    }
}
