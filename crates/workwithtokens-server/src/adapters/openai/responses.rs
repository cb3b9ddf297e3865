//! Responses API adapter

use serde::{Deserialize, Serialize};

use workwithtokens::DomainError;

use super::OpenAiHttp;
use crate::adapters::http_error;

/// Single-shot text generation via `/v1/responses`
pub struct OpenAiResponsesClient {
    http: OpenAiHttp,
}

#[derive(Serialize)]
struct ResponseRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl OpenAiResponsesClient {
    pub fn new(http: OpenAiHttp) -> Self {
        Self { http }
    }

    /// Run `input` through `model` and return the concatenated output text
    pub async fn create(&self, model: &str, input: &str) -> Result<String, DomainError> {
        let response = self
            .http
            .post("/v1/responses")
            .json(&ResponseRequest { model, input })
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        if !response.status().is_success() {
            return Err(http_error::from_response(response, "OpenAI API failed").await);
        }

        let body: ResponseBody = response
            .json()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;

        Ok(body
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|c| c.kind == "output_text")
            .map(|c| c.text)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_concatenates_output_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/responses")
                    .json_body(json!({"model": "ft:gpt-4o-mini:org::abc", "input": "hi"}));
                then.status(200).json_body(json!({
                    "id": "resp_1",
                    "output": [
                        {"type": "reasoning", "content": []},
                        {"type": "message", "role": "assistant", "content": [
                            {"type": "output_text", "text": "{\"answerInEnglish\":", "annotations": []},
                            {"type": "refusal", "refusal": "no"},
                            {"type": "output_text", "text": "\"Hello\"}", "annotations": []}
                        ]}
                    ]
                }));
            })
            .await;

        let client = OpenAiResponsesClient::new(
            OpenAiHttp::new("sk-test".to_string()).with_base_url(server.base_url()),
        );
        let text = client.create("ft:gpt-4o-mini:org::abc", "hi").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "{\"answerInEnglish\":\"Hello\"}");
    }

    #[tokio::test]
    async fn test_unknown_model_is_external_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/responses");
                then.status(404).json_body(json!({
                    "error": {"message": "The model `ft:x` does not exist", "code": "model_not_found"}
                }));
            })
            .await;

        let client = OpenAiResponsesClient::new(
            OpenAiHttp::new("sk-test".to_string()).with_base_url(server.base_url()),
        );
        let err = client.create("ft:x", "hi").await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
