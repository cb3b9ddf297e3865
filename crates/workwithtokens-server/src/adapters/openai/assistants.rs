//! Assistants / Threads / Vector Stores adapter

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use workwithtokens::{AssistantBackend, AssistantSpec, DomainError, RunStatus, VectorStoreSnapshot};

use super::OpenAiHttp;
use crate::adapters::http_error;

const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Hosted assistant with file search over an OpenAI vector store
pub struct OpenAiAssistantsClient {
    http: OpenAiHttp,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[derive(Deserialize)]
struct RunObject {
    status: RunStatus,
}

#[derive(Deserialize)]
struct MessageList {
    #[serde(default)]
    data: Vec<ThreadMessage>,
}

#[derive(Deserialize)]
struct ThreadMessage {
    role: String,
    #[serde(default)]
    content: Vec<MessageContent>,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    text: Option<MessageText>,
}

#[derive(Deserialize)]
struct MessageText {
    value: String,
}

#[derive(Deserialize)]
struct VectorStoreFile {
    #[serde(default)]
    status: String,
}

#[derive(Deserialize)]
struct VectorStore {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    file_counts: FileCounts,
}

#[derive(Deserialize, Default)]
struct FileCounts {
    #[serde(default)]
    total: u64,
}

impl OpenAiAssistantsClient {
    pub fn new(http: OpenAiHttp) -> Self {
        Self { http }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, DomainError> {
        let response = request
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .send()
            .await
            .map_err(|e| http_error::from_reqwest("OpenAI", e))?;
        parse(response, what).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, DomainError> {
    if !response.status().is_success() {
        return Err(http_error::from_response(response, &format!("Failed to {what}")).await);
    }
    response
        .json()
        .await
        .map_err(|e| http_error::from_reqwest("OpenAI", e))
}

#[async_trait]
impl AssistantBackend for OpenAiAssistantsClient {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, DomainError> {
        let body = json!({
            "name": spec.name,
            "model": spec.model,
            "instructions": spec.instructions,
            "tools": [{"type": "file_search"}],
            "tool_resources": {
                "file_search": {"vector_store_ids": [spec.vector_store_id]}
            }
        });
        let created: Created = self
            .send(self.http.post("/v1/assistants").json(&body), "create assistant")
            .await?;
        Ok(created.id)
    }

    async fn create_thread(&self) -> Result<String, DomainError> {
        let created: Created = self
            .send(self.http.post("/v1/threads").json(&json!({})), "create thread")
            .await?;
        Ok(created.id)
    }

    async fn add_user_message(&self, thread_id: &str, content: &str) -> Result<(), DomainError> {
        let _: Created = self
            .send(
                self.http
                    .post(&format!("/v1/threads/{thread_id}/messages"))
                    .json(&json!({"role": "user", "content": content})),
                "add message",
            )
            .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, DomainError> {
        let created: Created = self
            .send(
                self.http
                    .post(&format!("/v1/threads/{thread_id}/runs"))
                    .json(&json!({"assistant_id": assistant_id})),
                "create run",
            )
            .await?;
        Ok(created.id)
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus, DomainError> {
        let run: RunObject = self
            .send(
                self.http.get(&format!("/v1/threads/{thread_id}/runs/{run_id}")),
                "read run",
            )
            .await?;
        Ok(run.status)
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), DomainError> {
        let _: RunObject = self
            .send(
                self.http
                    .post(&format!("/v1/threads/{thread_id}/runs/{run_id}/cancel"))
                    .json(&json!({})),
                "cancel run",
            )
            .await?;
        Ok(())
    }

    async fn latest_assistant_text(
        &self,
        thread_id: &str,
    ) -> Result<Option<String>, DomainError> {
        // Listed newest first
        let list: MessageList = self
            .send(
                self.http.get(&format!("/v1/threads/{thread_id}/messages")),
                "list messages",
            )
            .await?;

        Ok(list
            .data
            .into_iter()
            .find(|m| m.role == "assistant")
            .and_then(|m| m.content.into_iter().next())
            .and_then(|c| c.text)
            .map(|t| t.value))
    }

    async fn upload_file(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        let mut part = Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(mime) = content_type {
            part = part
                .mime_str(mime)
                .map_err(|e| DomainError::Validation(format!("Invalid content type: {e}")))?;
        }
        let form = Form::new().text("purpose", "assistants").part("file", part);

        let created: Created = self
            .send(self.http.post("/v1/files").multipart(form), "upload file")
            .await?;
        tracing::info!("Uploaded {} as {}", file_name, created.id);
        Ok(created.id)
    }

    async fn attach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<String, DomainError> {
        let file: VectorStoreFile = self
            .send(
                self.http
                    .post(&format!("/v1/vector_stores/{vector_store_id}/files"))
                    .json(&json!({"file_id": file_id})),
                "attach file to vector store",
            )
            .await?;
        Ok(file.status)
    }

    async fn vector_store(
        &self,
        vector_store_id: &str,
    ) -> Result<VectorStoreSnapshot, DomainError> {
        let store: VectorStore = self
            .send(
                self.http.get(&format!("/v1/vector_stores/{vector_store_id}")),
                "read vector store",
            )
            .await?;
        Ok(VectorStoreSnapshot {
            id: store.id,
            file_count: store.file_counts.total,
            status: store.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> OpenAiAssistantsClient {
        OpenAiAssistantsClient::new(
            OpenAiHttp::new("sk-test".to_string()).with_base_url(server.base_url()),
        )
    }

    #[tokio::test]
    async fn test_create_assistant_binds_vector_store() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/assistants")
                    .header("OpenAI-Beta", "assistants=v2")
                    .header("authorization", "Bearer sk-test")
                    .json_body(json!({
                        "name": "RAG Assistant",
                        "model": "gpt-4o-mini",
                        "instructions": "answer in JSON",
                        "tools": [{"type": "file_search"}],
                        "tool_resources": {"file_search": {"vector_store_ids": ["vs_1"]}}
                    }));
                then.status(200).json_body(json!({"id": "asst_1", "object": "assistant"}));
            })
            .await;

        let id = client(&server)
            .create_assistant(&AssistantSpec {
                name: "RAG Assistant".to_string(),
                model: "gpt-4o-mini".to_string(),
                instructions: "answer in JSON".to_string(),
                vector_store_id: "vs_1".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(id, "asst_1");
    }

    #[tokio::test]
    async fn test_thread_message_and_run() {
        let server = MockServer::start_async().await;
        let message_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/threads/thread_1/messages")
                    .header("OpenAI-Beta", "assistants=v2")
                    .json_body(json!({"role": "user", "content": "What is in the docs?"}));
                then.status(200).json_body(json!({"id": "msg_1"}));
            })
            .await;
        let run_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/threads/thread_1/runs")
                    .json_body(json!({"assistant_id": "asst_1"}));
                then.status(200)
                    .json_body(json!({"id": "run_1", "status": "queued"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/threads/thread_1/runs/run_1");
                then.status(200)
                    .json_body(json!({"id": "run_1", "status": "in_progress"}));
            })
            .await;

        let client = client(&server);
        client
            .add_user_message("thread_1", "What is in the docs?")
            .await
            .unwrap();
        let run_id = client.create_run("thread_1", "asst_1").await.unwrap();
        let status = client.run_status("thread_1", &run_id).await.unwrap();

        message_mock.assert_async().await;
        run_mock.assert_async().await;
        assert_eq!(status, RunStatus::InProgress);
    }

    #[tokio::test]
    async fn test_cancel_run() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/threads/thread_1/runs/run_1/cancel")
                    .header("OpenAI-Beta", "assistants=v2");
                then.status(200)
                    .json_body(json!({"id": "run_1", "status": "cancelling"}));
            })
            .await;

        client(&server).cancel_run("thread_1", "run_1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_latest_assistant_text_skips_user_messages() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/threads/thread_1/messages");
                then.status(200).json_body(json!({
                    "data": [
                        {"role": "assistant", "content": [
                            {"type": "text", "text": {"value": "{\"answer\":\"42\"}", "annotations": []}}
                        ]},
                        {"role": "user", "content": [
                            {"type": "text", "text": {"value": "question", "annotations": []}}
                        ]}
                    ]
                }));
            })
            .await;

        let text = client(&server)
            .latest_assistant_text("thread_1")
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("{\"answer\":\"42\"}"));
    }

    #[tokio::test]
    async fn test_upload_attach_and_count() {
        let server = MockServer::start_async().await;
        let upload_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/files")
                    .body_contains("assistants")
                    .body_contains("notes.txt");
                then.status(200).json_body(json!({"id": "file_1", "purpose": "assistants"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/vector_stores/vs_1/files")
                    .json_body(json!({"file_id": "file_1"}));
                then.status(200)
                    .json_body(json!({"id": "file_1", "status": "in_progress"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/vector_stores/vs_1");
                then.status(200).json_body(json!({
                    "id": "vs_1",
                    "status": "completed",
                    "file_counts": {"in_progress": 1, "completed": 2, "failed": 0, "cancelled": 0, "total": 3}
                }));
            })
            .await;

        let client = client(&server);
        let file_id = client
            .upload_file("notes.txt", Some("text/plain"), b"hello".to_vec())
            .await
            .unwrap();
        let status = client.attach_file("vs_1", &file_id).await.unwrap();
        let store = client.vector_store("vs_1").await.unwrap();

        upload_mock.assert_async().await;
        assert_eq!(status, "in_progress");
        assert_eq!(store.file_count, 3);
        assert_eq!(store.status, "completed");
    }

    #[tokio::test]
    async fn test_failure_message_names_operation() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/threads");
                then.status(500);
            })
            .await;

        let err = client(&server).create_thread().await.unwrap_err();
        assert_eq!(err.to_string(), "External service error: Failed to create thread");
    }
}
