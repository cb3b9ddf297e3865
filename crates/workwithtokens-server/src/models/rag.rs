//! RAG - Answers over the hosted vector store

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use workwithtokens::{RagAnswer, RagUpload};

/// Query parameters for the RAG endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct RagQuery {
    /// Question to answer
    pub q: Option<String>,
}

/// Answer produced by the file-search assistant
#[derive(Debug, Serialize, ToSchema)]
pub struct RagAnswerResponse {
    pub answer: String,
    #[serde(rename = "fromData")]
    pub from_data: bool,
    #[serde(rename = "fromAI")]
    pub from_ai: bool,
    pub tokens: i64,
}

impl From<RagAnswer> for RagAnswerResponse {
    fn from(answer: RagAnswer) -> Self {
        Self {
            answer: answer.answer,
            from_data: answer.from_data,
            from_ai: answer.from_ai,
            tokens: answer.tokens,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RagResponse {
    pub query: String,
    pub answer: RagAnswerResponse,
}

/// Multipart upload form (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct RagUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Result of indexing a document
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RagUploadResponse {
    pub file_name: String,
    pub vector_store_id: String,
    pub file_count: u64,
    /// Indexing status of the uploaded file
    pub status: String,
}

impl From<RagUpload> for RagUploadResponse {
    fn from(upload: RagUpload) -> Self {
        Self {
            file_name: upload.file_name,
            vector_store_id: upload.vector_store_id,
            file_count: upload.file_count,
            status: upload.status,
        }
    }
}
