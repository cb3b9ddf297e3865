//! RAG Routes - Questions over the vector store, document upload

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::{domain_error, unavailable};
use crate::models::{RagQuery, RagResponse, RagUploadForm, RagUploadResponse};
use crate::{AppRagService, AppState};

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

fn rag_service(state: &AppState) -> Result<&AppRagService, (StatusCode, String)> {
    state.rag_service.as_deref().ok_or_else(|| unavailable("RAG"))
}

/// 413 past the body limit, 400 for a malformed form
fn multipart_error(e: MultipartError) -> (StatusCode, String) {
    (e.status(), e.body_text())
}

/// Answer a question from the indexed documents
#[utoipa::path(
    get,
    path = "/rag",
    params(RagQuery),
    responses(
        (status = 200, description = "Answer with provenance flags", body = RagResponse),
        (status = 400, description = "Missing query"),
        (status = 502, description = "Assistant run failed"),
        (status = 503, description = "RAG not configured")
    ),
    security(("bearer" = [])),
    tag = "RAG"
)]
pub async fn ask(
    State(state): State<AppState>,
    Query(query): Query<RagQuery>,
) -> Result<Json<RagResponse>, (StatusCode, String)> {
    let service = rag_service(&state)?;
    let q = query.q.unwrap_or_default();

    let answer = service.ask(&q).await.map_err(domain_error)?;

    Ok(Json(RagResponse {
        query: q,
        answer: answer.into(),
    }))
}

/// Upload a document into the vector store
#[utoipa::path(
    post,
    path = "/rag/upload",
    request_body(content = RagUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document attached", body = RagUploadResponse),
        (status = 400, description = "Missing or empty file"),
        (status = 413, description = "File larger than 20 MiB"),
        (status = 502, description = "Upload failed"),
        (status = 503, description = "RAG not configured")
    ),
    security(("bearer" = [])),
    tag = "RAG"
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RagUploadResponse>, (StatusCode, String)> {
    let service = rag_service(&state)?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        file = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) =
        file.ok_or((StatusCode::BAD_REQUEST, "file is required".to_string()))?;

    tracing::info!("Uploading {} ({} bytes) to RAG", file_name, bytes.len());

    let upload = service
        .upload(&file_name, content_type.as_deref(), bytes.to_vec())
        .await
        .map_err(domain_error)?;

    Ok(Json(upload.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/rag", get(ask)).route(
        "/rag/upload",
        post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}
