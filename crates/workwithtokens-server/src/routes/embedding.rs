//! Embedding Routes - Vectors and word similarity

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use workwithtokens::domain::services::vector::format_percentage;
use workwithtokens::EmbeddingProvider;

use super::{bad_json, domain_error, unavailable};
use crate::models::{CompareRequest, CompareResponse, EmbedRequest, EmbedResponse};
use crate::AppState;

async fn embed_with(
    state: &AppState,
    provider: EmbeddingProvider,
    text: &str,
) -> Result<Json<EmbedResponse>, (StatusCode, String)> {
    if !state.vector_service.is_configured(provider) {
        return Err(unavailable(match provider {
            EmbeddingProvider::OpenAi => "OpenAI embedding",
            EmbeddingProvider::Nomic => "Voyage embedding",
        }));
    }

    let vector = state
        .vector_service
        .embed(provider, text)
        .await
        .map_err(domain_error)?;

    Ok(Json(vector.into()))
}

/// Embed text with OpenAI
#[utoipa::path(
    post,
    path = "/embed/openai",
    request_body = EmbedRequest,
    responses(
        (status = 200, description = "Embedding vector", body = EmbedResponse),
        (status = 400, description = "Empty text"),
        (status = 502, description = "Provider call failed"),
        (status = 503, description = "OpenAI not configured")
    ),
    security(("bearer" = [])),
    tag = "Embedding"
)]
pub async fn embed_openai(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    embed_with(&state, EmbeddingProvider::OpenAi, &payload.text).await
}

/// Embed text with Voyage
#[utoipa::path(
    post,
    path = "/embed/nomic",
    request_body = EmbedRequest,
    responses(
        (status = 200, description = "Embedding vector", body = EmbedResponse),
        (status = 400, description = "Empty text"),
        (status = 502, description = "Provider call failed"),
        (status = 503, description = "Voyage not configured")
    ),
    security(("bearer" = [])),
    tag = "Embedding"
)]
pub async fn embed_nomic(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    embed_with(&state, EmbeddingProvider::Nomic, &payload.text).await
}

/// Compare two words by cosine similarity
#[utoipa::path(
    post,
    path = "/embed/openai/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Similarity with explanation", body = CompareResponse),
        (status = 400, description = "Missing word"),
        (status = 502, description = "Provider call failed"),
        (status = 503, description = "OpenAI not configured")
    ),
    security(("bearer" = [])),
    tag = "Embedding"
)]
pub async fn compare_words(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    if !state.vector_service.is_configured(EmbeddingProvider::OpenAi) {
        return Err(unavailable("OpenAI embedding"));
    }

    let comparison = state
        .vector_service
        .compare(&payload.word1, &payload.word2)
        .await
        .map_err(domain_error)?;

    Ok(Json(CompareResponse {
        word1: comparison.word1,
        word2: comparison.word2,
        similarity: format_percentage(comparison.similarity),
        similarity_explanation: comparison.explanation,
        word1_preview: comparison.word1_preview,
        word2_preview: comparison.word2_preview,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/embed/openai", post(embed_openai))
        .route("/embed/nomic", post(embed_nomic))
        .route("/embed/openai/compare", post(compare_words))
}
