//! Chat Routes - Structured answers, model settings and cost estimates
//!
//! HTTP handlers that delegate to ChatService for business logic.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use workwithtokens::domain::services::pricing::estimate_all;
use workwithtokens::ChatProvider;

use super::{bad_json, domain_error, unavailable};
use crate::application::validate_chat_request;
use crate::models::{
    ChatRequest, ChatResponse, CostEstimateResponse, ModelQuery, ModelSettingsResponse,
    PricingQuery, PricingResponse,
};
use crate::AppState;

/// Ask a provider for a structured answer
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model fields plus promptTokens/responseTokens/totalTokens, or error/raw/details when the reply held no valid JSON", body = serde_json::Value),
        (status = 400, description = "Malformed body, invalid message or provider"),
        (status = 401, description = "Missing or invalid token"),
        (status = 502, description = "Provider call failed"),
        (status = 503, description = "Provider not configured")
    ),
    security(("bearer" = [])),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    let provider =
        validate_chat_request(&payload.message, &payload.provider).map_err(domain_error)?;

    if !state.chat_service.is_configured(provider) {
        return Err(unavailable(provider.display_name()));
    }

    let answer = state
        .chat_service
        .ask(provider, &payload.message)
        .await
        .map_err(domain_error)?;

    Ok(Json(ChatResponse(answer)))
}

/// Model and sampling settings of a provider
#[utoipa::path(
    get,
    path = "/chat/model",
    params(ModelQuery),
    responses(
        (status = 200, description = "Provider settings", body = ModelSettingsResponse),
        (status = 400, description = "Unknown provider"),
        (status = 503, description = "Provider not configured")
    ),
    security(("bearer" = [])),
    tag = "Chat"
)]
pub async fn get_model(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<ModelSettingsResponse>, (StatusCode, String)> {
    let provider: ChatProvider = query
        .provider
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?
        .unwrap_or(ChatProvider::Claude);

    let settings = state
        .chat_service
        .settings(provider)
        .ok_or_else(|| unavailable(provider.display_name()))?;

    Ok(Json(settings.into()))
}

/// Cost of an exchange on every catalog model
#[utoipa::path(
    get,
    path = "/chat/pricing",
    params(PricingQuery),
    responses(
        (status = 200, description = "Cost estimates in catalog order", body = PricingResponse)
    ),
    security(("bearer" = [])),
    tag = "Chat"
)]
pub async fn get_pricing(Query(query): Query<PricingQuery>) -> Json<PricingResponse> {
    let estimates = estimate_all(query.prompt_tokens, query.response_tokens)
        .into_iter()
        .map(CostEstimateResponse::from)
        .collect();

    Json(PricingResponse {
        prompt_tokens: query.prompt_tokens,
        response_tokens: query.response_tokens,
        estimates,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/model", get(get_model))
        .route("/chat/pricing", get(get_pricing))
}
