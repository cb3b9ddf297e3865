//! Fine-tune Routes - Translation answers from the fine-tuned model

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use workwithtokens::DomainError;

use super::{bad_json, unavailable};
use crate::models::{FineTuneError, FineTuneRequest, FineTuneResponse};
use crate::AppState;

/// Ask the fine-tuned model
#[utoipa::path(
    post,
    path = "/ft",
    request_body = FineTuneRequest,
    responses(
        (status = 200, description = "Translation answer", body = FineTuneResponse),
        (status = 400, description = "Empty query"),
        (status = 500, description = "OpenAI request failed", body = FineTuneError),
        (status = 503, description = "Fine-tuned model not configured")
    ),
    security(("bearer" = [])),
    tag = "Fine-tune"
)]
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<FineTuneRequest>, JsonRejection>,
) -> Result<Json<FineTuneResponse>, Response> {
    let Json(payload) = payload.map_err(|e| bad_json(e).into_response())?;
    let service = state
        .fine_tune_service
        .as_ref()
        .ok_or_else(|| unavailable("Fine-tuned model").into_response())?;

    match service.ask(&payload.query).await {
        Ok(answer) => Ok(Json(answer.into())),
        Err(DomainError::Validation(message)) => {
            Err((StatusCode::BAD_REQUEST, message).into_response())
        }
        Err(e) => {
            tracing::error!("Fine-tune request failed: {}", e);
            let body = FineTuneError {
                message: "OpenAI request failed".to_string(),
                error: e.to_string(),
                model: service.model().to_string(),
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ft", post(ask))
}
