//! Login Routes - Public credential endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use super::{bad_json, domain_error};
use crate::application::LoginOutcome;
use crate::models::{LoginRequest, LoginResponse, RegisterResponse};
use crate::AppState;

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login result; success is false for bad credentials", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Login"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    let outcome = state
        .login_service
        .login(&payload.username, &payload.password)
        .await
        .map_err(domain_error)?;

    let response = match outcome {
        LoginOutcome::Authenticated { user, access_token } => LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            user_id: Some(user.id),
            username: Some(user.username),
            access_token: Some(access_token),
        },
        LoginOutcome::InvalidCredentials => LoginResponse::invalid_credentials(),
    };

    Ok(Json(response))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/login/register",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User created", body = RegisterResponse),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Login"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(bad_json)?;
    let user = state
        .login_service
        .register(&payload.username, &payload.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "User created successfully".to_string(),
        user_id: user.id,
        username: user.username,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/login/register", post(register))
}
