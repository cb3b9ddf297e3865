//! Login - Credentials and access tokens

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials for login and registration
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login result; failures are reported with `success: false`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// HS256 JWT for the Authorization header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl LoginResponse {
    pub fn invalid_credentials() -> Self {
        Self {
            success: false,
            message: "Invalid username or password".to_string(),
            user_id: None,
            username: None,
            access_token: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user_id: i32,
    pub username: String,
}
