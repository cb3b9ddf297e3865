//! Chat - Structured answers and token costs

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

use workwithtokens::domain::services::pricing::CostEstimate;
use workwithtokens::{ChatAnswer, ModelSettings};

/// Chat request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Prompt text (1 - 10000 characters)
    #[serde(default)]
    pub message: String,
    /// "claude" or "openai"
    #[serde(default)]
    pub provider: String,
}

/// Chat response
///
/// The fields of the model's JSON object followed by `promptTokens`,
/// `responseTokens` and `totalTokens`. When the reply held no usable JSON
/// the body carries `error`, `raw` and optionally `details` instead.
#[derive(Debug)]
pub struct ChatResponse(pub ChatAnswer);

impl Serialize for ChatResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let answer = &self.0;
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &answer.fields {
            map.serialize_entry(key, value)?;
        }
        if let Some(error) = &answer.error {
            map.serialize_entry("error", error)?;
        }
        if let Some(raw) = &answer.raw {
            map.serialize_entry("raw", raw)?;
        }
        if let Some(details) = &answer.details {
            map.serialize_entry("details", details)?;
        }
        map.serialize_entry("promptTokens", &answer.tokens.prompt_tokens)?;
        map.serialize_entry("responseTokens", &answer.tokens.response_tokens)?;
        map.serialize_entry("totalTokens", &answer.tokens.total_tokens)?;
        map.end()
    }
}

/// Query parameters for the model endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct ModelQuery {
    /// "claude" (default) or "openai"
    pub provider: Option<String>,
}

/// Model and sampling settings of a provider
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettingsResponse {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&ModelSettings> for ModelSettingsResponse {
    fn from(settings: &ModelSettings) -> Self {
        Self {
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// Query parameters for the pricing endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuery {
    #[serde(default)]
    pub prompt_tokens: usize,
    #[serde(default)]
    pub response_tokens: usize,
}

/// Cost of one exchange on one model (USD)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateResponse {
    pub key: String,
    pub name: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

impl From<CostEstimate> for CostEstimateResponse {
    fn from(estimate: CostEstimate) -> Self {
        Self {
            key: estimate.key,
            name: estimate.name,
            input_cost: estimate.input_cost,
            output_cost: estimate.output_cost,
            total_cost: estimate.total_cost,
        }
    }
}

/// Cost estimates for every model in the catalog
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    pub estimates: Vec<CostEstimateResponse>,
}
