//! Fine-tune - Translation answers from the fine-tuned model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use workwithtokens::FineTuneAnswer;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FineTuneRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FineTuneResponse {
    pub answer_in_english: String,
    pub answer_in_romanian: String,
    pub translate_to_hebrew: String,
    pub is_it_slang: bool,
}

impl From<FineTuneAnswer> for FineTuneResponse {
    fn from(answer: FineTuneAnswer) -> Self {
        Self {
            answer_in_english: answer.answer_in_english,
            answer_in_romanian: answer.answer_in_romanian,
            translate_to_hebrew: answer.translate_to_hebrew,
            is_it_slang: answer.is_it_slang,
        }
    }
}

/// Body of a failed fine-tune request
#[derive(Debug, Serialize, ToSchema)]
pub struct FineTuneError {
    pub message: String,
    pub error: String,
    pub model: String,
}
