//! FineTuneAnswer - Schema the fine-tuned translation model answers with

use serde::{Deserialize, Serialize};

/// Answer produced by the fine-tuned model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTuneAnswer {
    pub answer_in_english: String,
    pub answer_in_romanian: String,
    pub translate_to_hebrew: String,
    pub is_it_slang: bool,
}
