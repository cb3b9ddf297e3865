//! Embedding - Vectors and word similarity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Text to embed
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmbedRequest {
    #[serde(default)]
    pub text: String,
}

/// Embedding vector
#[derive(Debug, Serialize, ToSchema)]
pub struct EmbedResponse {
    /// Number of dimensions
    pub length: usize,
    pub vector: Vec<f32>,
}

impl From<Vec<f32>> for EmbedResponse {
    fn from(vector: Vec<f32>) -> Self {
        Self {
            length: vector.len(),
            vector,
        }
    }
}

/// Two words to compare
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompareRequest {
    #[serde(default)]
    pub word1: String,
    #[serde(default)]
    pub word2: String,
}

/// Similarity of two words
#[derive(Debug, Serialize, ToSchema)]
pub struct CompareResponse {
    pub word1: String,
    pub word2: String,
    /// Cosine similarity as a percentage ("87.12%")
    pub similarity: String,
    #[serde(rename = "similarityExplanation")]
    pub similarity_explanation: String,
    /// First five vector components, 4 decimals
    pub word1_preview: Vec<f64>,
    pub word2_preview: Vec<f64>,
}
