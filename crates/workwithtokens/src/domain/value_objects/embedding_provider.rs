//! EmbeddingProvider - APIs that turn text into vectors

use serde::{Deserialize, Serialize};

/// Embedding provider.
///
/// `Nomic` is the public name of the route; the vectors actually come from
/// Voyage AI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    OpenAi,
    Nomic,
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::OpenAi => write!(f, "openai"),
            EmbeddingProvider::Nomic => write!(f, "nomic"),
        }
    }
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAi),
            "nomic" | "voyage" => Ok(EmbeddingProvider::Nomic),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}
