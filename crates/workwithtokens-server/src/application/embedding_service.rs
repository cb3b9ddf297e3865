//! Embedding Application Service (Use Case)
//!
//! Vectors from the embedding providers and word comparison by cosine
//! similarity, with a plain-English explanation of the score.

use std::sync::Arc;

use workwithtokens::domain::services::prompts::{
    similarity_prompt, SIMILARITY_FALLBACK, SIMILARITY_SYSTEM_PROMPT,
};
use workwithtokens::domain::services::vector::{cosine_similarity, preview};
use workwithtokens::{
    ChatMessage, CompletionOptions, DomainError, EmbeddingProvider, EmbeddingService, LlmProvider,
};

/// Result of comparing two words
#[derive(Debug, Clone)]
pub struct WordComparison {
    pub word1: String,
    pub word2: String,
    pub similarity: f64,
    pub explanation: String,
    pub word1_preview: Vec<f64>,
    pub word2_preview: Vec<f64>,
}

/// Application service for embedding operations
pub struct VectorService {
    openai: Option<Arc<dyn EmbeddingService>>,
    voyage: Option<Arc<dyn EmbeddingService>>,
    explainer: Option<Arc<dyn LlmProvider>>,
}

impl VectorService {
    pub fn new(
        openai: Option<Arc<dyn EmbeddingService>>,
        voyage: Option<Arc<dyn EmbeddingService>>,
        explainer: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        Self {
            openai,
            voyage,
            explainer,
        }
    }

    fn embedder(&self, provider: EmbeddingProvider) -> Option<&Arc<dyn EmbeddingService>> {
        match provider {
            EmbeddingProvider::OpenAi => self.openai.as_ref(),
            EmbeddingProvider::Nomic => self.voyage.as_ref(),
        }
    }

    pub fn is_configured(&self, provider: EmbeddingProvider) -> bool {
        self.embedder(provider).is_some()
    }

    /// Embed `text` with `provider`
    pub async fn embed(
        &self,
        provider: EmbeddingProvider,
        text: &str,
    ) -> Result<Vec<f32>, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("Text is required".to_string()));
        }
        let embedder = self
            .embedder(provider)
            .ok_or_else(|| DomainError::external(format!("{} is not configured", provider)))?;

        let vector = embedder.embed(text).await?;
        tracing::debug!(
            "Embedded {} chars with {} into {} dimensions",
            text.len(),
            embedder.model_id(),
            vector.len()
        );
        Ok(vector)
    }

    /// Embed both words with OpenAI and explain their similarity
    pub async fn compare(&self, word1: &str, word2: &str) -> Result<WordComparison, DomainError> {
        if word1.trim().is_empty() || word2.trim().is_empty() {
            return Err(DomainError::Validation(
                "Both word1 and word2 are required".to_string(),
            ));
        }

        let v1 = self.embed(EmbeddingProvider::OpenAi, word1).await?;
        let v2 = self.embed(EmbeddingProvider::OpenAi, word2).await?;
        let similarity = cosine_similarity(&v1, &v2)?;
        let explanation = self.explain(word1, word2, similarity).await;

        Ok(WordComparison {
            word1: word1.to_string(),
            word2: word2.to_string(),
            similarity,
            explanation,
            word1_preview: preview(&v1),
            word2_preview: preview(&v2),
        })
    }

    /// Never fails; falls back to a generic sentence
    async fn explain(&self, word1: &str, word2: &str, similarity: f64) -> String {
        let Some(llm) = &self.explainer else {
            return SIMILARITY_FALLBACK.to_string();
        };

        let messages = [
            ChatMessage::system(SIMILARITY_SYSTEM_PROMPT),
            ChatMessage::user(similarity_prompt(word1, word2, similarity)),
        ];

        match llm
            .complete(&messages, &CompletionOptions::new(100, 0.7))
            .await
        {
            Ok(response) if !response.content.trim().is_empty() => {
                response.content.trim().to_string()
            }
            Ok(_) => SIMILARITY_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!("Similarity explanation failed: {}", e);
                SIMILARITY_FALLBACK.to_string()
            }
        }
    }
}
