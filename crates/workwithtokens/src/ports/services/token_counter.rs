//! Token Counter Port

/// Counts tokens the way the provider's tokenizer would
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`; 0 when the text cannot be tokenized
    fn count(&self, text: &str) -> usize;
}
