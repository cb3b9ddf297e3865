//! GPT-4 BPE token counter

use tiktoken_rs::CoreBPE;
use workwithtokens::TokenCounter;

/// Counts tokens with `cl100k_base`
pub struct TiktokenCounter {
    bpe: Option<CoreBPE>,
}

impl TiktokenCounter {
    pub fn new() -> Self {
        let bpe = match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                tracing::warn!("cl100k_base unavailable, token counts will be 0: {}", e);
                None
            }
        };
        Self { bpe }
    }
}

impl Default for TiktokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe
            .as_ref()
            .map(|bpe| bpe.encode_with_special_tokens(text).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_known_text() {
        let counter = TiktokenCounter::new();
        assert_eq!(counter.count("hello world"), 2);
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn test_longer_text_has_more_tokens() {
        let counter = TiktokenCounter::new();
        let short = counter.count("Rust");
        let long = counter.count("Rust is a systems programming language focused on safety.");
        assert!(long > short);
    }
}
