//! Token cost estimates for well-known models
//!
//! Prices are USD per 1 000 tokens.

use serde::{Deserialize, Serialize};

/// Price card of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPricing {
    pub key: String,
    pub name: String,
    pub input_price: f64,
    pub output_price: f64,
}

impl ModelPricing {
    fn new(key: &str, name: &str, input_price: f64, output_price: f64) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            input_price,
            output_price,
        }
    }
}

/// Estimated cost of one exchange on one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub key: String,
    pub name: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

/// Pricing catalog, in display order
pub fn catalog() -> Vec<ModelPricing> {
    vec![
        ModelPricing::new("gpt4", "GPT-4", 0.03, 0.06),
        ModelPricing::new("gpt4-turbo", "GPT-4 Turbo", 0.01, 0.03),
        ModelPricing::new("gpt35", "GPT-3.5 Turbo", 0.0015, 0.002),
        ModelPricing::new("claude-opus", "Claude 3 Opus", 0.015, 0.075),
        ModelPricing::new("claude-sonnet", "Claude 3.5 Sonnet", 0.003, 0.015),
        ModelPricing::new("claude-haiku", "Claude 3 Haiku", 0.00025, 0.00125),
    ]
}

/// Cost of `prompt_tokens` in and `response_tokens` out on `pricing`
pub fn estimate_cost(
    pricing: &ModelPricing,
    prompt_tokens: usize,
    response_tokens: usize,
) -> CostEstimate {
    let input_cost = (prompt_tokens as f64 / 1000.0) * pricing.input_price;
    let output_cost = (response_tokens as f64 / 1000.0) * pricing.output_price;
    CostEstimate {
        key: pricing.key.clone(),
        name: pricing.name.clone(),
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}

/// Estimates for every model in the catalog
pub fn estimate_all(prompt_tokens: usize, response_tokens: usize) -> Vec<CostEstimate> {
    catalog()
        .iter()
        .map(|p| estimate_cost(p, prompt_tokens, response_tokens))
        .collect()
}

/// Minimum bar width for any non-zero cost
const MIN_VISIBLE_PERCENT: f64 = 6.0;

/// Width (0-100) of a cost bar relative to the most expensive model.
///
/// Log-scaled so one outlier does not flatten everything else.
pub fn relative_bar_percent(cost: f64, max_cost: f64) -> u32 {
    if max_cost <= 0.0 || cost <= 0.0 {
        return 0;
    }
    let scaled = ((cost + 1.0).ln() / (max_cost + 1.0).ln() * 100.0).round();
    scaled.clamp(MIN_VISIBLE_PERCENT, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_cost() {
        let gpt4 = &catalog()[0];
        assert_eq!(gpt4.key, "gpt4");
        let estimate = estimate_cost(gpt4, 1000, 500);
        assert!((estimate.input_cost - 0.03).abs() < 1e-12);
        assert!((estimate.output_cost - 0.03).abs() < 1e-12);
        assert!((estimate.total_cost - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_all_covers_catalog_in_order() {
        let all = estimate_all(10, 10);
        let keys: Vec<_> = all.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "gpt4",
                "gpt4-turbo",
                "gpt35",
                "claude-opus",
                "claude-sonnet",
                "claude-haiku"
            ]
        );
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        assert!(estimate_all(0, 0).iter().all(|e| e.total_cost == 0.0));
    }

    #[test]
    fn test_bar_percent() {
        assert_eq!(relative_bar_percent(0.0, 1.0), 0);
        assert_eq!(relative_bar_percent(1.0, 0.0), 0);
        assert_eq!(relative_bar_percent(2.0, 2.0), 100);
        // Tiny but non-zero costs stay visible
        assert_eq!(relative_bar_percent(0.000001, 5.0), 6);
    }
}
