//! Pricing policies

use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default flat rate, in currency units per token
pub const DEFAULT_PER_TOKEN: f64 = 0.00001;

/// Turns token counts into a cost. Must be pure.
pub trait PricingPolicy: Send + Sync {
    fn cost(&self, model: &Model, prompt_tokens: u64, completion_tokens: u64) -> f64;
}

/// Same price for every token of every model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatRate {
    pub per_token: f64,
}

impl FlatRate {
    pub fn new(per_token: f64) -> Self {
        Self { per_token }
    }
}

impl Default for FlatRate {
    fn default() -> Self {
        Self::new(DEFAULT_PER_TOKEN)
    }
}

impl PricingPolicy for FlatRate {
    fn cost(&self, _model: &Model, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens.saturating_add(completion_tokens) as f64 * self.per_token
    }
}

/// Per-model rates, quoted per 1000 tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRate {
    pub prompt_per_1k: f64,
    pub completion_per_1k: f64,
}

/// Rate table keyed by model id, falling back to a flat rate
#[derive(Debug, Clone, Default)]
pub struct TablePricing {
    rates: HashMap<String, ModelRate>,
    fallback: FlatRate,
}

impl TablePricing {
    pub fn new(fallback: FlatRate) -> Self {
        Self {
            rates: HashMap::new(),
            fallback,
        }
    }

    pub fn with_rate(mut self, model: impl Into<String>, rate: ModelRate) -> Self {
        self.rates.insert(model.into(), rate);
        self
    }

    pub fn rate(&self, model: &Model) -> Option<&ModelRate> {
        self.rates.get(model.as_str())
    }
}

impl PricingPolicy for TablePricing {
    fn cost(&self, model: &Model, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        match self.rate(model) {
            Some(rate) => {
                prompt_tokens as f64 / 1000.0 * rate.prompt_per_1k
                    + completion_tokens as f64 / 1000.0 * rate.completion_per_1k
            }
            None => self.fallback.cost(model, prompt_tokens, completion_tokens),
        }
    }
}
