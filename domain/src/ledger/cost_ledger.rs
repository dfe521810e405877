//! Cross-debate token and cost accumulator

use crate::agent::entities::TokenUsage;
use std::collections::BTreeMap;

/// Running totals for one model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelUsage {
    pub usage: TokenUsage,
    pub cost: f64,
}

/// Accumulates token usage and cost per model across a whole run.
///
/// Independent of any single debate's rollups; it is only cleared by
/// [`CostLedger::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostLedger {
    by_model: BTreeMap<String, ModelUsage>,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add usage for `model`.
    ///
    /// Never fails. A negative or non-finite cost is recorded as zero.
    pub fn add_usage(
        &mut self,
        model: impl Into<String>,
        prompt_tokens: u64,
        completion_tokens: u64,
        cost: f64,
    ) {
        let cost = if cost.is_finite() && cost > 0.0 {
            cost
        } else {
            0.0
        };
        let entry = self.by_model.entry(model.into()).or_default();
        entry
            .usage
            .accumulate(TokenUsage::new(prompt_tokens, completion_tokens));
        entry.cost += cost;
    }

    /// Total tokens (prompt + completion) across all models
    pub fn total_usage(&self) -> u64 {
        self.by_model
            .values()
            .fold(0u64, |acc, u| acc.saturating_add(u.usage.total()))
    }

    pub fn total_cost(&self) -> f64 {
        self.by_model.values().map(|u| u.cost).sum()
    }

    /// Snapshot of total tokens per model
    pub fn usage_by_model(&self) -> BTreeMap<String, u64> {
        self.by_model
            .iter()
            .map(|(model, u)| (model.clone(), u.usage.total()))
            .collect()
    }

    /// Snapshot of cost per model
    pub fn cost_by_model(&self) -> BTreeMap<String, f64> {
        self.by_model
            .iter()
            .map(|(model, u)| (model.clone(), u.cost))
            .collect()
    }

    /// Detailed totals for a single model
    pub fn model(&self, model: &str) -> Option<ModelUsage> {
        self.by_model.get(model).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }

    /// Clear all accumulated state
    pub fn reset(&mut self) {
        self.by_model.clear();
    }
}
