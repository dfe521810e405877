//! Agent domain entities

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Prompt/completion token counts (Value Object)
///
/// Serialized as `{"prompt": .., "completion": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
}

impl TokenUsage {
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self { prompt, completion }
    }

    pub fn total(&self) -> u64 {
        self.prompt.saturating_add(self.completion)
    }

    pub fn is_zero(&self) -> bool {
        self.prompt == 0 && self.completion == 0
    }

    /// Add another usage to this one in place
    pub fn accumulate(&mut self, other: TokenUsage) {
        self.prompt = self.prompt.saturating_add(other.prompt);
        self.completion = self.completion.saturating_add(other.completion);
    }
}

impl std::ops::Add for TokenUsage {
    type Output = TokenUsage;

    fn add(mut self, rhs: TokenUsage) -> TokenUsage {
        self.accumulate(rhs);
        self
    }
}

/// A debate participant (Entity)
///
/// Identity is the `name`. The running `token_usage`/`cost` are only ever
/// increased through [`Agent::record_usage`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    name: String,
    api_key: String,
    model: Model,
    system_prompt: String,
    is_moderator: bool,
    #[serde(default)]
    token_usage: TokenUsage,
    #[serde(default)]
    cost: f64,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<Model>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            model: model.into(),
            system_prompt: system_prompt.into(),
            is_moderator: false,
            token_usage: TokenUsage::default(),
            cost: 0.0,
        }
    }

    /// Flag this agent as (a candidate) moderator
    pub fn with_moderator(mut self, is_moderator: bool) -> Self {
        self.is_moderator = is_moderator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn is_moderator(&self) -> bool {
        self.is_moderator
    }

    pub fn token_usage(&self) -> TokenUsage {
        self.token_usage
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Accumulate usage and cost produced by this agent
    pub fn record_usage(&mut self, usage: TokenUsage, cost: f64) {
        self.token_usage.accumulate(usage);
        self.cost += cost;
    }

    /// Overwrite the running totals
    pub fn set_usage(&mut self, usage: TokenUsage, cost: f64) {
        self.token_usage = usage;
        self.cost = cost;
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("model", &self.model)
            .field("is_moderator", &self.is_moderator)
            .field("token_usage", &self.token_usage)
            .field("cost", &self.cost)
            .finish()
    }
}

/// Mask all but the last four characters of a credential
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_starts_empty() {
        let agent = Agent::new("Ada", "sk-1", "openai/gpt-4o", "You argue for.");
        assert_eq!(agent.name(), "Ada");
        assert_eq!(agent.model().as_str(), "openai/gpt-4o");
        assert!(!agent.is_moderator());
        assert!(agent.token_usage().is_zero());
        assert_eq!(agent.cost(), 0.0);
    }

    #[test]
    fn test_record_usage_accumulates() {
        let mut agent = Agent::new("Ada", "k", "m", "");
        agent.record_usage(TokenUsage::new(10, 5), 0.15);
        agent.record_usage(TokenUsage::new(2, 1), 0.03);
        assert_eq!(agent.token_usage(), TokenUsage::new(12, 6));
        assert!((agent.cost() - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_token_usage_saturates() {
        let mut usage = TokenUsage::new(u64::MAX - 1, 5);
        usage.accumulate(TokenUsage::new(10, 1));
        assert_eq!(usage, TokenUsage::new(u64::MAX, 6));
        assert_eq!(usage.total(), u64::MAX);
    }

    #[test]
    fn test_token_usage_serialized_keys() {
        let json = serde_json::to_value(TokenUsage::new(3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"prompt": 3, "completion": 4}));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let agent = Agent::new("Ada", "sk-secret-1234", "m", "");
        let debug = format!("{:?}", agent);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("1234"));
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask_api_key("abc"), "***");
        assert_eq!(mask_api_key(""), "");
    }

    #[test]
    fn test_missing_moderator_flag_is_rejected() {
        let json = r#"{"name":"A","api_key":"k","model":"m","system_prompt":""}"#;
        assert!(serde_json::from_str::<Agent>(json).is_err());
    }

    #[test]
    fn test_usage_fields_default_when_absent() {
        let json =
            r#"{"name":"A","api_key":"k","model":"m","system_prompt":"","is_moderator":true}"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert!(agent.is_moderator());
        assert!(agent.token_usage().is_zero());
    }
}
