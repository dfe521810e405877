//! Gateway configuration from TOML (`[gateway]` section)

use agora_application::BehaviorConfig;
use agora_application::config::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Environment variable holding the fallback API key
    pub api_key_env: String,
    /// Direct fallback API key (not recommended; use the env var instead)
    pub api_key: Option<String>,
    /// Per-call timeout in seconds; 0 disables the limit
    pub timeout_seconds: u64,
    /// Optional cap on reply length
    pub max_tokens: Option<u32>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_tokens: None,
        }
    }
}

impl FileGatewayConfig {
    /// Timeout settings for the orchestrator
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(Some(self.timeout_seconds))
    }

    /// Key used when an agent has none of its own.
    ///
    /// A direct `api_key` wins over the environment variable. Empty values
    /// count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_gateway_defaults() {
        let config = FileGatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.behavior().timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = FileGatewayConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.behavior().timeout.is_none());
    }

    #[test]
    fn test_direct_key_wins() {
        let config = FileGatewayConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "AGORA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-direct"));

        let empty = FileGatewayConfig {
            api_key: Some(String::new()),
            api_key_env: "AGORA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(empty.resolve_api_key().is_none());
    }
}
