//! Completion gateway port
//!
//! Defines the single capability the orchestrator needs from a model
//! provider: given an agent, a prompt and the rolling history, return reply
//! text plus token counts, or an error.

use agora_domain::{Agent, HistoryEntry, Model, TokenUsage};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while obtaining a completion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("No API key available for agent '{0}'")]
    MissingApiKey(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout(_))
    }
}

/// Everything a provider needs for one call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Name of the calling agent (used to tell its own history entries apart)
    pub agent: String,
    pub model: Model,
    pub api_key: String,
    pub system_prompt: String,
    pub prompt: String,
    /// History as it stood before this call, oldest first
    pub history: Vec<HistoryEntry>,
}

impl CompletionRequest {
    pub fn for_agent(agent: &Agent, prompt: impl Into<String>, history: Vec<HistoryEntry>) -> Self {
        Self {
            agent: agent.name().to_string(),
            model: agent.model().clone(),
            api_key: agent.api_key().to_string(),
            system_prompt: agent.system_prompt().to_string(),
            prompt: prompt.into(),
            history,
        }
    }
}

/// A successful completion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    /// Reply text; empty if the provider returned none
    pub content: String,
    /// Token counts, if the provider reported them
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.usage = Some(TokenUsage::new(prompt_tokens, completion_tokens));
        self
    }
}

/// Gateway for model completions
///
/// Implementations (adapters) live in the infrastructure layer. Timeouts are
/// applied by the caller.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_copies_agent_fields() {
        let agent = Agent::new("Ada", "sk-1", "openai/gpt-4o", "Argue for.");
        let history = vec![HistoryEntry::new("Bob", "hi")];
        let request = CompletionRequest::for_agent(&agent, "Open", history.clone());

        assert_eq!(request.agent, "Ada");
        assert_eq!(request.model.as_str(), "openai/gpt-4o");
        assert_eq!(request.api_key, "sk-1");
        assert_eq!(request.system_prompt, "Argue for.");
        assert_eq!(request.prompt, "Open");
        assert_eq!(request.history, history);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            GatewayError::Timeout(Duration::from_millis(1500)).to_string(),
            "Request timed out after 1.5s"
        );
        assert_eq!(
            GatewayError::Http {
                status: 429,
                message: "rate limited".to_string()
            }
            .to_string(),
            "HTTP 429: rate limited"
        );
        assert!(GatewayError::Timeout(Duration::from_secs(1)).is_timeout());
    }
}
