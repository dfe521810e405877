//! Message entity: one agent's contribution to a debate

use crate::agent::entities::{Agent, TokenUsage};
use crate::core::model::Model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the completion call behind a message ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOutcome {
    /// The model answered; `content` is its reply
    Completed,
    /// The call failed; `content` describes the failure
    Failed,
}

/// A single agent's contribution (Entity)
///
/// The producing agent is referenced by name, never owned. Everything except
/// the usage fields is fixed at construction; usage is attached once via
/// [`Message::with_usage`] before the message is recorded anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    speaker: String,
    model: Model,
    content: String,
    timestamp: DateTime<Utc>,
    prompt_tokens: u64,
    completion_tokens: u64,
    cost: f64,
    outcome: MessageOutcome,
}

impl Message {
    /// A successful reply from `agent`
    pub fn completed(agent: &Agent, content: impl Into<String>) -> Self {
        Self::build(agent, content.into(), MessageOutcome::Completed)
    }

    /// A failed call rendered as conversation content
    pub fn failed(agent: &Agent, description: impl Into<String>) -> Self {
        Self::build(agent, description.into(), MessageOutcome::Failed)
    }

    fn build(agent: &Agent, content: String, outcome: MessageOutcome) -> Self {
        Self {
            speaker: agent.name().to_string(),
            model: agent.model().clone(),
            content,
            timestamp: Utc::now(),
            prompt_tokens: 0,
            completion_tokens: 0,
            cost: 0.0,
            outcome,
        }
    }

    /// Attach token usage and cost
    pub fn with_usage(mut self, usage: TokenUsage, cost: f64) -> Self {
        self.prompt_tokens = usage.prompt;
        self.completion_tokens = usage.completion;
        self.cost = cost;
        self
    }

    /// Name of the agent that produced this message
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    pub fn completion_tokens(&self) -> u64 {
        self.completion_tokens
    }

    pub fn usage(&self) -> TokenUsage {
        TokenUsage::new(self.prompt_tokens, self.completion_tokens)
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn outcome(&self) -> MessageOutcome {
        self.outcome
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == MessageOutcome::Failed
    }
}
