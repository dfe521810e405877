//! Turn entity: one numbered round of a debate

use super::message::Message;
use crate::agent::entities::TokenUsage;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A numbered round (Entity)
///
/// `messages` keep speaking order. The rollups always equal the sum over
/// `messages` plus `summary`; they are updated by the same call that adds
/// a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    turn_number: u32,
    messages: Vec<Message>,
    summary: Option<Message>,
    is_last_turn: bool,
    prompt_tokens: u64,
    completion_tokens: u64,
    cost: f64,
}

impl Turn {
    pub fn new(turn_number: u32) -> Self {
        Self {
            turn_number,
            messages: Vec::new(),
            summary: None,
            is_last_turn: false,
            prompt_tokens: 0,
            completion_tokens: 0,
            cost: 0.0,
        }
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn summary(&self) -> Option<&Message> {
        self.summary.as_ref()
    }

    pub fn is_last_turn(&self) -> bool {
        self.is_last_turn
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

    /// True if nothing was said in this turn
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.summary.is_none()
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.absorb(&message);
        self.messages.push(message);
    }

    /// Set the moderator summary. A turn holds at most one.
    pub(crate) fn set_summary(&mut self, summary: Message) -> Result<(), DomainError> {
        if self.summary.is_some() {
            return Err(DomainError::SummaryAlreadyRecorded(self.turn_number));
        }
        self.absorb(&summary);
        self.summary = Some(summary);
        Ok(())
    }

    pub(crate) fn mark_last(&mut self) {
        self.is_last_turn = true;
    }

    fn absorb(&mut self, message: &Message) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(message.prompt_tokens());
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(message.completion_tokens());
        self.cost += message.cost();
    }
}
