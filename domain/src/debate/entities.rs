//! Debate aggregate root

use super::message::Message;
use super::turn::Turn;
use crate::agent::entities::{Agent, TokenUsage};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle state of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateStatus {
    Active,
    Concluded,
}

/// A debate session (Aggregate Root)
///
/// Owns its turns and the snapshot of participating agents. Exactly one
/// turn is open at a time and `current_turn().turn_number() == turns().len() + 1`.
#[derive(Debug, Clone)]
pub struct Debate {
    topic: String,
    agents: Vec<Agent>,
    moderator: usize,
    turns: Vec<Turn>,
    current_turn: Turn,
    total_prompt_tokens: u64,
    total_completion_tokens: u64,
    total_cost: f64,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    status: DebateStatus,
}

impl Debate {
    /// Start a debate on `topic` with turn 1 open.
    ///
    /// The moderator is chosen by [`Debate::select_moderator`]. Participant
    /// names must be unique within a debate, since usage and history are
    /// attributed by name.
    pub fn start(topic: impl Into<String>, agents: Vec<Agent>) -> Result<Self, DomainError> {
        let moderator = Self::select_moderator(&agents).ok_or(DomainError::EmptyAgentList)?;
        let mut seen = HashSet::new();
        if let Some(duplicate) = agents.iter().find(|a| !seen.insert(a.name())) {
            return Err(DomainError::DuplicateAgentName(duplicate.name().to_string()));
        }
        Ok(Self {
            topic: topic.into(),
            agents,
            moderator,
            turns: Vec::new(),
            current_turn: Turn::new(1),
            total_prompt_tokens: 0,
            total_completion_tokens: 0,
            total_cost: 0.0,
            start_time: Utc::now(),
            end_time: None,
            status: DebateStatus::Active,
        })
    }

    /// Index of the moderator: the first agent flagged `is_moderator`,
    /// otherwise the first agent. `None` only for an empty list.
    pub fn select_moderator(agents: &[Agent]) -> Option<usize> {
        if agents.is_empty() {
            return None;
        }
        Some(agents.iter().position(|a| a.is_moderator()).unwrap_or(0))
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn moderator(&self) -> &Agent {
        &self.agents[self.moderator]
    }

    /// Participants other than the moderator, in roster order
    pub fn debaters(&self) -> impl Iterator<Item = &Agent> {
        self.agents
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.moderator)
            .map(|(_, a)| a)
    }

    /// Participant with the given name
    pub fn participant(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Sealed turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn current_turn(&self) -> &Turn {
        &self.current_turn
    }

    pub fn total_prompt_tokens(&self) -> u64 {
        self.total_prompt_tokens
    }

    pub fn total_completion_tokens(&self) -> u64 {
        self.total_completion_tokens
    }

    pub fn total_usage(&self) -> TokenUsage {
        TokenUsage::new(self.total_prompt_tokens, self.total_completion_tokens)
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn status(&self) -> DebateStatus {
        self.status
    }

    pub fn is_concluded(&self) -> bool {
        self.status == DebateStatus::Concluded
    }

    /// Total number of messages said so far, summaries included
    pub fn message_count(&self) -> usize {
        self.turns
            .iter()
            .chain(std::iter::once(&self.current_turn))
            .map(|t| t.messages().len() + usize::from(t.summary().is_some()))
            .sum()
    }

    /// Check that `name` may speak in the current state
    pub fn ensure_can_speak(&self, name: &str) -> Result<(), DomainError> {
        self.ensure_active()?;
        if self.participant(name).is_none() {
            return Err(DomainError::UnknownParticipant(name.to_string()));
        }
        Ok(())
    }

    /// Append a regular message to the current turn and roll its usage up
    /// into the turn, the debate and the speaking participant.
    pub fn record_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_can_speak(message.speaker())?;
        self.roll_up(&message);
        self.current_turn.push_message(message);
        Ok(())
    }

    /// Check that `name` may record the current turn's summary
    pub fn ensure_can_summarize(&self, name: &str) -> Result<(), DomainError> {
        self.ensure_can_speak(name)?;
        if self.current_turn.summary().is_some() {
            return Err(DomainError::SummaryAlreadyRecorded(
                self.current_turn.turn_number(),
            ));
        }
        Ok(())
    }

    /// Store the moderator's summary for the current turn.
    ///
    /// Each turn takes one summary; a second one is refused.
    pub fn record_summary(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_can_summarize(message.speaker())?;
        self.current_turn.set_summary(message.clone())?;
        self.roll_up(&message);
        Ok(())
    }

    /// Flag the current turn as the final one.
    ///
    /// This is informational; it does not stop the debate.
    pub fn mark_last_turn(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.current_turn.mark_last();
        Ok(())
    }

    /// Seal the current turn and open the next one.
    ///
    /// Returns the number of the sealed turn.
    pub fn close_turn(&mut self) -> Result<u32, DomainError> {
        self.ensure_active()?;
        Ok(self.seal_current_turn())
    }

    /// Move to the terminal state and record the end time.
    ///
    /// A current turn that holds anything is sealed first; an empty one is
    /// left open so the turn-number invariant still holds.
    pub fn conclude(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;
        if !self.current_turn.is_empty() {
            self.seal_current_turn();
        }
        self.status = DebateStatus::Concluded;
        self.end_time = Some(Utc::now());
        Ok(())
    }

    fn seal_current_turn(&mut self) -> u32 {
        let next = Turn::new(self.turns.len() as u32 + 2);
        let sealed = std::mem::replace(&mut self.current_turn, next);
        let number = sealed.turn_number();
        self.turns.push(sealed);
        number
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        match self.status {
            DebateStatus::Active => Ok(()),
            DebateStatus::Concluded => Err(DomainError::DebateConcluded),
        }
    }

    fn roll_up(&mut self, message: &Message) {
        self.total_prompt_tokens = self
            .total_prompt_tokens
            .saturating_add(message.prompt_tokens());
        self.total_completion_tokens = self
            .total_completion_tokens
            .saturating_add(message.completion_tokens());
        self.total_cost += message.cost();
        if let Some(agent) = self
            .agents
            .iter_mut()
            .find(|a| a.name() == message.speaker())
        {
            agent.record_usage(message.usage(), message.cost());
        }
    }
}
