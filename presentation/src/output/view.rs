//! Serializable views of debate results
//!
//! `Debate` holds the participating agents, API keys included, so it is
//! never serialized directly. These views carry only what a transcript
//! needs.

use agora_domain::{Agent, CostLedger, Debate, DebateStatus, Turn};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct DebateView<'a> {
    pub topic: &'a str,
    pub status: DebateStatus,
    pub moderator: &'a str,
    pub participants: Vec<ParticipantView<'a>>,
    pub turns: Vec<&'a Turn>,
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub total_cost: f64,
    pub start_time: String,
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<LedgerView>,
}

impl<'a> DebateView<'a> {
    pub fn new(debate: &'a Debate) -> Self {
        let turns = debate
            .turns()
            .iter()
            .chain((!debate.current_turn().is_empty()).then(|| debate.current_turn()))
            .collect();

        Self {
            topic: debate.topic(),
            status: debate.status(),
            moderator: debate.moderator().name(),
            participants: debate.agents().iter().map(ParticipantView::from).collect(),
            turns,
            total_prompt_tokens: debate.total_prompt_tokens(),
            total_completion_tokens: debate.total_completion_tokens(),
            total_cost: debate.total_cost(),
            start_time: debate.start_time().to_rfc3339(),
            end_time: debate.end_time().map(|t| t.to_rfc3339()),
            ledger: None,
        }
    }

    pub fn with_ledger(mut self, ledger: &CostLedger) -> Self {
        self.ledger = Some(LedgerView::from(ledger));
        self
    }
}

/// An agent as shown in transcripts and listings
#[derive(Debug, Serialize)]
pub struct ParticipantView<'a> {
    pub name: &'a str,
    pub model: &'a str,
    pub is_moderator: bool,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost: f64,
}

impl<'a> From<&'a Agent> for ParticipantView<'a> {
    fn from(agent: &'a Agent) -> Self {
        let usage = agent.token_usage();
        Self {
            name: agent.name(),
            model: agent.model().as_str(),
            is_moderator: agent.is_moderator(),
            prompt_tokens: usage.prompt,
            completion_tokens: usage.completion,
            cost: agent.cost(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerView {
    pub total_tokens: u64,
    pub total_cost: f64,
    pub tokens_by_model: BTreeMap<String, u64>,
    pub cost_by_model: BTreeMap<String, f64>,
}

impl From<&CostLedger> for LedgerView {
    fn from(ledger: &CostLedger) -> Self {
        Self {
            total_tokens: ledger.total_usage(),
            total_cost: ledger.total_cost(),
            tokens_by_model: ledger.usage_by_model(),
            cost_by_model: ledger.cost_by_model(),
        }
    }
}
