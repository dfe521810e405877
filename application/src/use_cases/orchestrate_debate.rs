//! Debate orchestrator
//!
//! Owns the single active [`Debate`], the rolling conversation history and
//! the run-wide [`CostLedger`]. All state lives behind one async mutex that
//! is held across the completion call, so turns are serialized in the order
//! callers invoke them and no call ever sees a history from the future.

use crate::config::BehaviorConfig;
use crate::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use agora_domain::registry::validation::check_moderator_flags;
use agora_domain::{
    Agent, ConversationHistory, CostLedger, Debate, DomainError, FlatRate, HistoryEntry, Message,
    PricingPolicy,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Default)]
struct OrchestratorState {
    debate: Option<Debate>,
    history: ConversationHistory,
    ledger: CostLedger,
}

/// Where a produced message goes in the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Message,
    Summary,
}

/// Drives turn progression for one debate at a time
pub struct DebateOrchestrator<G: CompletionGateway + 'static> {
    gateway: Arc<G>,
    pricing: Arc<dyn PricingPolicy>,
    behavior: BehaviorConfig,
    state: Mutex<OrchestratorState>,
}

impl<G: CompletionGateway + 'static> DebateOrchestrator<G> {
    /// Orchestrator with the default flat pricing and behavior
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            pricing: Arc::new(FlatRate::default()),
            behavior: BehaviorConfig::default(),
            state: Mutex::new(OrchestratorState::default()),
        }
    }

    pub fn with_pricing(mut self, pricing: Arc<dyn PricingPolicy>) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Start a new debate, discarding any previous one.
    ///
    /// The moderator is the first agent flagged `is_moderator`, else the
    /// first agent. History is reset; the cost ledger is not.
    pub async fn start_debate(
        &self,
        topic: impl Into<String>,
        agents: Vec<Agent>,
    ) -> Result<Debate, DomainError> {
        for issue in check_moderator_flags(agents.iter().map(|a| (a.name(), a.is_moderator()))) {
            if issue.is_ambiguous() {
                warn!("{}", issue.message);
            }
        }

        let debate = Debate::start(topic, agents)?;
        info!(
            "Starting debate on '{}' with {} agents (moderator: {})",
            debate.topic(),
            debate.agents().len(),
            debate.moderator().name()
        );

        let mut state = self.state.lock().await;
        if state.debate.is_some() {
            debug!("Discarding previous debate");
        }
        state.history.clear();
        state.debate = Some(debate.clone());
        Ok(debate)
    }

    /// Ask `agent` to respond to `prompt` and record the result.
    ///
    /// A failed or timed-out call still produces a message: its content is
    /// the failure description and its usage is zero. Only lifecycle and
    /// participant errors are returned as `Err`.
    pub async fn agent_turn(&self, agent: &Agent, prompt: &str) -> Result<Message, DomainError> {
        self.speak(agent, prompt, Slot::Message).await
    }

    /// Ask the moderator to summarize the current turn.
    ///
    /// The reply is stored as the turn's summary rather than as a regular
    /// message, and is appended to the history like any other message.
    /// A turn that already has a summary is refused without calling the
    /// gateway.
    pub async fn moderator_summary(&self, prompt: &str) -> Result<Message, DomainError> {
        let moderator = {
            let state = self.state.lock().await;
            let debate = state.debate.as_ref().ok_or(DomainError::NoActiveDebate)?;
            debate.moderator().clone()
        };
        self.speak(&moderator, prompt, Slot::Summary).await
    }

    /// Flag the current turn as the last one
    pub async fn mark_last_turn(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let debate = state.debate.as_mut().ok_or(DomainError::NoActiveDebate)?;
        debate.mark_last_turn()
    }

    /// Seal the current turn and open the next.
    ///
    /// Returns the sealed turn number, or `None` when no debate has been
    /// started (a no-op).
    pub async fn end_turn(&self) -> Result<Option<u32>, DomainError> {
        let mut state = self.state.lock().await;
        let Some(debate) = state.debate.as_mut() else {
            debug!("end_turn called without an active debate");
            return Ok(None);
        };
        let sealed = debate.close_turn()?;
        info!(
            "Turn {} sealed ({} turns so far)",
            sealed,
            debate.turns().len()
        );
        Ok(Some(sealed))
    }

    /// Conclude the active debate and return its final state.
    ///
    /// Later turn operations fail with [`DomainError::DebateConcluded`]
    /// until a new debate is started.
    pub async fn conclude_debate(&self) -> Result<Debate, DomainError> {
        let mut state = self.state.lock().await;
        let debate = state.debate.as_mut().ok_or(DomainError::NoActiveDebate)?;
        debate.conclude()?;
        info!(
            "Debate concluded after {} turns: {} tokens, cost {:.6}",
            debate.turns().len(),
            debate.total_usage().total(),
            debate.total_cost()
        );
        Ok(debate.clone())
    }

    /// Snapshot of the current debate, if any
    pub async fn debate(&self) -> Option<Debate> {
        self.state.lock().await.debate.clone()
    }

    /// Snapshot of the rolling history
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history.snapshot()
    }

    /// Snapshot of the run-wide cost ledger
    pub async fn ledger(&self) -> CostLedger {
        self.state.lock().await.ledger.clone()
    }

    /// Clear the run-wide cost ledger
    pub async fn reset_ledger(&self) {
        self.state.lock().await.ledger.reset();
    }

    async fn speak(&self, agent: &Agent, prompt: &str, slot: Slot) -> Result<Message, DomainError> {
        let mut guard = self.state.lock().await;
        let active = guard.debate.as_ref().ok_or(DomainError::NoActiveDebate)?;
        match slot {
            Slot::Message => active.ensure_can_speak(agent.name())?,
            Slot::Summary => active.ensure_can_summarize(agent.name())?,
        }

        let request = CompletionRequest::for_agent(agent, prompt, guard.history.snapshot());
        let message = self.produce(agent, &request).await;

        let OrchestratorState {
            debate,
            history,
            ledger,
        } = &mut *guard;
        let debate = debate.as_mut().ok_or(DomainError::NoActiveDebate)?;
        match slot {
            Slot::Message => debate.record_message(message.clone())?,
            Slot::Summary => debate.record_summary(message.clone())?,
        }
        history.push(agent.name(), message.content());
        if !message.is_failed() {
            ledger.add_usage(
                agent.model().as_str(),
                message.prompt_tokens(),
                message.completion_tokens(),
                message.cost(),
            );
        }
        Ok(message)
    }

    /// Run the completion call and turn its outcome into a message
    async fn produce(&self, agent: &Agent, request: &CompletionRequest) -> Message {
        debug!(
            "Calling {} for agent {} with {} history entries",
            agent.model(),
            agent.name(),
            request.history.len()
        );

        match self.call_gateway(request).await {
            Ok(Completion { content, usage }) => {
                let Some(usage) = usage else {
                    debug!("No usage reported for agent {}", agent.name());
                    return Message::completed(agent, content);
                };
                let cost = self
                    .pricing
                    .cost(agent.model(), usage.prompt, usage.completion);
                info!(
                    agent = agent.name(),
                    model = agent.model().as_str(),
                    prompt_tokens = usage.prompt,
                    completion_tokens = usage.completion,
                    "API call completed"
                );
                Message::completed(agent, content).with_usage(usage, cost)
            }
            Err(e) => {
                warn!("Agent {} turn failed: {}", agent.name(), e);
                Message::failed(agent, e.to_string())
            }
        }
    }

    async fn call_gateway(&self, request: &CompletionRequest) -> Result<Completion, GatewayError> {
        match self.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.complete(request))
                .await
                .unwrap_or(Err(GatewayError::Timeout(limit))),
            None => self.gateway.complete(request).await,
        }
    }
}
