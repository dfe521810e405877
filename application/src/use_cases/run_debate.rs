//! Run Debate use case
//!
//! Drives a scripted round-robin debate on top of [`DebateOrchestrator`]:
//! every debater speaks once per turn, then the moderator summarizes.

use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::observer::{DebateObserver, NoObserver};
use crate::use_cases::orchestrate_debate::DebateOrchestrator;
use agora_domain::{Agent, CostLedger, Debate, DomainError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during a scripted debate
#[derive(Error, Debug, PartialEq)]
pub enum RunDebateError {
    #[error("A debate needs at least one turn")]
    NoTurns,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Prompt templates for each phase of a turn.
///
/// `{topic}` and `{turn}` are substituted before the prompt is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct DebatePrompts {
    pub opening: String,
    pub rebuttal: String,
    pub summary: String,
}

impl Default for DebatePrompts {
    fn default() -> Self {
        Self {
            opening: "The topic of this debate is: {topic}\n\
                      State your opening position in a few paragraphs."
                .to_string(),
            rebuttal: "This is turn {turn} of the debate on: {topic}\n\
                       Respond to the arguments made so far and strengthen your position."
                .to_string(),
            summary: "As moderator, summarize turn {turn} of the debate on: {topic}\n\
                      Note where the participants agree and where they still differ."
                .to_string(),
        }
    }
}

impl DebatePrompts {
    fn render(template: &str, topic: &str, turn: u32) -> String {
        template
            .replace("{topic}", topic)
            .replace("{turn}", &turn.to_string())
    }

    pub fn opening_for(&self, topic: &str) -> String {
        Self::render(&self.opening, topic, 1)
    }

    pub fn rebuttal_for(&self, topic: &str, turn: u32) -> String {
        Self::render(&self.rebuttal, topic, turn)
    }

    pub fn summary_for(&self, topic: &str, turn: u32) -> String {
        Self::render(&self.summary, topic, turn)
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: String,
    pub agents: Vec<Agent>,
    pub turns: u32,
    pub prompts: DebatePrompts,
}

impl RunDebateInput {
    pub fn new(topic: impl Into<String>, agents: Vec<Agent>, turns: u32) -> Self {
        Self {
            topic: topic.into(),
            agents,
            turns,
            prompts: DebatePrompts::default(),
        }
    }

    pub fn with_prompts(mut self, prompts: DebatePrompts) -> Self {
        self.prompts = prompts;
        self
    }
}

/// Result of a scripted debate
#[derive(Debug, Clone)]
pub struct RunDebateOutput {
    /// The concluded debate
    pub debate: Debate,
    /// Run-wide ledger after the debate
    pub ledger: CostLedger,
}

/// Use case for running a full round-robin debate
pub struct RunDebateUseCase<G: CompletionGateway + 'static> {
    orchestrator: Arc<DebateOrchestrator<G>>,
}

impl<G: CompletionGateway + 'static> RunDebateUseCase<G> {
    pub fn new(orchestrator: Arc<DebateOrchestrator<G>>) -> Self {
        Self { orchestrator }
    }

    /// Execute the use case with no progress reporting
    pub async fn execute(&self, input: RunDebateInput) -> Result<RunDebateOutput, RunDebateError> {
        self.execute_with_observer(input, &NoObserver).await
    }

    /// Execute the use case, reporting progress to `observer`
    pub async fn execute_with_observer(
        &self,
        input: RunDebateInput,
        observer: &dyn DebateObserver,
    ) -> Result<RunDebateOutput, RunDebateError> {
        if input.turns == 0 {
            return Err(RunDebateError::NoTurns);
        }

        let debate = self
            .orchestrator
            .start_debate(input.topic.as_str(), input.agents)
            .await?;
        let topic = debate.topic().to_string();
        let debaters: Vec<Agent> = debate.debaters().cloned().collect();
        observer.on_debate_start(&topic, debate.moderator().name(), debate.agents().len());

        for turn in 1..=input.turns {
            info!("Turn {}/{}", turn, input.turns);
            // Debaters plus the moderator's summary
            observer.on_turn_start(turn, debaters.len() + 1);
            if turn == input.turns {
                self.orchestrator.mark_last_turn().await?;
            }

            let prompt = if turn == 1 {
                input.prompts.opening_for(&topic)
            } else {
                input.prompts.rebuttal_for(&topic, turn)
            };
            for agent in &debaters {
                observer.on_agent_start(turn, agent.name());
                let message = self.orchestrator.agent_turn(agent, &prompt).await?;
                observer.on_message(turn, &message);
            }

            observer.on_agent_start(turn, debate.moderator().name());
            let summary = self
                .orchestrator
                .moderator_summary(&input.prompts.summary_for(&topic, turn))
                .await?;
            observer.on_message(turn, &summary);

            if turn < input.turns {
                self.orchestrator.end_turn().await?;
            }
            observer.on_turn_end(turn);
        }

        let debate = self.orchestrator.conclude_debate().await?;
        observer.on_debate_concluded(&debate);

        Ok(RunDebateOutput {
            debate,
            ledger: self.orchestrator.ledger().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_gateway::{Completion, CompletionRequest, GatewayError};
    use agora_domain::Message;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Replies with the agent name and records every prompt it sees
    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionGateway for RecordingGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((request.agent.clone(), request.prompt.clone()));
            Ok(Completion::new(format!("{} speaks", request.agent)).with_usage(2, 3))
        }
    }

    #[derive(Default)]
    struct CountingObserver {
        events: Mutex<Vec<String>>,
    }

    impl DebateObserver for CountingObserver {
        fn on_turn_start(&self, turn_number: u32, speakers: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {} ({})", turn_number, speakers));
        }

        fn on_message(&self, turn_number: u32, message: &Message) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}: {}", turn_number, message.speaker()));
        }

        fn on_turn_end(&self, turn_number: u32) {
            self.events
                .lock()
                .unwrap()
                .push(format!("end {}", turn_number));
        }
    }

    fn roster() -> Vec<Agent> {
        vec![
            Agent::new("Ada", "k1", "openai/gpt-4o-mini", "Argue for."),
            Agent::new("Mod", "k2", "openai/gpt-4o-mini", "Moderate.").with_moderator(true),
            Agent::new("Bob", "k3", "anthropic/claude-3-haiku", "Argue against."),
        ]
    }

    fn use_case(gateway: Arc<RecordingGateway>) -> RunDebateUseCase<RecordingGateway> {
        RunDebateUseCase::new(Arc::new(DebateOrchestrator::new(gateway)))
    }

    #[tokio::test]
    async fn test_zero_turns_rejected() {
        let uc = use_case(Arc::new(RecordingGateway::default()));
        let err = uc
            .execute(RunDebateInput::new("t", roster(), 0))
            .await
            .unwrap_err();
        assert_eq!(err, RunDebateError::NoTurns);
    }

    #[tokio::test]
    async fn test_empty_roster_rejected() {
        let uc = use_case(Arc::new(RecordingGateway::default()));
        let err = uc
            .execute(RunDebateInput::new("t", vec![], 1))
            .await
            .unwrap_err();
        assert_eq!(err, RunDebateError::Domain(DomainError::EmptyAgentList));
    }

    #[tokio::test]
    async fn test_round_robin_two_turns() {
        let gateway = Arc::new(RecordingGateway::default());
        let uc = use_case(Arc::clone(&gateway));

        let output = uc
            .execute(RunDebateInput::new("Remote work", roster(), 2))
            .await
            .unwrap();

        let calls = gateway.calls.lock().unwrap().clone();
        let speakers: Vec<_> = calls.iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(speakers, vec!["Ada", "Bob", "Mod", "Ada", "Bob", "Mod"]);
        assert!(calls[0].1.contains("Remote work"));
        assert!(calls[0].1.contains("opening"));
        assert!(calls[3].1.contains("turn 2"));
        assert!(calls[5].1.contains("summarize turn 2"));

        let debate = output.debate;
        assert!(debate.is_concluded());
        assert_eq!(debate.turns().len(), 2);
        assert!(!debate.turns()[0].is_last_turn());
        assert!(debate.turns()[1].is_last_turn());
        for turn in debate.turns() {
            assert_eq!(turn.messages().len(), 2);
            assert_eq!(turn.summary().unwrap().speaker(), "Mod");
        }
        assert_eq!(debate.message_count(), 6);
        assert_eq!(debate.total_usage().total(), 30);
        assert_eq!(output.ledger.total_usage(), 30);
        assert_eq!(output.ledger.usage_by_model().len(), 2);
    }

    #[tokio::test]
    async fn test_observer_sees_every_message() {
        let uc = use_case(Arc::new(RecordingGateway::default()));
        let observer = CountingObserver::default();

        uc.execute_with_observer(RunDebateInput::new("t", roster(), 1), &observer)
            .await
            .unwrap();

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["start 1 (3)", "1: Ada", "1: Bob", "1: Mod", "end 1"]
        );
    }

    #[tokio::test]
    async fn test_single_agent_moderates_itself() {
        let gateway = Arc::new(RecordingGateway::default());
        let uc = use_case(Arc::clone(&gateway));
        let solo = vec![Agent::new("Solo", "k", "gpt", "")];

        let output = uc
            .execute(RunDebateInput::new("t", solo, 1))
            .await
            .unwrap();

        assert_eq!(gateway.calls.lock().unwrap().len(), 1);
        let turn = &output.debate.turns()[0];
        assert!(turn.messages().is_empty());
        assert_eq!(turn.summary().unwrap().speaker(), "Solo");
    }

    #[test]
    fn test_prompt_placeholders() {
        let prompts = DebatePrompts {
            opening: "open {topic}".to_string(),
            rebuttal: "{turn}: {topic}".to_string(),
            summary: "sum {turn}".to_string(),
        };
        assert_eq!(prompts.opening_for("x"), "open x");
        assert_eq!(prompts.rebuttal_for("x", 3), "3: x");
        assert_eq!(prompts.summary_for("x", 2), "sum 2");
    }
}
