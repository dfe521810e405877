//! Debate progress port
//!
//! Defines the interface for reporting progress while a debate runs.

use agora_domain::{Debate, Message};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait DebateObserver: Send + Sync {
    /// Called once the debate has been started and a moderator chosen
    fn on_debate_start(&self, _topic: &str, _moderator: &str, _participants: usize) {}

    /// Called when a turn opens
    fn on_turn_start(&self, turn_number: u32, speakers: usize);

    /// Called before an agent is asked to speak
    fn on_agent_start(&self, _turn_number: u32, _agent: &str) {}

    /// Called for every recorded message, summaries included
    fn on_message(&self, turn_number: u32, message: &Message);

    /// Called after a turn is sealed
    fn on_turn_end(&self, turn_number: u32);

    /// Called once the debate is concluded
    fn on_debate_concluded(&self, _debate: &Debate) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl DebateObserver for NoObserver {
    fn on_turn_start(&self, _turn_number: u32, _speakers: usize) {}
    fn on_message(&self, _turn_number: u32, _message: &Message) {}
    fn on_turn_end(&self, _turn_number: u32) {}
}
