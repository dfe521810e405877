//! Domain layer for agora
//!
//! This crate contains the core entities and value objects of a multi-agent
//! debate. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! A [`Debate`] is a numbered sequence of [`Turn`]s. In each turn some
//! participants contribute a [`Message`]; the moderator may add a summary.
//! Token usage and cost roll up message → turn → debate as messages are
//! recorded.
//!
//! ## Moderator
//!
//! The moderator is the first agent flagged `is_moderator`, otherwise the
//! first agent. Rosters with several flags are legal; only the first flag is
//! honored and [`AgentRegistry::moderator_issues`] reports the rest.
//!
//! ## Cost Ledger
//!
//! [`CostLedger`] accumulates usage per model across every debate of a run.

pub mod agent;
pub mod core;
pub mod debate;
pub mod ledger;
pub mod registry;
pub mod util;

// Re-export commonly used types
pub use agent::entities::{Agent, TokenUsage, mask_api_key};
pub use core::{error::DomainError, model::Model};
pub use debate::{
    entities::{Debate, DebateStatus},
    history::{ConversationHistory, HistoryEntry},
    message::{Message, MessageOutcome},
    turn::Turn,
};
pub use ledger::{
    cost_ledger::{CostLedger, ModelUsage},
    pricing::{FlatRate, ModelRate, PricingPolicy, TablePricing},
};
pub use registry::{
    agent_registry::{AgentRegistry, DuplicateNamePolicy, RegistryError},
    repository::{RosterError, RosterRepository},
    validation::{ModeratorIssue, ModeratorIssueCode},
};
