//! Agent registry domain.
//!
//! - [`agent_registry::AgentRegistry`] — ordered roster with first-match lookups
//! - [`repository::RosterRepository`] — trait for roster persistence
//! - [`validation`] — moderator flag checks

pub mod agent_registry;
pub mod repository;
pub mod validation;
