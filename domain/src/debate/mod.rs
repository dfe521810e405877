//! Debate domain.
//!
//! - [`entities::Debate`] — the aggregate root: topic, participants, moderator, turns, totals
//! - [`turn::Turn`] — one numbered round with its messages and optional summary
//! - [`message::Message`] — a single agent contribution with usage accounting
//! - [`history::ConversationHistory`] — rolling role/content pairs fed to every call

pub mod entities;
pub mod history;
pub mod message;
pub mod turn;
