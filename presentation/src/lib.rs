//! Presentation layer for agora
//!
//! This crate contains CLI definitions, transcript formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{AgentsCommand, Cli, Command, OutputFormat, RunArgs};
pub use output::console::ConsoleFormatter;
pub use output::view::{DebateView, LedgerView, ParticipantView};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
