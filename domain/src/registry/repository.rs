//! Roster repository trait

use crate::agent::entities::Agent;
use thiserror::Error;

/// Errors raised while reading or writing a roster
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed roster: {0}")]
    Parse(String),
}

/// Repository trait for agent rosters
///
/// Loads and stores the full ordered agent set. Implementations live in the
/// infrastructure layer; writes are not required to be atomic.
pub trait RosterRepository: Send + Sync {
    /// Read every agent record, in file order
    fn load(&self) -> Result<Vec<Agent>, RosterError>;

    /// Write every agent, including accumulated usage and cost
    fn save(&self, agents: &[Agent]) -> Result<(), RosterError>;
}
