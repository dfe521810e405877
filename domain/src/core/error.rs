//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration errors: the caller asked for something the
/// current state of the registry or debate cannot satisfy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot start a debate without agents")]
    EmptyAgentList,

    #[error("No active debate")]
    NoActiveDebate,

    #[error("Debate has already been concluded")]
    DebateConcluded,

    #[error("Agent '{0}' is not a participant of the active debate")]
    UnknownParticipant(String),

    #[error("Duplicate agent name '{0}'")]
    DuplicateAgentName(String),

    #[error("Turn {0} already has a summary")]
    SummaryAlreadyRecorded(u32),
}

impl DomainError {
    /// Check if this error is caused by debate lifecycle state
    /// (as opposed to bad input)
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            DomainError::NoActiveDebate | DomainError::DebateConcluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::UnknownParticipant("Ada".to_string()).to_string(),
            "Agent 'Ada' is not a participant of the active debate"
        );
        assert_eq!(
            DomainError::EmptyAgentList.to_string(),
            "Cannot start a debate without agents"
        );
        assert_eq!(
            DomainError::SummaryAlreadyRecorded(2).to_string(),
            "Turn 2 already has a summary"
        );
    }

    #[test]
    fn test_is_lifecycle() {
        assert!(DomainError::NoActiveDebate.is_lifecycle());
        assert!(DomainError::DebateConcluded.is_lifecycle());
        assert!(!DomainError::EmptyAgentList.is_lifecycle());
        assert!(!DomainError::DuplicateAgentName("x".to_string()).is_lifecycle());
        assert!(!DomainError::SummaryAlreadyRecorded(1).is_lifecycle());
    }
}
