//! Moderator flag validation.
//!
//! Registries may be inconsistently tagged. Moderator lookup always takes the
//! first flagged agent; this module reports (never rejects) rosters where that
//! rule is doing real work.

/// Identifies a specific moderator issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeratorIssueCode {
    /// No agent is flagged; debates fall back to the first agent.
    NoModerator,
    /// More than one agent is flagged; only `honored` is ever used.
    AmbiguousModerator {
        honored: String,
        ignored: Vec<String>,
    },
}

/// A detected moderator issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorIssue {
    pub code: ModeratorIssueCode,
    pub message: String,
}

impl ModeratorIssue {
    pub(crate) fn no_moderator() -> Self {
        Self {
            code: ModeratorIssueCode::NoModerator,
            message: "no agent is flagged as moderator; the first agent will moderate".to_string(),
        }
    }

    pub(crate) fn ambiguous(honored: &str, ignored: Vec<String>) -> Self {
        let message = format!(
            "{} agents are flagged as moderator; '{}' is used, ignoring {}",
            ignored.len() + 1,
            honored,
            ignored.join(", ")
        );
        Self {
            code: ModeratorIssueCode::AmbiguousModerator {
                honored: honored.to_string(),
                ignored,
            },
            message,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self.code, ModeratorIssueCode::AmbiguousModerator { .. })
    }
}

/// Inspect a list of `(name, is_moderator)` flags in roster order
pub fn check_moderator_flags<'a>(
    flags: impl IntoIterator<Item = (&'a str, bool)>,
) -> Vec<ModeratorIssue> {
    let mut seen_any = false;
    let mut flagged: Vec<&str> = Vec::new();
    for (name, is_moderator) in flags {
        seen_any = true;
        if is_moderator {
            flagged.push(name);
        }
    }

    match flagged.split_first() {
        None if seen_any => vec![ModeratorIssue::no_moderator()],
        None => Vec::new(),
        Some((_, [])) => Vec::new(),
        Some((honored, rest)) => vec![ModeratorIssue::ambiguous(
            honored,
            rest.iter().map(|s| s.to_string()).collect(),
        )],
    }
}
