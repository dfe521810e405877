//! Rolling conversation history threaded into every completion call

use serde::{Deserialize, Serialize};

/// One role/content pair; `role` is the speaking agent's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Append-only history for a single debate.
///
/// Grows by exactly one entry per produced message and is only cleared
/// when a new debate starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.entries.push(HistoryEntry::new(role, content));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Owned copy of the entries, safe to hand to an in-flight call
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }
}
