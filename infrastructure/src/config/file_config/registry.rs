//! Agent registry configuration from TOML (`[registry]` section)

use agora_domain::DuplicateNamePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw registry configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRegistryConfig {
    /// JSON roster file
    pub roster: PathBuf,
    /// What to do when a roster holds two agents with the same name
    pub duplicate_names: DuplicateNamePolicy,
}

impl Default for FileRegistryConfig {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("agents.json"),
            duplicate_names: DuplicateNamePolicy::Allow,
        }
    }
}
