//! JSON file roster
//!
//! The file is a JSON array of agent records:
//!
//! ```json
//! [
//!   {
//!     "name": "Ada",
//!     "api_key": "sk-or-...",
//!     "model": "openai/gpt-4o-mini",
//!     "system_prompt": "Argue for the motion.",
//!     "is_moderator": false,
//!     "token_usage": { "prompt": 0, "completion": 0 },
//!     "cost": 0.0
//!   }
//! ]
//! ```
//!
//! `token_usage` and `cost` may be omitted on load. Saves overwrite the file
//! in place.

use agora_domain::{Agent, RosterError, RosterRepository};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Roster stored as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonRosterRepository {
    path: PathBuf,
}

impl JsonRosterRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl RosterRepository for JsonRosterRepository {
    fn load(&self) -> Result<Vec<Agent>, RosterError> {
        let text = fs::read_to_string(&self.path)?;
        let agents: Vec<Agent> = serde_json::from_str(&text)
            .map_err(|e| RosterError::Parse(format!("{}: {}", self.path.display(), e)))?;
        debug!("Loaded {} agents from {}", agents.len(), self.path.display());
        Ok(agents)
    }

    fn save(&self, agents: &[Agent]) -> Result<(), RosterError> {
        let json =
            serde_json::to_string_pretty(agents).map_err(|e| RosterError::Parse(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        debug!("Saved {} agents to {}", agents.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{AgentRegistry, DuplicateNamePolicy, TokenUsage};

    fn sample() -> Vec<Agent> {
        let mut ada = Agent::new("Ada", "sk-1", "openai/gpt-4o-mini", "Argue for.");
        ada.record_usage(TokenUsage::new(12, 30), 0.5);
        vec![
            ada,
            Agent::new("Mod", "sk-2", "anthropic/claude-3-haiku", "Moderate.")
                .with_moderator(true),
            Agent::new("Ada", "sk-3", "openai/gpt-4o", "Second Ada."),
        ]
    }

    #[test]
    fn test_save_then_load_preserves_agents_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRosterRepository::new(dir.path().join("agents.json"));

        repo.save(&sample()).unwrap();
        let loaded = repo.load().unwrap();

        assert_eq!(loaded, sample());
        assert_eq!(loaded[0].token_usage(), TokenUsage::new(12, 30));
        assert!(loaded[1].is_moderator());
    }

    #[test]
    fn test_save_writes_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRosterRepository::new(dir.path().join("nested/agents.json"));
        repo.save(&sample()[..1]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        let record = &value[0];
        for field in [
            "name",
            "api_key",
            "model",
            "system_prompt",
            "is_moderator",
            "token_usage",
            "cost",
        ] {
            assert!(record.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(record["token_usage"]["prompt"], 12);
    }

    #[test]
    fn test_load_without_usage_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");
        fs::write(
            &path,
            r#"[{"name": "A", "api_key": "k", "model": "gpt", "system_prompt": "", "is_moderator": true}]"#,
        )
        .unwrap();

        let agents = JsonRosterRepository::new(&path).load().unwrap();
        assert_eq!(agents.len(), 1);
        assert!(agents[0].token_usage().is_zero());
        assert_eq!(agents[0].cost(), 0.0);
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");
        fs::write(&path, r#"[{"name": "A", "api_key": "k", "model": "gpt"}]"#).unwrap();

        let err = JsonRosterRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, RosterError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRosterRepository::new(dir.path().join("absent.json"));
        assert!(!repo.exists());
        assert!(matches!(repo.load().unwrap_err(), RosterError::Io(_)));
    }

    #[test]
    fn test_registry_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRosterRepository::new(dir.path().join("agents.json"));

        let mut registry = AgentRegistry::default();
        registry
            .create("Ada", "sk-1", "openai/gpt-4o-mini", "Argue for.", false)
            .unwrap();
        registry
            .create("Mod", "sk-2", "openai/gpt-4o-mini", "Moderate.", true)
            .unwrap();
        registry.save_to(&repo).unwrap();

        let mut reloaded = AgentRegistry::new(DuplicateNamePolicy::Reject);
        assert_eq!(reloaded.load_from(&repo).unwrap(), 2);
        assert_eq!(reloaded.agents(), registry.agents());
        assert_eq!(reloaded.find_moderator().unwrap().name(), "Mod");
    }
}
