//! Agent registry: owns the roster and answers identity/moderator lookups

use super::repository::{RosterError, RosterRepository};
use super::validation::{ModeratorIssue, check_moderator_flags};
use crate::agent::entities::Agent;
use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when an agent is registered under a name that already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Keep both; lookups return the earliest registration
    #[default]
    Allow,
    /// Refuse the new agent with [`DomainError::DuplicateAgentName`]
    Reject,
}

impl std::str::FromStr for DuplicateNamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown duplicate name policy '{other}'")),
        }
    }
}

/// Errors from bulk registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// In-memory agent roster.
///
/// Registration order is significant: [`find_by_name`](Self::find_by_name)
/// and [`find_moderator`](Self::find_moderator) both return the first match.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    policy: DuplicateNamePolicy,
}

impl AgentRegistry {
    pub fn new(policy: DuplicateNamePolicy) -> Self {
        Self {
            agents: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicateNamePolicy {
        self.policy
    }

    /// Construct and register a new agent
    pub fn create(
        &mut self,
        name: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<Model>,
        system_prompt: impl Into<String>,
        is_moderator: bool,
    ) -> Result<&Agent, DomainError> {
        let agent = Agent::new(name, api_key, model, system_prompt).with_moderator(is_moderator);
        self.add(agent)?;
        Ok(&self.agents[self.agents.len() - 1])
    }

    /// Register an existing agent, honoring the duplicate name policy
    pub fn add(&mut self, agent: Agent) -> Result<(), DomainError> {
        if self.policy == DuplicateNamePolicy::Reject && self.contains(agent.name()) {
            return Err(DomainError::DuplicateAgentName(agent.name().to_string()));
        }
        self.agents.push(agent);
        Ok(())
    }

    /// Remove every agent with `name`; returns how many were removed.
    ///
    /// Removing an unknown name is a no-op.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.agents.len();
        self.agents.retain(|a| a.name() != name);
        before - self.agents.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.iter().any(|a| a.name() == name)
    }

    /// First agent registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// First agent flagged as moderator, in registration order.
    ///
    /// When several agents are flagged only the first is ever returned; use
    /// [`moderator_issues`](Self::moderator_issues) to detect that.
    pub fn find_moderator(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.is_moderator())
    }

    /// Report missing or ambiguous moderator flags
    pub fn moderator_issues(&self) -> Vec<ModeratorIssue> {
        check_moderator_flags(self.agents.iter().map(|a| (a.name(), a.is_moderator())))
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Copy running totals from debate participants back into the roster.
    ///
    /// Participants start from a snapshot of the roster, so their totals
    /// already include the earlier usage and replace the registered ones.
    /// The first registered agent with the same name is updated; unknown
    /// participants are skipped.
    pub fn absorb_usage(&mut self, participants: &[Agent]) {
        for participant in participants {
            if let Some(agent) = self
                .agents
                .iter_mut()
                .find(|a| a.name() == participant.name())
            {
                agent.set_usage(participant.token_usage(), participant.cost());
            }
        }
    }

    /// Append every agent from `repo`, in file order; returns the count loaded.
    ///
    /// Nothing is added if the repository fails to load. A duplicate rejected
    /// by the policy stops the load; agents before it stay registered.
    pub fn load_from(&mut self, repo: &dyn RosterRepository) -> Result<usize, RegistryError> {
        let loaded = repo.load()?;
        let count = loaded.len();
        for agent in loaded {
            self.add(agent)?;
        }
        Ok(count)
    }

    /// Write the full agent set to `repo`
    pub fn save_to(&self, repo: &dyn RosterRepository) -> Result<(), RegistryError> {
        repo.save(&self.agents)?;
        Ok(())
    }
}
