//! Model value object identifying a backend model

use serde::{Deserialize, Serialize};

/// Backend model identifier (Value Object)
///
/// Identifiers follow the OpenRouter convention of `provider/model`
/// (e.g. `openai/gpt-4o-mini`), but any non-empty string is accepted so
/// that self-hosted or aliased models keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider prefix (`openai` for `openai/gpt-4o`), if the id has one
    pub fn provider(&self) -> Option<&str> {
        self.0
            .split_once('/')
            .map(|(provider, _)| provider)
            .filter(|p| !p.is_empty())
    }

    /// Model name without the provider prefix
    pub fn name(&self) -> &str {
        self.0
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model(s)
    }
}

impl AsRef<str> for Model {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_split() {
        let model = Model::new("openai/gpt-4o-mini");
        assert_eq!(model.provider(), Some("openai"));
        assert_eq!(model.name(), "gpt-4o-mini");
    }

    #[test]
    fn test_model_without_provider() {
        let model: Model = "gpt-x".into();
        assert_eq!(model.provider(), None);
        assert_eq!(model.name(), "gpt-x");
        assert_eq!(model.to_string(), "gpt-x");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let model = Model::new("anthropic/claude-3.5-sonnet");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "\"anthropic/claude-3.5-sonnet\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
