//! Scripted debate configuration from TOML (`[debate]` section)

use agora_application::DebatePrompts;
use serde::{Deserialize, Serialize};

/// Raw debate configuration from TOML
///
/// Prompt overrides may use the `{topic}` and `{turn}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Number of turns for `agora run`
    pub turns: u32,
    pub opening_prompt: Option<String>,
    pub rebuttal_prompt: Option<String>,
    pub summary_prompt: Option<String>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            turns: 3,
            opening_prompt: None,
            rebuttal_prompt: None,
            summary_prompt: None,
        }
    }
}

impl FileDebateConfig {
    /// Built-in prompts with any configured overrides applied
    pub fn to_prompts(&self) -> DebatePrompts {
        let defaults = DebatePrompts::default();
        DebatePrompts {
            opening: self.opening_prompt.clone().unwrap_or(defaults.opening),
            rebuttal: self.rebuttal_prompt.clone().unwrap_or(defaults.rebuttal),
            summary: self.summary_prompt.clone().unwrap_or(defaults.summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_prompt_override() {
        let config: FileDebateConfig = toml::from_str(
            r#"
turns = 5
summary_prompt = "Wrap up turn {turn}."
"#,
        )
        .unwrap();
        assert_eq!(config.turns, 5);

        let prompts = config.to_prompts();
        assert_eq!(prompts.summary, "Wrap up turn {turn}.");
        assert_eq!(prompts.opening, DebatePrompts::default().opening);
    }
}
