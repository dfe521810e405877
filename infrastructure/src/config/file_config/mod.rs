//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod gateway;
mod output;
mod pricing;
mod registry;

pub use debate::FileDebateConfig;
pub use gateway::{DEFAULT_BASE_URL, FileGatewayConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use pricing::FilePricingConfig;
pub use registry::FileRegistryConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("gateway.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("debate.turns must be at least 1")]
    ZeroTurns,

    #[error("pricing.per_token must be a non-negative number, got {0}")]
    InvalidFlatRate(f64),

    #[error("pricing.models: model id cannot be empty")]
    EmptyModelName,

    #[error("pricing.models.\"{0}\": rates must be non-negative numbers")]
    InvalidModelRate(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint settings
    pub gateway: FileGatewayConfig,
    /// Cost calculation
    pub pricing: FilePricingConfig,
    /// Agent roster location and policy
    pub registry: FileRegistryConfig,
    /// Scripted debate settings
    pub debate: FileDebateConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.gateway.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        }

        if self.debate.turns == 0 {
            issues.push(ConfigValidationError::ZeroTurns);
        }

        if !is_valid_rate(self.pricing.per_token) {
            issues.push(ConfigValidationError::InvalidFlatRate(self.pricing.per_token));
        }

        for (model, rate) in &self.pricing.models {
            if model.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyModelName);
            } else if !is_valid_rate(rate.prompt_per_1k) || !is_valid_rate(rate.completion_per_1k)
            {
                issues.push(ConfigValidationError::InvalidModelRate(model.clone()));
            }
        }

        issues
    }
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}
