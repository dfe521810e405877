//! Pricing configuration from TOML (`[pricing]` section)

use agora_domain::ledger::pricing::DEFAULT_PER_TOKEN;
use agora_domain::{FlatRate, ModelRate, TablePricing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw pricing configuration from TOML
///
/// ```toml
/// [pricing]
/// per_token = 0.00001
///
/// [pricing.models."openai/gpt-4o-mini"]
/// prompt_per_1k = 0.00015
/// completion_per_1k = 0.0006
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePricingConfig {
    /// Flat rate for models without an entry in `models`
    pub per_token: f64,
    /// Per-model rates keyed by model id
    pub models: BTreeMap<String, ModelRate>,
}

impl Default for FilePricingConfig {
    fn default() -> Self {
        Self {
            per_token: DEFAULT_PER_TOKEN,
            models: BTreeMap::new(),
        }
    }
}

impl FilePricingConfig {
    /// Build the pricing policy used by the orchestrator
    pub fn to_pricing(&self) -> TablePricing {
        self.models.iter().fold(
            TablePricing::new(FlatRate::new(self.per_token)),
            |table, (model, rate)| table.with_rate(model.as_str(), *rate),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{Model, PricingPolicy};

    #[test]
    fn test_deserialize_model_rates() {
        let toml_str = r#"
per_token = 0.001

[models."openai/gpt-4o-mini"]
prompt_per_1k = 1.0
completion_per_1k = 2.0
"#;
        let config: FilePricingConfig = toml::from_str(toml_str).unwrap();
        let pricing = config.to_pricing();

        let listed = Model::new("openai/gpt-4o-mini");
        assert!((pricing.cost(&listed, 1000, 500) - 2.0).abs() < 1e-9);

        let unlisted = Model::new("other/model");
        assert!((pricing.cost(&unlisted, 10, 10) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_default_matches_flat_rate() {
        let pricing = FilePricingConfig::default().to_pricing();
        let cost = pricing.cost(&Model::new("gpt-x"), 10, 8);
        assert!((cost - 18.0 * DEFAULT_PER_TOKEN).abs() < 1e-12);
    }
}
