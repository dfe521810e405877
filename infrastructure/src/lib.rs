//! Infrastructure layer for agora
//!
//! This crate contains adapters that implement the ports defined in the
//! application and domain layers: the OpenRouter completion gateway, the
//! JSON roster file, and configuration file loading.

pub mod config;
pub mod openrouter;
pub mod roster;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileGatewayConfig,
    FileOutputConfig, FileOutputFormat, FilePricingConfig, FileRegistryConfig,
};
pub use openrouter::{OpenRouterConfig, OpenRouterGateway};
pub use roster::JsonRosterRepository;
