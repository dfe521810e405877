//! Application layer for agora
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    completion_gateway::{Completion, CompletionGateway, CompletionRequest, GatewayError},
    observer::{DebateObserver, NoObserver},
};
pub use use_cases::orchestrate_debate::DebateOrchestrator;
pub use use_cases::run_debate::{
    DebatePrompts, RunDebateError, RunDebateInput, RunDebateOutput, RunDebateUseCase,
};
