//! OpenRouter (OpenAI-compatible) completion adapter

mod gateway;
mod types;

pub use gateway::{OpenRouterConfig, OpenRouterGateway};
