//! Agent domain.
//!
//! - [`entities::Agent`] — a named participant bound to a model and a system prompt
//! - [`entities::TokenUsage`] — prompt/completion token counts

pub mod entities;
