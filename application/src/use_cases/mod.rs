//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod orchestrate_debate;
pub mod run_debate;
