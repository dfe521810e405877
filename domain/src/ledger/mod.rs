//! Usage accounting.
//!
//! - [`cost_ledger::CostLedger`] — per-model token/cost totals across debates
//! - [`pricing`] — pure functions turning token counts into cost

pub mod cost_ledger;
pub mod pricing;
