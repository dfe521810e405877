//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the completion call timeout.

use std::time::Duration;

/// Default limit for a single completion call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Application behavior configuration.
///
/// A call that exceeds `timeout` is recorded as a failed turn; the debate
/// carries on.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a completion. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::with_timeout_seconds(DEFAULT_TIMEOUT_SECS)
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}
