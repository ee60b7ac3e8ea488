use std::time::Duration;

use crate::config::RetryConfig;

/// Exponential backoff: the wait after failed attempt `n` is
/// `unit * base^(n-1)`, i.e. 1, 2, 4 ... units with the default base of 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: u32,
    pub unit: Duration,
}

/// Where a single fact-check call stands. Lives only for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    Attempting(u32),
    Succeeded(String),
    ExhaustedFailure,
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_base: 2,
            unit,
        }
    }

    pub fn initial_state(&self) -> RetryState {
        RetryState::Attempting(1)
    }

    /// Wait before the attempt following `attempt`, or `None` once the budget is spent.
    pub fn backoff_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let factor = self.backoff_base.saturating_pow(attempt.saturating_sub(1));
        Some(self.unit.saturating_mul(factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(3, Duration::from_secs(1))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_base: config.backoff_base,
            unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }
}
