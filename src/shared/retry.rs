//! Bounded retry with a per-attempt timeout race.
//!
//! Every remote call site (asset deletion today) goes through [`retry`]: each
//! attempt races the operation against `attempt_timeout`, a result is only
//! accepted when the caller's success predicate says so, and failed attempts
//! are separated by a fixed backoff. Attempts for one operation are strictly
//! sequential.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Retry settings for a single remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    attempt_timeout: Duration,
    backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

    /// Creates a policy; `max_attempts` is raised to 1 when given as 0
    pub fn new(max_attempts: u32, attempt_timeout: Duration, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempt_timeout,
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Self::DEFAULT_ATTEMPT_TIMEOUT,
            Self::DEFAULT_BACKOFF,
        )
    }
}

/// Why a single attempt did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("request timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("{0}")]
    Failed(String),

    #[error("unexpected result '{0}'")]
    Rejected(String),
}

/// Terminal result of a retried operation
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// Number of attempts actually made (1..=max_attempts)
    pub attempts: u32,
    /// The accepted value, or the last attempt's error
    pub result: Result<T, AttemptError>,
    /// Errors of every failed attempt, oldest first
    pub failures: Vec<AttemptError>,
}

impl<T> RetryOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs `operation` until `is_success` accepts its value or the attempts run out.
///
/// `operation` receives the 1-based attempt number. An `Err`, an elapsed
/// timeout, or a value rejected by `is_success` all count as a failed attempt.
/// No backoff is applied after the final attempt.
pub async fn retry<T, F, Fut, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_success: P,
) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    P: Fn(&T) -> bool,
    T: fmt::Display,
{
    let mut failures = Vec::new();

    for attempt in 1..=policy.max_attempts {
        let error = match tokio::time::timeout(policy.attempt_timeout, operation(attempt)).await {
            Ok(Ok(value)) if is_success(&value) => {
                return RetryOutcome {
                    attempts: attempt,
                    result: Ok(value),
                    failures,
                };
            }
            Ok(Ok(value)) => AttemptError::Rejected(value.to_string()),
            Ok(Err(e)) => AttemptError::Failed(format!("{:#}", e)),
            Err(_) => AttemptError::TimedOut(policy.attempt_timeout),
        };
        failures.push(error);

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    let last = failures
        .last()
        .cloned()
        .unwrap_or_else(|| AttemptError::Failed("no attempt was made".to_string()));

    RetryOutcome {
        attempts: policy.max_attempts,
        result: Err(last),
        failures,
    }
}
