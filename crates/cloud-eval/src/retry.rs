//! Retry state machine for evaluation requests.
//!
//! [`RetryState`] consumes the result of each attempt and answers with the
//! next [`Step`]: finish with a value, finish as unavailable, wait and try
//! again, or give up with an error. It performs no I/O and never sleeps, so
//! the fetcher owns all waiting.

use std::time::Duration;

use crate::client::ServiceError;
use crate::fetcher::{FetchError, UnavailableReason};

/// How many times to try and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts in total, including the first.
    pub max_attempts: u32,
    /// Wait before the first retry; doubles for each retry after it.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (0-based): `base_delay * 2^attempt`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// What the fetcher should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The attempt succeeded.
    Done(T),
    /// Terminal, non-error outcome: the service has no evaluation to give.
    Unavailable(UnavailableReason),
    /// Wait `delay`, then make attempt number `attempt` (0-based).
    Retry { attempt: u32, delay: Duration },
    /// Retries are exhausted; the failure goes to the caller.
    Fail(FetchError),
}

/// Attempt counter for one evaluation request.
#[derive(Debug, Clone)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: u32,
}

impl RetryState {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempt: 0 }
    }

    /// The attempt about to be made or just made (0-based).
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Feeds the result of the current attempt.
    ///
    /// Not-found ends immediately. Rate limits, timeouts and transient
    /// errors are retried until `max_attempts` attempts have been made;
    /// after that a timeout ends as unavailable and anything else fails.
    pub fn on_result<T>(&mut self, result: Result<T, ServiceError>) -> Step<T> {
        let err = match result {
            Ok(value) => return Step::Done(value),
            Err(ServiceError::NotFound) => {
                return Step::Unavailable(UnavailableReason::NotInDatabase)
            }
            Err(err) => err,
        };

        let made = self.attempt + 1;
        if made >= self.policy.max_attempts {
            return match err {
                ServiceError::Timeout => Step::Unavailable(UnavailableReason::Timeout),
                last => Step::Fail(FetchError::Exhausted {
                    attempts: made,
                    last,
                }),
            };
        }

        let delay = self.policy.backoff(self.attempt);
        self.attempt = made;
        Step::Retry {
            attempt: made,
            delay,
        }
    }
}
