//! Cached, retrying evaluation fetcher with batch support.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chess_analysis::PositionEval;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::{CacheKey, EvalCache};
use crate::client::{EvalService, ServiceError};
use crate::config::{FetcherConfig, MAX_BATCH};
use crate::response::CloudEval;
use crate::retry::{RetryPolicy, RetryState, Step};

/// Why a position has no evaluation. These are outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The service does not know the position.
    NotInDatabase,
    /// Every attempt timed out.
    Timeout,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotInDatabase => f.write_str("Position not in cloud database"),
            UnavailableReason::Timeout => f.write_str("Evaluation timed out"),
        }
    }
}

/// Failure of a single-position fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Every attempt failed; `last` is the final attempt's error.
    #[error("Evaluation failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: ServiceError,
    },
}

/// Batch rejected before any position was looked at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("fens array is required and must not be empty")]
    Empty,
    #[error("Maximum {max} positions per request (got {len})")]
    TooLarge { len: usize, max: usize },
}

/// Result of fetching one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// An evaluation, either from the cache or freshly fetched.
    Evaluated { eval: CloudEval, cached: bool },
    Unavailable(UnavailableReason),
}

impl Fetched {
    /// True only for cache hits, the one outcome that made no request.
    #[must_use]
    pub fn from_cache(&self) -> bool {
        matches!(self, Fetched::Evaluated { cached: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Available,
    Unavailable,
    Failed,
}

/// Outcome for one position of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub index: usize,
    pub fen: String,
    pub status: EntryStatus,
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<CloudEval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    fn new(index: usize, fen: &str, outcome: Result<Fetched, FetchError>) -> Self {
        let mut entry = Self {
            index,
            fen: fen.to_string(),
            status: EntryStatus::Available,
            cached: false,
            evaluation: None,
            error: None,
        };
        match outcome {
            Ok(Fetched::Evaluated { eval, cached }) => {
                entry.cached = cached;
                entry.evaluation = Some(eval);
            }
            Ok(Fetched::Unavailable(reason)) => {
                entry.status = EntryStatus::Unavailable;
                entry.error = Some(reason.to_string());
            }
            Err(err) => {
                entry.status = EntryStatus::Failed;
                entry.error = Some(err.to_string());
            }
        }
        entry
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == EntryStatus::Available
    }

    /// The evaluation in the form the game analyzer consumes.
    #[must_use]
    pub fn position_eval(&self) -> Option<PositionEval> {
        self.evaluation.as_ref().map(CloudEval::to_position_eval)
    }
}

/// Result of a batch: one entry per input position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub evaluations: Vec<BatchEntry>,
    pub count: usize,
    /// Entries served from the cache.
    pub cached: usize,
}

/// Fetches evaluations through a shared cache with retries.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct EvalFetcher<S> {
    service: S,
    cache: Arc<EvalCache>,
    policy: RetryPolicy,
    request_timeout: Duration,
    rate_limit_delay: Duration,
    max_batch: usize,
}

impl<S: EvalService> EvalFetcher<S> {
    /// Creates a fetcher with its own cache.
    ///
    /// Expired entries are only dropped when their key is read again. A
    /// long-lived fetcher should also run [`EvalCache::spawn_sweeper`] on
    /// [`Self::cache`] to keep the cache bounded.
    pub fn new(service: S, config: &FetcherConfig) -> Self {
        let cache = Arc::new(EvalCache::new(config.cache_ttl()));
        Self::with_cache(service, cache, config)
    }

    /// Creates a fetcher on an existing, possibly shared, cache.
    ///
    /// The batch size is capped at [`MAX_BATCH`] whatever the config says.
    /// Sweeping the cache is left to its owner.
    pub fn with_cache(service: S, cache: Arc<EvalCache>, config: &FetcherConfig) -> Self {
        Self {
            service,
            cache,
            policy: config.retry_policy(),
            request_timeout: config.request_timeout(),
            rate_limit_delay: config.rate_limit_delay(),
            max_batch: config.max_batch.min(MAX_BATCH),
        }
    }

    pub fn cache(&self) -> &Arc<EvalCache> {
        &self.cache
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Largest batch [`Self::evaluate_batch`] accepts.
    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    pub fn rate_limit_delay(&self) -> Duration {
        self.rate_limit_delay
    }

    /// Evaluates one position.
    ///
    /// A fresh cache entry is returned without a request. Otherwise the
    /// service is called, each attempt bounded by the request timeout, and
    /// successful evaluations are cached. Unavailable outcomes are not cached.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] when every attempt failed with a
    /// rate limit or transient error.
    pub async fn fetch(&self, fen: &str, multi_pv: u8) -> Result<Fetched, FetchError> {
        let key = CacheKey::new(fen, multi_pv);
        if let Some(eval) = self.cache.get(&key).await {
            tracing::debug!(fen, multi_pv, "cloud eval cache hit");
            return Ok(Fetched::Evaluated { eval, cached: true });
        }

        let mut retry = RetryState::new(self.policy);
        loop {
            let call = self.service.cloud_eval(fen, multi_pv);
            let result = tokio::time::timeout(self.request_timeout, call)
                .await
                .unwrap_or(Err(ServiceError::Timeout));

            match retry.on_result(result) {
                Step::Done(eval) => {
                    tracing::debug!(fen, multi_pv, depth = eval.depth, "cloud eval fetched");
                    self.cache.insert(key, eval.clone()).await;
                    return Ok(Fetched::Evaluated {
                        eval,
                        cached: false,
                    });
                }
                Step::Unavailable(reason) => {
                    tracing::debug!(fen, %reason, "cloud eval unavailable");
                    return Ok(Fetched::Unavailable(reason));
                }
                Step::Retry { attempt, delay } => {
                    tracing::warn!(
                        fen,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "cloud eval failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Step::Fail(err) => {
                    tracing::warn!(fen, error = %err, "cloud eval gave up");
                    return Err(err);
                }
            }
        }
    }

    /// Evaluates positions in order, one entry per input.
    ///
    /// A failure on one position is recorded in its entry and the batch
    /// moves on. After each position that needed a request, except the
    /// last, the fetcher pauses for the rate-limit delay; cache hits never
    /// pause.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] without fetching anything if the batch is
    /// empty or larger than the configured maximum.
    pub async fn evaluate_batch(
        &self,
        fens: &[impl AsRef<str>],
        multi_pv: u8,
    ) -> Result<BatchReport, BatchError> {
        if fens.is_empty() {
            return Err(BatchError::Empty);
        }
        if fens.len() > self.max_batch {
            return Err(BatchError::TooLarge {
                len: fens.len(),
                max: self.max_batch,
            });
        }

        let mut evaluations = Vec::with_capacity(fens.len());
        for (index, fen) in fens.iter().enumerate() {
            let fen = fen.as_ref();
            let outcome = self.fetch(fen, multi_pv).await;
            let requested = !outcome.as_ref().is_ok_and(Fetched::from_cache);
            evaluations.push(BatchEntry::new(index, fen, outcome));

            if requested && index + 1 < fens.len() {
                tokio::time::sleep(self.rate_limit_delay).await;
            }
        }

        let count = evaluations.len();
        let cached = evaluations.iter().filter(|e| e.cached).count();
        let failed = evaluations
            .iter()
            .filter(|e| e.status == EntryStatus::Failed)
            .count();
        tracing::info!(count, cached, failed, "batch evaluated");

        Ok(BatchReport {
            evaluations,
            count,
            cached,
        })
    }
}
