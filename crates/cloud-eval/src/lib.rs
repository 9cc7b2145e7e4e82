//! Position evaluations from the Lichess cloud-eval API.
//!
//! The [`EvalFetcher`] sits between callers and an [`EvalService`]: it serves
//! repeated positions from a TTL cache, retries rate-limited and transient
//! failures with exponential backoff, and spaces out network requests when
//! evaluating a batch of positions.
//!
//! # Overview
//!
//! - [`LichessClient`] - HTTP client for `/api/cloud-eval`
//! - [`EvalCache`] - Shared cache keyed by position and variation count
//! - [`RetryState`] - Retry state machine driving each fetch
//! - [`EvalFetcher`] - Single-position and batch evaluation
//! - [`FetcherConfig`] - TOML-loadable settings

pub mod cache;
pub mod client;
pub mod config;
pub mod fetcher;
pub mod response;
pub mod retry;

pub use cache::{CacheKey, EvalCache};
pub use client::{EvalService, LichessClient, ServiceError};
pub use config::{ConfigError, FetcherConfig, MAX_BATCH};
pub use fetcher::{
    BatchEntry, BatchError, BatchReport, EntryStatus, EvalFetcher, FetchError, Fetched,
    UnavailableReason,
};
pub use response::{CloudEval, CloudPv};
pub use retry::{RetryPolicy, RetryState, Step};
