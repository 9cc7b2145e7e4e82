//! Fetcher behaviour against a scripted evaluation service.
//!
//! Time is paused, so backoff and rate-limit waits complete instantly while
//! still being observable through `tokio::time::Instant`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use cloud_eval::{
    BatchError, CloudEval, CloudPv, EntryStatus, EvalFetcher, EvalService, FetchError, Fetched,
    FetcherConfig, ServiceError, UnavailableReason, MAX_BATCH,
};
use tokio::time::Instant;

enum Reply {
    Eval,
    Fail(ServiceError),
    /// Never answers within any sensible timeout.
    Hang,
}

/// Plays back scripted replies in order, then answers every further call
/// with an evaluation.
struct ScriptedService {
    script: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn eval_for(fen: &str) -> CloudEval {
    CloudEval {
        fen: fen.to_string(),
        knodes: 1000,
        depth: 25,
        pvs: vec![CloudPv {
            moves: "e2e4 e7e5".to_string(),
            cp: Some(20),
            mate: None,
        }],
    }
}

impl EvalService for ScriptedService {
    async fn cloud_eval(&self, fen: &str, _multi_pv: u8) -> Result<CloudEval, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            None | Some(Reply::Eval) => Ok(eval_for(fen)),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(eval_for(fen))
            }
        }
    }
}

fn fetcher(replies: impl IntoIterator<Item = Reply>) -> EvalFetcher<ScriptedService> {
    EvalFetcher::new(ScriptedService::new(replies), &FetcherConfig::default())
}

fn fens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("position-{i}")).collect()
}

#[tokio::test(start_paused = true)]
async fn test_second_request_is_served_from_cache() {
    let fetcher = fetcher([]);

    let first = fetcher.fetch("fen-a", 3).await.unwrap();
    assert!(matches!(first, Fetched::Evaluated { cached: false, .. }));

    let second = fetcher.fetch("fen-a", 3).await.unwrap();
    assert!(second.from_cache());
    assert_eq!(fetcher.service().calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_request_after_ttl_refetches() {
    let fetcher = fetcher([]);
    fetcher.fetch("fen-a", 3).await.unwrap();

    tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;

    let again = fetcher.fetch("fen-a", 3).await.unwrap();
    assert!(!again.from_cache());
    assert_eq!(fetcher.service().calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_is_unavailable_without_retry_or_caching() {
    let fetcher = fetcher([
        Reply::Fail(ServiceError::NotFound),
        Reply::Fail(ServiceError::NotFound),
    ]);

    let outcome = fetcher.fetch("fen-a", 3).await.unwrap();
    assert_eq!(
        outcome,
        Fetched::Unavailable(UnavailableReason::NotInDatabase)
    );
    assert_eq!(fetcher.service().calls(), 1);

    fetcher.fetch("fen-a", 3).await.unwrap();
    assert_eq!(fetcher.service().calls(), 2);
    assert!(fetcher.cache().is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_backs_off_then_succeeds() {
    let fetcher = fetcher([
        Reply::Fail(ServiceError::RateLimited),
        Reply::Fail(ServiceError::RateLimited),
    ]);
    let start = Instant::now();

    let outcome = fetcher.fetch("fen-a", 3).await.unwrap();
    assert!(matches!(outcome, Fetched::Evaluated { cached: false, .. }));
    assert_eq!(fetcher.service().calls(), 3);
    // 1s after the first failure, 2s after the second
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion_propagates() {
    let fetcher = fetcher([
        Reply::Fail(ServiceError::RateLimited),
        Reply::Fail(ServiceError::RateLimited),
        Reply::Fail(ServiceError::RateLimited),
    ]);

    let err = fetcher.fetch("fen-a", 3).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Exhausted {
            attempts: 3,
            last: ServiceError::RateLimited
        }
    );
    assert_eq!(fetcher.service().calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_end_as_unavailable() {
    let fetcher = fetcher([Reply::Hang, Reply::Hang, Reply::Hang]);
    let start = Instant::now();

    let outcome = fetcher.fetch("fen-a", 3).await.unwrap();
    assert_eq!(outcome, Fetched::Unavailable(UnavailableReason::Timeout));
    assert_eq!(fetcher.service().calls(), 3);
    // three 5s timeouts plus 1s and 2s of backoff
    assert!(start.elapsed() >= Duration::from_secs(18));
    assert!(start.elapsed() < Duration::from_secs(19));
}

#[tokio::test(start_paused = true)]
async fn test_transient_errors_exhaust_into_failure() {
    let fetcher = fetcher([
        Reply::Fail(ServiceError::Http(500)),
        Reply::Fail(ServiceError::Request("connection reset".to_string())),
        Reply::Fail(ServiceError::Http(502)),
    ]);

    let err = fetcher.fetch("fen-a", 3).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Exhausted {
            attempts: 3,
            last: ServiceError::Http(502)
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_oversized_batch_rejected_before_any_request() {
    let fetcher = fetcher([]);

    let err = fetcher.evaluate_batch(&fens(101), 3).await.unwrap_err();
    assert_eq!(err, BatchError::TooLarge { len: 101, max: 100 });
    assert_eq!(fetcher.service().calls(), 0);

    let empty: Vec<String> = Vec::new();
    assert_eq!(
        fetcher.evaluate_batch(&empty, 3).await.unwrap_err(),
        BatchError::Empty
    );
}

#[tokio::test(start_paused = true)]
async fn test_configured_batch_size_cannot_exceed_limit() {
    let config = FetcherConfig {
        max_batch: 500,
        ..FetcherConfig::default()
    };
    let fetcher = EvalFetcher::new(ScriptedService::new([]), &config);
    assert_eq!(fetcher.max_batch(), MAX_BATCH);

    let err = fetcher.evaluate_batch(&fens(101), 3).await.unwrap_err();
    assert_eq!(err, BatchError::TooLarge { len: 101, max: 100 });
    assert_eq!(fetcher.service().calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_bounds_fetcher_cache() {
    let fetcher = fetcher([]);
    let sweeper = fetcher.cache().spawn_sweeper(Duration::from_secs(60 * 60));
    fetcher.evaluate_batch(&fens(3), 3).await.unwrap();
    assert_eq!(fetcher.cache().len().await, 3);

    // nothing reads these positions again; only the sweep removes them
    tokio::time::sleep(Duration::from_secs(25 * 60 * 60)).await;
    assert!(fetcher.cache().is_empty().await);
    sweeper.abort();
}

#[tokio::test(start_paused = true)]
async fn test_batch_of_100_is_accepted() {
    let fetcher = fetcher([]);

    let report = fetcher.evaluate_batch(&fens(100), 3).await.unwrap();
    assert_eq!(report.count, 100);
    assert_eq!(report.cached, 0);
    assert_eq!(fetcher.service().calls(), 100);
    assert!(report
        .evaluations
        .iter()
        .enumerate()
        .all(|(i, e)| e.index == i && e.is_available()));
}

#[tokio::test(start_paused = true)]
async fn test_cache_hits_are_not_rate_limited() {
    let fetcher = fetcher([]);
    fetcher.fetch("a", 3).await.unwrap();
    fetcher.fetch("b", 3).await.unwrap();

    let start = Instant::now();
    let report = fetcher.evaluate_batch(&["a", "b", "a"], 3).await.unwrap();
    assert_eq!(report.cached, 3);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_delay_only_after_network_fetches() {
    let fetcher = fetcher([]);
    fetcher.fetch("hit", 3).await.unwrap();

    let start = Instant::now();
    // miss, hit, miss: one pause after the first miss, none after the hit,
    // none after the last position
    let report = fetcher
        .evaluate_batch(&["miss-1", "hit", "miss-2"], 3)
        .await
        .unwrap();
    assert_eq!(report.cached, 1);
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert!(start.elapsed() < Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_batch_records_failures_and_continues() {
    let fetcher = fetcher([
        Reply::Eval,
        Reply::Fail(ServiceError::NotFound),
        Reply::Fail(ServiceError::Http(500)),
        Reply::Fail(ServiceError::Http(500)),
        Reply::Fail(ServiceError::Http(500)),
        Reply::Eval,
    ]);

    let report = fetcher
        .evaluate_batch(&["a", "b", "c", "d"], 3)
        .await
        .unwrap();
    let statuses: Vec<EntryStatus> = report.evaluations.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            EntryStatus::Available,
            EntryStatus::Unavailable,
            EntryStatus::Failed,
            EntryStatus::Available,
        ]
    );
    assert_eq!(report.count, 4);
    assert_eq!(
        report.evaluations[1].error.as_deref(),
        Some("Position not in cloud database")
    );
    assert!(report.evaluations[2]
        .error
        .as_deref()
        .unwrap()
        .contains("after 3 attempts"));
    assert_eq!(report.evaluations[3].fen, "d");
}

#[tokio::test(start_paused = true)]
async fn test_report_json_shape() {
    let fetcher = fetcher([]);
    let report = fetcher.evaluate_batch(&["a"], 3).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["cached"], 0);
    assert_eq!(json["evaluations"][0]["status"], "available");
    assert_eq!(json["evaluations"][0]["evaluation"]["pvs"][0]["cp"], 20);
}
