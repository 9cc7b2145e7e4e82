//! Time-bounded evaluation cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::response::CloudEval;

/// Cache key: the same position requested with a different number of
/// variations is a different entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fen: String,
    pub multi_pv: u8,
}

impl CacheKey {
    pub fn new(fen: impl Into<String>, multi_pv: u8) -> Self {
        Self {
            fen: fen.into(),
            multi_pv,
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: CloudEval,
    stored_at: Instant,
}

/// Evaluation cache shared across requests.
///
/// An entry expires once it is `ttl` old. Expired entries are never
/// returned; they are dropped when read and by [`EvalCache::purge_expired`].
#[derive(Debug)]
pub struct EvalCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, Entry>>,
}

impl EvalCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }

    /// Returns the cached evaluation if present and not expired.
    pub async fn get(&self, key: &CacheKey) -> Option<CloudEval> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if self.is_fresh(entry) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: another task may have refreshed it.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| !self.is_fresh(e)) {
            entries.remove(key);
            tracing::debug!(fen = %key.fen, multi_pv = key.multi_pv, "expired cache entry evicted");
        }
        None
    }

    /// Stores an evaluation. A later insert for the same key replaces it.
    pub async fn insert(&self, key: CacheKey, value: CloudEval) {
        let entry = Entry {
            value,
            stored_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Spawns a task that purges expired entries every `period`.
    ///
    /// The task holds only a weak reference and exits once the cache has
    /// been dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let purged = cache.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "swept expired evaluations");
                }
            }
        })
    }
}
