//! Cache Store Module
//!
//! Typed transcript cache over a pluggable backend, with bounded operations,
//! namespaced keys and hit/miss accounting.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheCounters, CacheStatistics};
use crate::error::CacheError;
use crate::transcript::{TranscriptRecord, VideoId};

/// Separator between key components.
pub const KEY_SEPARATOR: char = ':';

// == Cache Lookup ==
/// Outcome of a cache read.
#[derive(Debug)]
pub enum CacheLookup {
    Hit(TranscriptRecord),
    /// Key absent or expired
    Miss,
    /// Backend failed or timed out; callers treat this as a miss
    Unavailable(CacheError),
}

impl CacheLookup {
    pub fn into_record(self) -> Option<TranscriptRecord> {
        match self {
            CacheLookup::Hit(record) => Some(record),
            CacheLookup::Miss | CacheLookup::Unavailable(_) => None,
        }
    }
}

// == Cache Store ==
/// Shared handle to the transcript cache. Clones share backend and counters.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    counters: Arc<CacheCounters>,
    namespace: String,
    op_timeout: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store whose keys all live under `namespace`.
    pub fn new(
        backend: Arc<dyn CacheBackend>,
        namespace: impl Into<String>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            counters: Arc::new(CacheCounters::new()),
            namespace: namespace.into(),
            op_timeout,
        }
    }

    // == Keys ==
    /// Key for one (video, requested language) pair.
    ///
    /// Deterministic and unsalted so it survives restarts.
    pub fn key(&self, video_id: &VideoId, language: &str) -> String {
        format!(
            "{ns}{sep}{video_id}{sep}{language}",
            ns = self.namespace,
            sep = KEY_SEPARATOR
        )
    }

    /// Prefix shared by every language entry of one video, relative to the namespace.
    pub fn video_prefix(video_id: &VideoId) -> String {
        format!("{video_id}{KEY_SEPARATOR}")
    }

    fn scoped(&self, prefix: &str) -> String {
        format!("{}{}{}", self.namespace, KEY_SEPARATOR, prefix)
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.op_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.op_timeout.as_millis() as u64)),
        }
    }

    fn degraded(&self, operation: &str, key: &str, err: &CacheError) {
        self.counters.record_backend_error();
        warn!(
            backend = self.backend.name(),
            operation,
            key,
            error = %err,
            "Cache backend degraded"
        );
    }

    // == Get ==
    /// Looks up a record. Counts exactly one hit or one miss per call.
    pub async fn get(&self, key: &str) -> CacheLookup {
        let raw = match self.bounded(self.backend.get(key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.counters.record_miss();
                debug!(key, "Cache miss");
                return CacheLookup::Miss;
            }
            Err(err) => {
                self.counters.record_miss();
                self.degraded("get", key, &err);
                return CacheLookup::Unavailable(err);
            }
        };

        match serde_json::from_str::<TranscriptRecord>(&raw) {
            Ok(record) => {
                self.counters.record_hit();
                debug!(key, "Cache hit");
                CacheLookup::Hit(record)
            }
            Err(err) => {
                self.counters.record_miss();
                warn!(key, error = %err, "Discarding undecodable cache entry");
                if let Err(err) = self.bounded(self.backend.delete(key)).await {
                    self.degraded("delete", key, &err);
                }
                CacheLookup::Miss
            }
        }
    }

    // == Set ==
    /// Stores a record for `ttl`, replacing any previous one.
    pub async fn set(
        &self,
        key: &str,
        record: &TranscriptRecord,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let value = serde_json::to_string(record)?;
        self.bounded(self.backend.set(key, value, ttl))
            .await
            .inspect_err(|err| self.degraded("set", key, err))
    }

    // == Delete ==
    /// Removes one entry. Deleting an absent key is not an error.
    pub async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.bounded(self.backend.delete(key))
            .await
            .inspect_err(|err| self.degraded("delete", key, err))
    }

    // == Clear ==
    /// Removes every entry under `prefix`, which is relative to the namespace.
    ///
    /// An empty prefix clears the whole namespace. Returns the number removed.
    pub async fn clear(&self, prefix: &str) -> Result<usize, CacheError> {
        let scoped = self.scoped(prefix);
        self.bounded(self.backend.delete_prefix(&scoped))
            .await
            .inspect_err(|err| self.degraded("clear", &scoped, err))
    }

    // == Ping ==
    /// Checks the backend answers within the operation timeout.
    pub async fn ping(&self) -> Result<(), CacheError> {
        self.bounded(self.backend.ping())
            .await
            .inspect_err(|err| self.degraded("ping", "", err))
    }

    // == Stats ==
    /// Current counters plus the live key count under the namespace.
    pub async fn stats(&self) -> Result<CacheStatistics, CacheError> {
        let scoped = self.scoped("");
        let total_entries = self
            .bounded(self.backend.count_prefix(&scoped))
            .await
            .inspect_err(|err| self.degraded("stats", &scoped, err))?;
        Ok(self.counters.snapshot(self.backend.name(), total_entries))
    }
}
