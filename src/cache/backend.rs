//! Cache Backend Interface
//!
//! Raw string key-value operations with per-key expiry.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Key-value storage the `CacheStore` runs on.
///
/// Implementations must be safe for concurrent use through `&self`; every
/// operation touches a single key or a prefix scan, never a multi-key transaction.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value and expiry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Removes every key starting with `prefix`. Returns how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Counts live keys starting with `prefix`.
    async fn count_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Checks the backend is reachable. Backends without a connection are always up.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    /// Short name used in logs and statistics.
    fn name(&self) -> &'static str;
}
