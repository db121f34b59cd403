//! In-Process Cache Backend
//!
//! HashMap storage with TTL expiration, used when no Redis URL is configured
//! and as the substitute backend in tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry};
use crate::error::CacheError;

// == Memory Backend ==
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryBackend {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Number of stored entries, expired ones included until the next purge.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it now rather than waiting for the cleanup task
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry::new(value, ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|entry| !entry.is_expired()))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        entries.retain(|key, entry| {
            if !key.starts_with(prefix) {
                return true;
            }
            if !entry.is_expired() {
                removed += 1;
            }
            false
        });
        Ok(removed)
    }

    async fn count_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired())
            .count())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_backend_new() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.len().await, 0);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set("key1", "value1".to_string(), TTL).await.unwrap();

        assert_eq!(backend.get("key1").await.unwrap().as_deref(), Some("value1"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let backend = MemoryBackend::new();

        backend.set("key1", "value1".to_string(), TTL).await.unwrap();
        backend.set("key1", "value2".to_string(), TTL).await.unwrap();

        assert_eq!(backend.get("key1").await.unwrap().as_deref(), Some("value2"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let backend = MemoryBackend::new();

        backend.set("key1", "value1".to_string(), TTL).await.unwrap();
        assert!(backend.delete("key1").await.unwrap());
        assert!(!backend.delete("key1").await.unwrap());
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let backend = MemoryBackend::new();

        backend
            .set("key1", "value1".to_string(), Duration::from_millis(50))
            .await
            .unwrap();
        assert!(backend.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(backend.get("key1").await.unwrap(), None);
        // Expired entry is dropped on read
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_prefix_operations() {
        let backend = MemoryBackend::new();

        backend.set("transcript:a:en", "1".to_string(), TTL).await.unwrap();
        backend.set("transcript:a:es", "2".to_string(), TTL).await.unwrap();
        backend.set("transcript:b:en", "3".to_string(), TTL).await.unwrap();
        backend.set("other:a:en", "4".to_string(), TTL).await.unwrap();

        assert_eq!(backend.count_prefix("transcript:").await.unwrap(), 3);
        assert_eq!(backend.delete_prefix("transcript:a:").await.unwrap(), 2);
        assert_eq!(backend.count_prefix("transcript:").await.unwrap(), 1);
        assert_eq!(backend.get("other:a:en").await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_expired_entries_not_counted() {
        let backend = MemoryBackend::new();

        backend
            .set("transcript:a:en", "1".to_string(), Duration::from_millis(20))
            .await
            .unwrap();
        backend.set("transcript:b:en", "2".to_string(), TTL).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(backend.count_prefix("transcript:").await.unwrap(), 1);
        assert_eq!(backend.delete_prefix("transcript:").await.unwrap(), 1);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let backend = MemoryBackend::new();

        backend
            .set("key1", "value1".to_string(), Duration::from_millis(20))
            .await
            .unwrap();
        backend.set("key2", "value2".to_string(), TTL).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(backend.cleanup_expired().await, 1);
        assert_eq!(backend.len().await, 1);
        assert!(backend.get("key2").await.unwrap().is_some());
    }
}
