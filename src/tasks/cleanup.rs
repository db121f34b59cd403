//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory cache backend. Redis expires keys on its own and needs no sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend = Arc::new(MemoryBackend::new());
/// let cleanup_handle = spawn_cleanup_task(backend.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(backend: Arc<MemoryBackend>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting cache expiry sweep");

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.cleanup_expired().await;
            if removed > 0 {
                info!(removed, "Cache sweep removed expired entries");
            } else {
                debug!("Cache sweep found no expired entries");
            }
        }
    })
}
