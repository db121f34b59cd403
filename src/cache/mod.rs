//! Cache Module
//!
//! Transcript caching with TTL expiration over Redis or an in-process map.

mod backend;
mod entry;
mod memory;
mod redis_backend;
mod stats;
mod store;


// Re-export public types
pub use backend::CacheBackend;
pub use entry::CacheEntry;
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use stats::{CacheCounters, CacheStatistics};
pub use store::{CacheLookup, CacheStore, KEY_SEPARATOR};
