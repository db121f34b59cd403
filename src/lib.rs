//! Transcript Cache - YouTube transcript retrieval behind a cache-aside layer
//!
//! Resolves any YouTube URL shape to a video id, picks the best available
//! language track with a fallback policy, and caches assembled transcripts
//! in Redis (or memory) with TTL expiry. Cache failures degrade to direct
//! fetches and never fail a read.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod transcript;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{CacheError, Error, Result};
pub use tasks::spawn_cleanup_task;
pub use transcript::{TranscriptRecord, TranscriptService, VideoId};
