//! Transcript Provider Interface
//!
//! Boundary between the orchestrator and an external transcript extractor.

use async_trait::async_trait;
use thiserror::Error;

use super::{TranscriptSegment, VideoId};

// == Provider Error ==
/// Typed failures reported by an extraction provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("video not found or unavailable")]
    NotFound,

    /// Video exists but has no transcripts, or they are disabled
    #[error("no transcripts are available for this video")]
    NoTranscriptsAvailable,

    #[error("upstream is rate limiting requests, try again later")]
    RateLimited,

    #[error("upstream did not respond in time")]
    Timeout,

    #[error("upstream failure: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotFound => "video_not_found",
            ProviderError::NoTranscriptsAvailable => "no_transcripts_available",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Timeout => "provider_timeout",
            ProviderError::Unknown(_) => "provider_error",
        }
    }
}

// == Provider Trait ==
/// Source of raw transcript data.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Language tags the video offers transcripts in.
    async fn available_languages(&self, video_id: &VideoId) -> Result<Vec<String>, ProviderError>;

    /// Segments of the transcript in exactly `language`.
    async fn fetch_segments(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, ProviderError>;

    /// Stable name, used in logs, as `backend_used` and for per-request preference.
    fn name(&self) -> &'static str;

    /// Whether the provider can currently serve requests.
    fn is_available(&self) -> bool {
        true
    }
}
