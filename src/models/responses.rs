//! Response DTOs for the transcript API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStatistics;
use crate::transcript::{Fetched, TranscriptRecord};

/// Response body for every transcript read
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    #[serde(flatten)]
    pub record: TranscriptRecord,
    /// End of the last segment, in seconds
    pub duration: f64,
    /// True when served from the cache
    pub cached: bool,
}

impl From<Fetched> for TranscriptResponse {
    fn from(fetched: Fetched) -> Self {
        Self {
            duration: fetched.record.duration(),
            record: fetched.record,
            cached: fetched.from_cache,
        }
    }
}

/// Response body for `DELETE /api/v1/transcript/:video_id/cache`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub removed: usize,
}

impl DeleteResponse {
    pub fn new(video_id: impl Into<String>, language: Option<String>, removed: usize) -> Self {
        let video_id = video_id.into();
        let message = match &language {
            Some(language) => format!("Cached transcript for {video_id}:{language} deleted"),
            None => format!("Cached transcripts for {video_id} deleted"),
        };
        Self {
            message,
            video_id,
            language,
            removed,
        }
    }
}

/// Response body for `DELETE /api/v1/transcript/cache/clear`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
            cleared,
        }
    }
}

/// Cache section of the health report
#[derive(Debug, Clone, Serialize)]
pub struct CacheHealth {
    /// "connected" or "error"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CacheStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CacheHealth {
    pub fn connected(stats: CacheStatistics) -> Self {
        Self {
            status: "connected",
            stats: Some(stats),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            stats: None,
            message: Some(message.into()),
        }
    }
}

/// Response body for the health endpoints
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    pub service: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheHealth>,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "YouTube Transcript API".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: CacheHealth) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable error kind, e.g. "invalid_input"
    pub error: String,
    /// Human-readable description
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
    /// True when the same request may succeed later
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            video_id: None,
            available_languages: None,
            retryable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TranscriptSegment, VideoId};

    #[test]
    fn test_transcript_response_flattens_record() {
        let id = VideoId::resolve("dQw4w9WgXcQ").unwrap();
        let record = TranscriptRecord::new(
            &id,
            "zh-CN",
            "zh-Hans",
            vec!["zh-Hans".to_string()],
            vec![
                TranscriptSegment::new(0.0, 1.5, "hi"),
                TranscriptSegment::new(1.5, 2.0, "there"),
            ],
            "youtube",
        );
        let resp = TranscriptResponse::from(Fetched {
            record,
            from_cache: true,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["language"], "zh-Hans");
        assert_eq!(json["requested_language"], "zh-CN");
        assert_eq!(json["segments"][0]["text"], "hi");
        assert_eq!(json["cached"], true);
        assert_eq!(json["duration"], 3.5);
        assert_eq!(json["backend_used"], "youtube");
    }

    #[test]
    fn test_delete_response_messages() {
        let one = DeleteResponse::new("dQw4w9WgXcQ", Some("en".to_string()), 1);
        assert!(one.message.contains("dQw4w9WgXcQ:en"));
        let all = serde_json::to_value(DeleteResponse::new("dQw4w9WgXcQ", None, 3)).unwrap();
        assert!(all.get("language").is_none());
        assert_eq!(all["removed"], 3);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(!json.contains("cache"));
    }

    #[test]
    fn test_health_with_cache_error() {
        let resp = HealthResponse::healthy().with_cache(CacheHealth::error("timed out"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cache"]["status"], "error");
        assert_eq!(json["cache"]["message"], "timed out");
    }

    #[test]
    fn test_error_response_skips_empty_fields() {
        let resp = ErrorResponse::new("invalid_input", "Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("invalid_input"));
        assert!(!json.contains("video_id"));
        assert!(!json.contains("available_languages"));
        assert!(json.contains("\"retryable\":false"));
    }
}
