//! Transcript Record Module
//!
//! The cached unit of value: one video's transcript in one resolved language.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VideoId;

// == Transcript Segment ==
/// One timed unit of subtitle text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Display duration, in seconds
    pub duration: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }
}

// == Transcript Record ==
/// A fetched transcript as stored in and served from the cache.
///
/// Segments are ordered by non-decreasing `start`. There is no mutating API;
/// a refresh builds a new record and replaces the cached one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    video_id: String,
    requested_language: String,
    language: String,
    available_languages: Vec<String>,
    segments: Vec<TranscriptSegment>,
    /// Name of the provider that produced the segments
    backend_used: String,
    fetched_at: DateTime<Utc>,
}

impl TranscriptRecord {
    // == Constructor ==
    /// Builds a record, dropping blank segments and ordering the rest by start time.
    pub fn new(
        video_id: &VideoId,
        requested_language: impl Into<String>,
        language: impl Into<String>,
        mut available_languages: Vec<String>,
        segments: Vec<TranscriptSegment>,
        backend_used: impl Into<String>,
    ) -> Self {
        let mut segments: Vec<TranscriptSegment> = segments
            .into_iter()
            .filter_map(|mut segment| {
                let trimmed = segment.text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != segment.text.len() {
                    segment.text = trimmed.to_string();
                }
                Some(segment)
            })
            .collect();
        // Stable, so segments sharing a start keep provider order
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        available_languages.sort();
        available_languages.dedup();

        Self {
            video_id: video_id.to_string(),
            requested_language: requested_language.into(),
            language: language.into(),
            available_languages,
            segments,
            backend_used: backend_used.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn requested_language(&self) -> &str {
        &self.requested_language
    }

    /// Language actually served; may differ from the requested one.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn available_languages(&self) -> &[String] {
        &self.available_languages
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn backend_used(&self) -> &str {
        &self.backend_used
    }

    /// End of the last segment, in seconds.
    pub fn duration(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.start + s.duration)
            .fold(0.0, f64::max)
    }
}
