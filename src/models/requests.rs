//! Request DTOs for the transcript API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Language used when a request does not name one.
pub const DEFAULT_REQUEST_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_REQUEST_LANGUAGE.to_string()
}

/// Request body for `POST /api/v1/transcript/`
///
/// # Fields
/// - `url`: Any supported YouTube URL
/// - `video_id`: Raw video id; takes precedence over `url`
/// - `language`: Requested language (default: "en")
/// - `backend`: Transcript backend to try first
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub backend: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl TranscriptRequest {
    /// The string to resolve into a video id.
    pub fn input(&self) -> Result<&str> {
        non_blank(&self.video_id)
            .or_else(|| non_blank(&self.url))
            .ok_or_else(|| Error::InvalidInput("either video_id or url must be provided".to_string()))
    }

    pub fn backend(&self) -> Option<&str> {
        non_blank(&self.backend)
    }
}

/// Query string for `GET /api/v1/transcript/:video_id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptQuery {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub backend: Option<String>,
}

impl TranscriptQuery {
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_REQUEST_LANGUAGE)
    }

    pub fn backend(&self) -> Option<&str> {
        non_blank(&self.backend)
    }
}

/// Query string for cache deletion; no language means every language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub language: Option<String>,
}

/// Query string for `GET /api/v1/transcript/?url=...`
#[derive(Debug, Clone, Deserialize)]
pub struct UrlQuery {
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub backend: Option<String>,
}

impl UrlQuery {
    pub fn backend(&self) -> Option<&str> {
        non_blank(&self.backend)
    }
}
