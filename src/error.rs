//! Error types for the transcript service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::transcript::ProviderError;

// == Cache Error Enum ==
/// Failures raised by a cache backend.
///
/// These never fail a transcript read; they only surface on administrative paths.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Backend rejected the operation or the connection is down
    #[error("cache backend unavailable: {0}")]
    Backend(String),

    /// Backend did not answer within the configured timeout
    #[error("cache operation timed out after {0} ms")]
    Timeout(u64),

    /// Stored value could not be encoded or decoded
    #[error("cache serialization failed: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == Service Error Enum ==
/// Unified error type for the transcript service.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed video identifier, URL or language tag
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Neither the requested language nor any fallback is offered
    #[error("no transcript in '{requested}' for this video; available: [{}]", available.join(", "))]
    NoLanguageAvailable {
        requested: String,
        available: Vec<String>,
    },

    /// Extraction provider failure
    #[error("provider error for video {video_id}: {source}")]
    Provider {
        video_id: String,
        #[source]
        source: ProviderError,
    },

    /// Cache backend failure on an administrative path
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Nothing cached for the given video
    #[error("no cached transcripts for video {0}")]
    NotFound(String),
}

impl Error {
    /// Stable machine-readable kind, used as the `error` field of responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::NoLanguageAvailable { .. } => "no_language_available",
            Error::Provider { source, .. } => source.kind(),
            Error::Cache(_) => "cache_unavailable",
            Error::NotFound(_) => "not_found",
        }
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NoLanguageAvailable { .. } => StatusCode::NOT_FOUND,
            Error::Provider { source, .. } => match source {
                ProviderError::NotFound | ProviderError::NoTranscriptsAvailable => {
                    StatusCode::NOT_FOUND
                }
                ProviderError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                ProviderError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ProviderError::Unknown(_) => StatusCode::BAD_GATEWAY,
            },
            Error::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// True when the caller may succeed by retrying later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Provider {
                source: ProviderError::RateLimited | ProviderError::Timeout,
                ..
            } | Error::Cache(_)
        )
    }
}

// == Extractor Rejections ==
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.kind(), self.to_string());
        body.retryable = self.is_retryable();

        match &self {
            Error::NoLanguageAvailable { available, .. } => {
                body.available_languages = Some(available.clone());
            }
            Error::Provider { video_id, .. } | Error::NotFound(video_id) => {
                body.video_id = Some(video_id.clone());
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the transcript service.
pub type Result<T> = std::result::Result<T, Error>;
