//! Request and Response models for the transcript API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    LanguageQuery, TranscriptQuery, TranscriptRequest, UrlQuery, DEFAULT_REQUEST_LANGUAGE,
};
pub use responses::{
    CacheHealth, ClearResponse, DeleteResponse, ErrorResponse, HealthResponse, TranscriptResponse,
};
