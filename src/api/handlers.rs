//! API Handlers
//!
//! HTTP request handlers for each transcript endpoint. Handlers only
//! translate between HTTP and [`TranscriptService`]; errors render through
//! [`crate::error::Error`]'s `IntoResponse`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::extract::{ApiJson, ApiQuery};
use crate::cache::{CacheStatistics, CacheStore, MemoryBackend, RedisBackend};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    CacheHealth, ClearResponse, DeleteResponse, HealthResponse, LanguageQuery, TranscriptQuery,
    TranscriptRequest, TranscriptResponse, UrlQuery,
};
use crate::transcript::{
    is_valid_id, ProviderStatus, TranscriptService, YoutubeProvider, FALLBACK_TABLE_VERSION,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranscriptService>,
}

impl AppState {
    pub fn new(service: TranscriptService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the production wiring: YouTube provider plus Redis when
    /// `REDIS_URL` is set, otherwise the in-memory backend.
    ///
    /// The memory backend is returned as well so the caller can run
    /// the expiry sweep against it.
    pub fn from_config(config: &Config) -> Result<(Self, Option<Arc<MemoryBackend>>)> {
        let (cache, memory) = match &config.redis_url {
            Some(url) => {
                let backend = Arc::new(RedisBackend::new(url)?);
                let cache = CacheStore::new(
                    backend,
                    config.cache_namespace.clone(),
                    config.cache_timeout(),
                );
                (cache, None)
            }
            None => {
                let backend = Arc::new(MemoryBackend::new());
                let cache = CacheStore::new(
                    backend.clone(),
                    config.cache_namespace.clone(),
                    config.cache_timeout(),
                );
                (cache, Some(backend))
            }
        };

        let service =
            TranscriptService::from_config(config, Arc::new(YoutubeProvider::new()), cache);
        Ok((Self::new(service), memory))
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "YouTube Transcript API",
        "version": env!("CARGO_PKG_VERSION"),
        "language_fallback_version": FALLBACK_TABLE_VERSION,
        "endpoints": {
            "health": "/api/v1/transcript/health",
            "backends": "/api/v1/transcript/backends",
            "get_by_id": "/api/v1/transcript/{video_id}?language=en",
            "get_by_url": "/api/v1/transcript/?url=...&language=en",
            "post": "/api/v1/transcript/",
            "delete_cache": "/api/v1/transcript/{video_id}/cache",
            "cache_stats": "/api/v1/transcript/cache/stats",
            "clear_cache": "/api/v1/transcript/cache/clear"
        }
    }))
}

/// Handler for GET /health
///
/// Liveness only; never touches the cache.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /api/v1/transcript/health
///
/// Always 200; a backend that fails its ping is reported in the `cache` section.
pub async fn transcript_health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = match state.service.check_cache().await {
        Ok(stats) => CacheHealth::connected(stats),
        Err(err) => CacheHealth::error(err.to_string()),
    };
    Json(HealthResponse::healthy().with_cache(cache))
}

/// Handler for GET /api/v1/transcript/backends
pub async fn backends_handler(State(state): State<AppState>) -> Json<ProviderStatus> {
    Json(state.service.provider_status())
}

/// Handler for GET /api/v1/transcript/:video_id
pub async fn get_by_id_handler(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ApiQuery(query): ApiQuery<TranscriptQuery>,
) -> Result<Json<TranscriptResponse>> {
    if !is_valid_id(&video_id) {
        return Err(Error::InvalidInput(format!(
            "not a YouTube video id: {video_id:?}"
        )));
    }

    let fetched = state
        .service
        .fetch_preferring(&video_id, query.language_or_default(), query.backend())
        .await?;
    Ok(Json(fetched.into()))
}

/// Handler for GET /api/v1/transcript/?url=...
pub async fn get_by_url_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UrlQuery>,
) -> Result<Json<TranscriptResponse>> {
    let fetched = state
        .service
        .fetch_preferring(&query.url, &query.language, query.backend())
        .await?;
    Ok(Json(fetched.into()))
}

/// Handler for POST /api/v1/transcript/
pub async fn post_transcript_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>> {
    let fetched = state
        .service
        .fetch_preferring(req.input()?, &req.language, req.backend())
        .await?;
    Ok(Json(fetched.into()))
}

/// Handler for DELETE /api/v1/transcript/:video_id/cache
///
/// With `language`, removes that single entry (idempotent). Without it,
/// removes every cached language of the video and 404s when there were none.
pub async fn delete_cached_handler(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> Result<Json<DeleteResponse>> {
    let removed = match &query.language {
        Some(language) => {
            let removed = state.service.clear_language(&video_id, language).await?;
            usize::from(removed)
        }
        None => state.service.clear_one(&video_id).await?,
    };

    Ok(Json(DeleteResponse::new(video_id, query.language, removed)))
}

/// Handler for GET /api/v1/transcript/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<CacheStatistics>> {
    Ok(Json(state.service.cache_stats().await?))
}

/// Handler for DELETE /api/v1/transcript/cache/clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = state.service.clear_all().await?;
    Ok(Json(ClearResponse::new(cleared)))
}
