//! Transcript Service
//!
//! Cache-aside coordinator between the transcript providers and the cache.
//!
//! # Read Path
//! 1. Resolve the video id and validate the language tag
//! 2. Return the cached record on a hit
//! 3. On a miss, walk the provider chain: list tracks, resolve the language,
//!    fetch segments; a failing provider hands over to the next one
//! 4. Build the record, cache it best-effort, return it

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{CacheStatistics, CacheStore};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::transcript::language::is_valid_tag;
use crate::transcript::{
    FallbackProvider, LanguageResolver, ProviderError, ProviderStatus, TranscriptProvider,
    TranscriptRecord, VideoId,
};

// == Fetched ==
/// A record together with where it came from.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub record: TranscriptRecord,
    pub from_cache: bool,
}

// == Transcript Service ==
/// Stateless orchestrator; safe to share across concurrent requests.
#[derive(Clone)]
pub struct TranscriptService {
    providers: FallbackProvider,
    cache: CacheStore,
    languages: LanguageResolver,
    ttl: Duration,
    provider_timeout: Duration,
}

impl TranscriptService {
    // == Constructor ==
    pub fn new(
        provider: Arc<dyn TranscriptProvider>,
        cache: CacheStore,
        languages: LanguageResolver,
        ttl: Duration,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            providers: FallbackProvider::new(provider),
            cache,
            languages,
            ttl,
            provider_timeout,
        }
    }

    /// Wires a service from configuration values.
    pub fn from_config(
        config: &Config,
        provider: Arc<dyn TranscriptProvider>,
        cache: CacheStore,
    ) -> Self {
        Self::new(
            provider,
            cache,
            LanguageResolver::new(config.default_language.clone()),
            config.cache_ttl(),
            config.provider_timeout(),
        )
    }

    /// Adds a provider tried when every earlier one fails.
    pub fn with_fallback(mut self, provider: Arc<dyn TranscriptProvider>) -> Self {
        self.providers = self.providers.with_fallback(provider);
        self
    }

    pub fn provider_status(&self) -> ProviderStatus {
        self.providers.status()
    }

    // == Fetch ==
    /// Returns the transcript of `input` (raw id or URL) in the best match for `language`.
    pub async fn fetch(&self, input: &str, language: &str) -> Result<TranscriptRecord> {
        self.fetch_with_origin(input, language)
            .await
            .map(|fetched| fetched.record)
    }

    /// Like [`fetch`](Self::fetch), also reporting whether the cache answered.
    pub async fn fetch_with_origin(&self, input: &str, language: &str) -> Result<Fetched> {
        self.fetch_preferring(input, language, None).await
    }

    /// Like [`fetch_with_origin`](Self::fetch_with_origin), trying the
    /// provider named `backend` first on a miss.
    ///
    /// The preference never affects the cache key; a hit is served whichever
    /// provider produced it.
    pub async fn fetch_preferring(
        &self,
        input: &str,
        language: &str,
        backend: Option<&str>,
    ) -> Result<Fetched> {
        let video_id = VideoId::resolve(input)?;
        let language = checked_tag(language)?;

        let key = self.cache.key(&video_id, language);
        // Unavailable was already logged by the store; fall through to the providers
        if let Some(record) = self.cache.get(&key).await.into_record() {
            return Ok(Fetched {
                record,
                from_cache: true,
            });
        }

        let record = self.fetch_from_chain(&video_id, language, backend).await?;

        if let Err(err) = self.cache.set(&key, &record, self.ttl).await {
            warn!(video_id = %video_id, key = %key, error = %err, "Failed to cache transcript");
        }

        Ok(Fetched {
            record,
            from_cache: false,
        })
    }

    /// Tries each provider in order. `NotFound` is final: the video does not
    /// exist, so no other provider is asked. Otherwise the last error wins.
    async fn fetch_from_chain(
        &self,
        video_id: &VideoId,
        requested: &str,
        backend: Option<&str>,
    ) -> Result<TranscriptRecord> {
        let mut last_error = None;

        for provider in self.providers.attempt_order(backend) {
            match self.fetch_from_provider(&provider, video_id, requested).await {
                Ok(record) => return Ok(record),
                Err(
                    err @ Error::Provider {
                        source: ProviderError::NotFound,
                        ..
                    },
                ) => return Err(err),
                Err(err) => {
                    warn!(
                        video_id = %video_id,
                        backend = provider.name(),
                        error = %err,
                        "Transcript backend failed, trying next"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Provider {
            video_id: video_id.to_string(),
            source: ProviderError::Unknown("no transcript backend is available".to_string()),
        }))
    }

    async fn fetch_from_provider(
        &self,
        provider: &Arc<dyn TranscriptProvider>,
        video_id: &VideoId,
        requested: &str,
    ) -> Result<TranscriptRecord> {
        let available = self
            .call_provider(provider, video_id, provider.available_languages(video_id))
            .await?;
        if available.is_empty() {
            return Err(Error::Provider {
                video_id: video_id.to_string(),
                source: ProviderError::NoTranscriptsAvailable,
            });
        }

        let resolved = self.languages.select(requested, &available)?;
        if resolved != requested {
            info!(video_id = %video_id, requested, resolved = %resolved, "Using fallback language");
        }

        let segments = self
            .call_provider(provider, video_id, provider.fetch_segments(video_id, &resolved))
            .await?;
        info!(
            video_id = %video_id,
            language = %resolved,
            segments = segments.len(),
            backend = provider.name(),
            "Fetched transcript"
        );

        Ok(TranscriptRecord::new(
            video_id,
            requested,
            resolved,
            available,
            segments,
            provider.name(),
        ))
    }

    async fn call_provider<T>(
        &self,
        provider: &Arc<dyn TranscriptProvider>,
        video_id: &VideoId,
        call: impl Future<Output = std::result::Result<T, ProviderError>>,
    ) -> Result<T> {
        let outcome = match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::Timeout),
        };
        outcome.map_err(|source| {
            warn!(
                video_id = %video_id,
                backend = provider.name(),
                error = %source,
                "Provider call failed"
            );
            Error::Provider {
                video_id: video_id.to_string(),
                source,
            }
        })
    }

    // == Administrative Operations ==
    /// Cache counters and key count.
    pub async fn cache_stats(&self) -> Result<CacheStatistics> {
        Ok(self.cache.stats().await?)
    }

    /// Pings the cache backend, then reads its statistics.
    pub async fn check_cache(&self) -> Result<CacheStatistics> {
        self.cache.ping().await?;
        self.cache_stats().await
    }

    /// Removes every transcript this service cached. Returns the count removed.
    pub async fn clear_all(&self) -> Result<usize> {
        let removed = self.cache.clear("").await?;
        info!(removed, "Cleared transcript cache");
        Ok(removed)
    }

    /// Removes every cached language of one video.
    ///
    /// Fails with `NotFound` when nothing was cached for it.
    pub async fn clear_one(&self, input: &str) -> Result<usize> {
        let video_id = VideoId::resolve(input)?;
        let removed = self.cache.clear(&CacheStore::video_prefix(&video_id)).await?;
        if removed == 0 {
            return Err(Error::NotFound(video_id.to_string()));
        }
        info!(video_id = %video_id, removed, "Cleared cached transcripts");
        Ok(removed)
    }

    /// Removes the entry for one (video, requested language) pair. Idempotent.
    pub async fn clear_language(&self, input: &str, language: &str) -> Result<bool> {
        let video_id = VideoId::resolve(input)?;
        let key = self.cache.key(&video_id, checked_tag(language)?);
        Ok(self.cache.delete(&key).await?)
    }
}

/// Trims `language` and rejects anything that is not a language tag.
fn checked_tag(language: &str) -> Result<&str> {
    let language = language.trim();
    if !is_valid_tag(language) {
        return Err(Error::InvalidInput(format!(
            "not a language code: {language:?}"
        )));
    }
    Ok(language)
}
