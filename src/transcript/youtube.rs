//! YouTube Provider
//!
//! `TranscriptProvider` backed by the `ytranscript` crate. Upstream errors are
//! mapped variant by variant to `ProviderError` and never leave this module.

use async_trait::async_trait;
use html_escape::decode_html_entities;
use tracing::debug;
use ytranscript::{TranscriptConfig, YoutubeTranscript, YoutubeTranscriptError};

use super::{ProviderError, TranscriptProvider, TranscriptSegment, VideoId};

/// Tag no real track uses; asking for it makes upstream report every track it has.
const PROBE_LANGUAGE: &str = "x-probe";

#[derive(Debug, Clone, Default)]
pub struct YoutubeProvider;

impl YoutubeProvider {
    pub fn new() -> Self {
        Self
    }

    async fn fetch_raw(
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<ytranscript::TranscriptResponse>, YoutubeTranscriptError> {
        let config = TranscriptConfig {
            lang: Some(language.to_string()),
        };
        YoutubeTranscript::fetch_transcript(video_id.as_str(), Some(config)).await
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeProvider {
    async fn available_languages(&self, video_id: &VideoId) -> Result<Vec<String>, ProviderError> {
        match Self::fetch_raw(video_id, PROBE_LANGUAGE).await {
            Err(YoutubeTranscriptError::TranscriptNotAvailableLanguage(_, available, _)) => {
                debug!(video_id = %video_id, ?available, "Listed transcript tracks");
                Ok(available)
            }
            Ok(entries) => {
                let mut languages: Vec<String> = entries.into_iter().map(|e| e.lang).collect();
                languages.sort();
                languages.dedup();
                Ok(languages)
            }
            Err(err) => Err(classify(&err)),
        }
    }

    async fn fetch_segments(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, ProviderError> {
        match Self::fetch_raw(video_id, language).await {
            Ok(entries) => Ok(entries
                .into_iter()
                .map(|entry| {
                    let text = decode_html_entities(&entry.text).replace("&#39;", "'");
                    TranscriptSegment::new(entry.offset, entry.duration, text)
                })
                .collect()),
            // A vanished track classifies as NoTranscriptsAvailable
            Err(err) => Err(classify(&err)),
        }
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

/// Maps an upstream error onto the provider taxonomy.
fn classify(err: &YoutubeTranscriptError) -> ProviderError {
    match err {
        YoutubeTranscriptError::TooManyRequests => ProviderError::RateLimited,
        YoutubeTranscriptError::VideoUnavailable(_) | YoutubeTranscriptError::InvalidVideoId => {
            ProviderError::NotFound
        }
        YoutubeTranscriptError::TranscriptDisabled(_)
        | YoutubeTranscriptError::TranscriptNotAvailable(_)
        | YoutubeTranscriptError::TranscriptNotAvailableLanguage(..) => {
            ProviderError::NoTranscriptsAvailable
        }
    }
}
