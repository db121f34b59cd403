//! Video Identifier Module
//!
//! Extracts canonical YouTube video ids from raw ids and URLs.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Length of every YouTube video id.
const VIDEO_ID_LEN: usize = 11;

/// Path prefixes that carry the id as the next segment, in priority order.
const EMBED_PATH_PREFIXES: &[&str] = &["embed", "v", "e", "shorts", "live"];

// == Video Id ==
/// A validated YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    // == Resolve ==
    /// Resolves a raw id or a watch, short-link or embed URL into a `VideoId`.
    ///
    /// URL shapes are tried in a fixed order: the `v` query parameter of a
    /// watch URL, then the `youtu.be` path, then embed-style paths.
    pub fn resolve(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if is_valid_id(trimmed) {
            return Ok(Self(trimmed.to_string()));
        }

        parse_url(trimmed)
            .and_then(|url| {
                from_watch_url(&url)
                    .or_else(|| from_short_link(&url))
                    .or_else(|| from_embed_url(&url))
            })
            .map(Self)
            .ok_or_else(|| Error::InvalidInput(format!("not a YouTube video id or URL: {input:?}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch-page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks the id grammar: exactly 11 characters from `[A-Za-z0-9_-]`.
pub fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn parse_url(input: &str) -> Option<Url> {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return None;
    }
    let parsed = match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{input}")).ok(),
        Err(_) => None,
    };
    parsed.filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn host_is(url: &Url, domain: &str) -> bool {
    url.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}

fn is_youtube_host(url: &Url) -> bool {
    host_is(url, "youtube.com") || host_is(url, "youtube-nocookie.com")
}

fn from_watch_url(url: &Url) -> Option<String> {
    if !is_youtube_host(url) {
        return None;
    }
    url.query_pairs()
        .find(|(name, _)| name == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| is_valid_id(id))
}

fn from_short_link(url: &Url) -> Option<String> {
    if !host_is(url, "youtu.be") {
        return None;
    }
    url.path_segments()?
        .next()
        .filter(|id| is_valid_id(id))
        .map(str::to_string)
}

fn from_embed_url(url: &Url) -> Option<String> {
    if !is_youtube_host(url) {
        return None;
    }
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [prefix, id, ..] if EMBED_PATH_PREFIXES.contains(prefix) && is_valid_id(id) => {
            Some((*id).to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn resolved(input: &str) -> String {
        VideoId::resolve(input).unwrap().to_string()
    }

    #[test]
    fn test_raw_id_unchanged() {
        assert_eq!(resolved(ID), ID);
        assert_eq!(resolved("  dQw4w9WgXcQ\n"), ID);
        assert_eq!(resolved("a-b_c-d_e-f"), "a-b_c-d_e-f");
    }

    #[test]
    fn test_watch_urls() {
        assert_eq!(resolved("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"), ID);
        assert_eq!(
            resolved("https://music.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ"),
            ID
        );
        assert_eq!(resolved("youtube.com/watch?v=dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("http://youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_short_links() {
        assert_eq!(resolved("https://youtu.be/dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("https://youtu.be/dQw4w9WgXcQ?si=abcdef&t=10"), ID);
        assert_eq!(resolved("youtu.be/dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(resolved("https://www.youtube.com/embed/dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?rel=0"), ID);
        assert_eq!(resolved("https://www.youtube.com/v/dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("https://www.youtube.com/shorts/dQw4w9WgXcQ"), ID);
        assert_eq!(resolved("https://www.youtube.com/live/dQw4w9WgXcQ?feature=share"), ID);
    }

    #[test]
    fn test_watch_parameter_wins_over_path() {
        // The query parameter is tried before embed paths
        assert_eq!(
            resolved("https://www.youtube.com/embed/aaaaaaaaaaa?v=dQw4w9WgXcQ"),
            ID
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in [
            "",
            "   ",
            "short",
            "dQw4w9WgXcQX",
            "dQw4w9WgXc!",
            "not_a_valid_video_id",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/",
            "https://www.youtube.com/watch?v=tooShort",
            "https://www.youtube.com/channel/UC38IQsAvIsxxjztdMZQtwHA",
            "ftp://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://notyoutube.com/watch?v=dQw4w9WgXcQ",
        ] {
            let result = VideoId::resolve(input);
            assert!(
                matches!(result, Err(Error::InvalidInput(_))),
                "expected InvalidInput for {input:?}"
            );
        }
    }

    #[test]
    fn test_error_carries_original_input() {
        let err = VideoId::resolve("https://example.com/x").unwrap_err();
        assert!(err.to_string().contains("https://example.com/x"));
    }

    #[test]
    fn test_watch_url_roundtrip() {
        let id = VideoId::resolve(ID).unwrap();
        assert_eq!(VideoId::resolve(&id.watch_url()).unwrap(), id);
    }
}
