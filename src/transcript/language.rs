//! Language Resolution Module
//!
//! Picks the transcript track that best matches a requested language tag.
//!
//! # Resolution Order
//! 1. Exact match (case-insensitive, `_` equivalent to `-`)
//! 2. Script-family variants from [`FALLBACK_TABLE`]
//! 3. Any available tag sharing the primary subtag, lowest first
//! 4. The configured default language, when permitted and available
//! 5. `NoLanguageAvailable`

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Bumped whenever [`FALLBACK_TABLE`] changes meaning.
pub const FALLBACK_TABLE_VERSION: u32 = 1;

/// Ordered variants accepted for a requested tag, keyed by normalized tag.
///
/// The Chinese orderings are a placeholder policy: simplified first for
/// mainland and generic requests, traditional first for Taiwan and Hong Kong.
pub const FALLBACK_TABLE: &[(&str, &[&str])] = &[
    ("zh", &["zh-Hans", "zh", "zh-CN", "cmn", "zh-Hant", "zh-TW", "zh-HK"]),
    ("zh-cn", &["zh-Hans", "zh-CN", "zh", "cmn", "zh-Hant", "zh-TW"]),
    ("zh-sg", &["zh-Hans", "zh-SG", "zh-CN", "zh", "zh-Hant"]),
    ("zh-hans", &["zh-Hans", "zh-CN", "zh", "cmn", "zh-Hant", "zh-TW"]),
    ("zh-tw", &["zh-Hant", "zh-TW", "zh-HK", "zh", "zh-Hans", "zh-CN"]),
    ("zh-hant", &["zh-Hant", "zh-TW", "zh-HK", "zh", "zh-Hans", "zh-CN"]),
    ("zh-hk", &["zh-HK", "zh-Hant", "zh-TW", "yue", "zh", "zh-Hans"]),
    ("he", &["he", "iw"]),
    ("iw", &["iw", "he"]),
    ("id", &["id", "in"]),
    ("in", &["in", "id"]),
    ("yi", &["yi", "ji"]),
    ("ji", &["ji", "yi"]),
    ("fil", &["fil", "tl"]),
    ("tl", &["tl", "fil"]),
];

// == Tag Helpers ==
/// Lowercases and unifies `_` to `-` for comparison.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// Portion of a tag before the first region or script separator.
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Checks `primary[-subtag]*`: 2 or 3 letters, then 1 to 8 alphanumerics per subtag.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut parts = tag.split(['-', '_']);
    let primary_ok = parts.next().is_some_and(|primary| {
        (2..=3).contains(&primary.len()) && primary.bytes().all(|b| b.is_ascii_alphabetic())
    });
    primary_ok
        && parts.all(|part| {
            (1..=8).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_alphanumeric())
        })
}

fn table_variants(requested: &str) -> Option<&'static [&'static str]> {
    FALLBACK_TABLE
        .iter()
        .find(|(key, _)| *key == requested)
        .map(|(_, variants)| *variants)
}

// == Language Resolver ==
/// Deterministic language selection with an optional default fallback.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    default_language: Option<String>,
}

impl LanguageResolver {
    pub fn new(default_language: Option<String>) -> Self {
        Self {
            default_language: default_language.filter(|tag| !tag.trim().is_empty()),
        }
    }

    /// Resolver that never substitutes a default language.
    pub fn without_default() -> Self {
        Self {
            default_language: None,
        }
    }

    // == Select ==
    /// Selects the best available tag for `requested`.
    ///
    /// The returned tag is spelled the way the upstream advertises it.
    pub fn select<S: AsRef<str>>(&self, requested: &str, available: &[S]) -> Result<String> {
        // BTreeSet gives a stable iteration order regardless of input order
        let offered: BTreeSet<&str> = available.iter().map(|tag| tag.as_ref()).collect();
        let find = |wanted: &str| -> Option<String> {
            let wanted = normalize_tag(wanted);
            offered
                .iter()
                .find(|tag| normalize_tag(tag) == wanted)
                .map(|tag| (*tag).to_string())
        };

        if let Some(tag) = find(requested) {
            return Ok(tag);
        }

        let normalized = normalize_tag(requested);
        if let Some(variants) = table_variants(&normalized) {
            if let Some(tag) = variants.iter().find_map(|variant| find(variant)) {
                return Ok(tag);
            }
        }

        let primary = primary_subtag(&normalized);
        if let Some(tag) = offered
            .iter()
            .filter(|tag| primary_subtag(tag).eq_ignore_ascii_case(primary))
            .min()
        {
            return Ok((*tag).to_string());
        }

        if let Some(tag) = self.default_language.as_deref().and_then(|d| find(d)) {
            return Ok(tag);
        }

        Err(Error::NoLanguageAvailable {
            requested: requested.to_string(),
            available: offered.iter().map(|tag| (*tag).to_string()).collect(),
        })
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new(Some("en".to_string()))
    }
}
