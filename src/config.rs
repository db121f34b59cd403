//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection string; `None` selects the in-process cache
    pub redis_url: Option<String>,
    /// TTL in seconds for cached transcripts
    pub cache_ttl: u64,
    /// Prefix for every cache key owned by this service
    pub cache_namespace: String,
    /// Language used when neither the request nor its variants are offered
    pub default_language: Option<String>,
    /// Upper bound for a single cache round trip, in milliseconds
    pub cache_timeout_ms: u64,
    /// Upper bound for a single provider call, in seconds
    pub provider_timeout_secs: u64,
    /// HTTP bind address
    pub host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between purges of the in-process cache
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection string (default: unset, in-process cache)
    /// - `CACHE_TTL` - Transcript TTL in seconds (default: 3600)
    /// - `CACHE_NAMESPACE` - Cache key prefix (default: "transcript")
    /// - `DEFAULT_LANGUAGE` - Fallback language, empty disables it (default: "en")
    /// - `CACHE_TIMEOUT_MS` - Cache round-trip timeout (default: 500)
    /// - `PROVIDER_TIMEOUT_SECS` - Provider call timeout (default: 30)
    /// - `HOST` - Bind address (default: "0.0.0.0")
    /// - `PORT` - HTTP server port (default: 8000)
    /// - `CLEANUP_INTERVAL` - In-process cache purge frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_namespace: env::var("CACHE_NAMESPACE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cache_namespace),
            default_language: match env::var("DEFAULT_LANGUAGE") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v.trim().to_string()),
                Err(_) => defaults.default_language,
            },
            cache_timeout_ms: parse_var("CACHE_TIMEOUT_MS").unwrap_or(defaults.cache_timeout_ms),
            provider_timeout_secs: parse_var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or(defaults.provider_timeout_secs),
            host: env::var("HOST").unwrap_or(defaults.host),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            cache_ttl: 3600,
            cache_namespace: "transcript".to_string(),
            default_language: Some("en".to_string()),
            cache_timeout_ms: 500,
            provider_timeout_secs: 30,
            host: "0.0.0.0".to_string(),
            server_port: 8000,
            cleanup_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_namespace, "transcript");
        assert_eq!(config.default_language.as_deref(), Some("en"));
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_TTL");
        env::remove_var("CACHE_NAMESPACE");
        env::remove_var("DEFAULT_LANGUAGE");
        env::remove_var("PORT");

        let config = Config::from_env();
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_namespace, "transcript");
        assert_eq!(config.default_language.as_deref(), Some("en"));
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
    }
}
