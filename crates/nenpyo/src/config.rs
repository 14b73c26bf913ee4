use std::{env, num::NonZeroUsize, path::PathBuf, time::Duration};

use thiserror::Error;

/// Default cache TTL (10 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
/// Default maximum number of cache entries.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;
/// Largest accepted cache TTL (one year).
pub const MAX_CACHE_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;
/// Default content root, relative to the working directory.
pub const DEFAULT_CONTENT_ROOT: &str = "src/data";

/// Errors found when checking a configuration before use.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Content root cannot be empty")]
    EmptyContentRoot,
    #[error("Cache must hold at least one entry")]
    ZeroCacheEntries,
    #[error("Cache TTL of {0}s exceeds the maximum of {MAX_CACHE_TTL_SECONDS}s")]
    CacheTtlTooLarge(u64),
}

/// Repository configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the content tree (default: "src/data")
    pub content_root: PathBuf,
    /// Cache TTL in seconds (default: 600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_ROOT` - Root of the content tree (default: "src/data")
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            content_root: env::var("CONTENT_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONTENT_ROOT)),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
        }
    }

    /// Configuration for a content tree at `content_root` with default cache settings.
    pub fn with_content_root(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the cache capacity, rejecting zero.
    pub fn cache_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.cache_max_entries).ok_or(ConfigError::ZeroCacheEntries)
    }

    /// Checks the values that cannot be defaulted away.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyContentRoot);
        }
        if self.cache_ttl_seconds > MAX_CACHE_TTL_SECONDS {
            return Err(ConfigError::CacheTtlTooLarge(self.cache_ttl_seconds));
        }
        self.cache_capacity()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
