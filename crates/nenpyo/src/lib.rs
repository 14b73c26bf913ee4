//! File-backed content repository for the nenpyo history timeline.
//!
//! The imperative shell around [`nenpyo_core`]: a filesystem content source,
//! an in-memory TTL cache, the cached read API, and page-facing statistics.
//!
//! ```no_run
//! use nenpyo::{build_repository, Config, HistoryRepository};
//! use nenpyo_core::history::Year;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! nenpyo::telemetry::init_tracing();
//!
//! let repository = build_repository(&Config::from_env())?;
//! let events = repository.all_events_for_year(Year::new(1945)?).await;
//! println!("{} events in 1945", events.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod service;
pub mod storage;
pub mod telemetry;

pub use cache::MemoryCache;
pub use config::{Config, ConfigError};
pub use nenpyo_core::storage::{HistoryRepository, HistorySource};
pub use service::HistoryService;
pub use storage::{CachedHistoryRepository, FsHistorySource};

/// The repository wired by [`build_repository`].
pub type DefaultRepository = CachedHistoryRepository<FsHistorySource, MemoryCache>;

/// Wires the filesystem source, memory cache and cached repository.
pub fn build_repository(config: &Config) -> Result<DefaultRepository, ConfigError> {
    config.validate()?;

    let source = Arc::new(FsHistorySource::new(config.content_root.clone()));
    let cache = Arc::new(MemoryCache::new(config.cache_capacity()?));

    tracing::debug!(
        content_root = %config.content_root.display(),
        ttl_seconds = config.cache_ttl_seconds,
        max_entries = config.cache_max_entries,
        "History repository configured"
    );

    Ok(CachedHistoryRepository::new(source, cache, config.cache_ttl()))
}

/// [`build_repository`] behind a [`HistoryService`].
pub fn build_service(config: &Config) -> Result<HistoryService, ConfigError> {
    Ok(HistoryService::new(Arc::new(build_repository(config)?)))
}
