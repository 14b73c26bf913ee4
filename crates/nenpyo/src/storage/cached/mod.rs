//! Cached repository decorator.
//!
//! Wraps a [`HistorySource`](nenpyo_core::storage::HistorySource) with a
//! read-through cache and exposes the infallible
//! [`HistoryRepository`](nenpyo_core::storage::HistoryRepository) read API.
//!
//! # Example
//!
//! ```no_run
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use nenpyo::cache::MemoryCache;
//! use nenpyo::storage::{CachedHistoryRepository, FsHistorySource};
//!
//! let source = Arc::new(FsHistorySource::new("src/data"));
//! let cache = Arc::new(MemoryCache::new(NonZeroUsize::new(10_000).unwrap()));
//! let repository = CachedHistoryRepository::new(source, cache, Duration::from_secs(600));
//! ```

mod history;

pub use history::CachedHistoryRepository;
