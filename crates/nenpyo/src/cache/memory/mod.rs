//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with TTL support for
//! single-process deployments.

mod cache;

pub use cache::MemoryCache;
