//! Storage implementations.
//!
//! - [`filesystem`]: reads the YAML content tree (the only production source).
//! - [`cached`]: read-through caching decorator exposing the read API.

pub mod cached;
pub mod filesystem;

pub use cached::CachedHistoryRepository;
pub use filesystem::FsHistorySource;
