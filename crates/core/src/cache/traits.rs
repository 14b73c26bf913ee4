use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Values are opaque bytes; see the `serialize_*` functions for the encoding of
/// domain records.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a live value from the cache by key. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry.
    async fn clear(&self) -> Result<()>;
}
