//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait defined
//! in `nenpyo_core::cache`. The repository takes any `Cache`, so a shared
//! backend can be slotted in later without touching the read path.

pub mod memory;

pub use memory::MemoryCache;
