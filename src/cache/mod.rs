//! Cache port used to store validation results between checks.

pub mod memory;

pub use memory::MemoryCache;

use crate::core::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Key/value store for serialized validation results.
///
/// Implementations must be thread-safe (Send + Sync). Entries written with
/// [`ResultCache::forever`] never expire on their own.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Returns the stored payload for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Map<String, Value>>>;

    /// Stores `payload` under `key` with no expiry, replacing any previous entry.
    async fn forever(&self, key: &str, payload: Map<String, Value>) -> Result<()>;

    /// Removes the entry under `key`. Removing a missing key is not an error.
    async fn forget(&self, key: &str) -> Result<()>;
}
