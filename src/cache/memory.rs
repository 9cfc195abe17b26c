//! In-process cache backed by a `HashMap`.

use super::ResultCache;
use crate::core::error::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache that lives as long as the process. Cloning shares the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Map<String, Value>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Map<String, Value>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn forever(&self, key: &str, payload: Map<String, Value>) -> Result<()> {
        tracing::trace!(target: "mailbox_layer::cache", "Storing entry {}", key);
        self.entries.lock().insert(key.to_string(), payload);
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<()> {
        if self.entries.lock().remove(key).is_some() {
            tracing::trace!(target: "mailbox_layer::cache", "Evicted entry {}", key);
        }
        Ok(())
    }
}
