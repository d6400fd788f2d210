//! In-process result cache.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::model::SimilarityResult;

use super::ResultCache;

/// Cache held in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, SimilarityResult>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for MemoryCache {
    fn load(&self, key: &str) -> Result<Option<SimilarityResult>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Cache("memory cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, result: &SimilarityResult) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Cache("memory cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), result.clone());
        Ok(())
    }
}
