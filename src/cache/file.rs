//! JSON-file result cache.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::SimilarityResult;

use super::ResultCache;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "cached_data";

/// Cache storing one `<key>.json` file per entry.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl ResultCache for FileCache {
    fn load(&self, key: &str) -> Result<Option<SimilarityResult>> {
        let path = self.entry_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| Error::Cache(format!("corrupt entry {}: {}", path.display(), e)))
    }

    fn save(&self, key: &str, result: &SimilarityResult) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(result)?;
        fs::write(self.entry_path(key), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"));
        assert!(cache.load("abc").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested").join("cache"));

        let mut result = SimilarityResult {
            similarity: 0.123456789012345,
            ..Default::default()
        };
        result
            .feature_scores
            .insert("confidence_similarity".to_string(), 0.1 + 0.2);

        cache.save("abc", &result).unwrap();
        assert!(cache.dir().join("abc.json").exists());
        assert_eq!(cache.load("abc").unwrap(), Some(result));
    }

    #[test]
    fn test_corrupt_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        let cache = FileCache::new(dir.path());
        assert!(matches!(cache.load("bad"), Err(Error::Cache(_))));
    }
}
