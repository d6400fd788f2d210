//! Comparison options and configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::raster::DEFAULT_DPI;

/// Environment variable holding the recognition service API key.
pub const API_KEY_ENV: &str = "GOOGLE_CLOUD_API_KEY";

/// Environment variable overriding the result cache directory.
pub const CACHE_DIR_ENV: &str = "HANDSIM_CACHE_DIR";

/// Options for comparing documents.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Concurrent page extraction workers per document
    pub workers: usize,

    /// Timeout for each recognition request
    pub request_timeout: Duration,

    /// Rasterization resolution
    pub dpi: u32,

    /// Recognition service API key
    pub api_key: Option<String>,

    /// Result cache directory (`cached_data` when unset)
    pub cache_dir: Option<PathBuf>,

    /// Whether to read and write the result cache
    pub use_cache: bool,
}

impl CompareOptions {
    /// Create new compare options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `GOOGLE_CLOUD_API_KEY` and `HANDSIM_CACHE_DIR`.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(key) = env::var(API_KEY_ENV) {
            if !key.is_empty() {
                options.api_key = Some(key);
            }
        }
        if let Ok(dir) = env::var(CACHE_DIR_ENV) {
            if !dir.is_empty() {
                options.cache_dir = Some(PathBuf::from(dir));
            }
        }
        options
    }

    /// Set the number of extraction workers (minimum 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set rasterization DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the recognition API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the result cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Disable the result cache.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            request_timeout: Duration::from_secs(30),
            dpi: DEFAULT_DPI,
            api_key: None,
            cache_dir: None,
            use_cache: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CompareOptions::default();
        assert_eq!(options.workers, 4);
        assert_eq!(options.request_timeout, Duration::from_secs(30));
        assert_eq!(options.dpi, 200);
        assert!(options.api_key.is_none());
        assert!(options.use_cache);
    }

    #[test]
    fn test_compare_options_builder() {
        let options = CompareOptions::new()
            .with_workers(0)
            .with_dpi(300)
            .with_api_key("secret")
            .with_cache_dir("/tmp/handsim")
            .without_cache();

        assert_eq!(options.workers, 1);
        assert_eq!(options.dpi, 300);
        assert_eq!(options.api_key, Some("secret".to_string()));
        assert_eq!(options.cache_dir, Some(PathBuf::from("/tmp/handsim")));
        assert!(!options.use_cache);
    }
}
