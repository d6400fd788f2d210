//! Content-addressed memoization of comparison results.
//!
//! Entries are keyed by [`fingerprint`] of the two input documents and
//! never expire. A second write of the same key simply overwrites it.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use md5::{Digest, Md5};

use crate::error::Result;
use crate::model::SimilarityResult;

/// Trait for result caches.
pub trait ResultCache: Send + Sync {
    /// Look up a result. A missing entry is `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<SimilarityResult>>;

    /// Store a result under `key`.
    fn save(&self, key: &str, result: &SimilarityResult) -> Result<()>;
}

/// Cache that never hits and discards writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResultCache for NoCache {
    fn load(&self, _key: &str) -> Result<Option<SimilarityResult>> {
        Ok(None)
    }

    fn save(&self, _key: &str, _result: &SimilarityResult) -> Result<()> {
        Ok(())
    }
}

/// Lowercase hex MD5 digest of `data`.
pub fn content_hash(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// Cache key for an ordered pair of documents.
///
/// Each document is hashed, the two hex digests are concatenated, and
/// the concatenation is hashed again. Swapping the documents changes the key.
pub fn fingerprint(doc1: &[u8], doc2: &[u8]) -> String {
    let combined = content_hash(doc1) + &content_hash(doc2);
    content_hash(combined.as_bytes())
}
