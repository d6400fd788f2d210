//! Two-document comparison pipeline.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::{compare_features, diagnose};
use crate::cache::{fingerprint, FileCache, NoCache, ResultCache};
use crate::error::{Error, Result};
use crate::extract::{extract_document, FeatureExtractor, VisionExtractor};
use crate::model::{DocumentFeatureSet, SimilarityResult};
use crate::raster::{PdftoppmRasterizer, Rasterizer};

use super::options::CompareOptions;

/// Compares documents using injected collaborators.
///
/// The rasterizer, feature extractor and result cache are trait objects
/// so the scoring pipeline can run without poppler, network or disk.
pub struct Comparator {
    rasterizer: Arc<dyn Rasterizer>,
    extractor: Arc<dyn FeatureExtractor>,
    cache: Arc<dyn ResultCache>,
    workers: usize,
}

impl Comparator {
    /// Create a comparator from its collaborators, with 4 extraction workers.
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        extractor: Arc<dyn FeatureExtractor>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            rasterizer,
            extractor,
            cache,
            workers: CompareOptions::default().workers,
        }
    }

    /// Wire the default collaborators: `pdftoppm`, the Vision API and a
    /// JSON file cache (or no cache when disabled).
    pub fn from_options(options: &CompareOptions) -> Result<Self> {
        let rasterizer = Arc::new(PdftoppmRasterizer::new(options.dpi));
        let extractor = Arc::new(VisionExtractor::new(
            options.api_key.clone(),
            options.request_timeout,
        )?);
        let cache: Arc<dyn ResultCache> = match (options.use_cache, &options.cache_dir) {
            (false, _) => Arc::new(NoCache),
            (true, Some(dir)) => Arc::new(FileCache::new(dir)),
            (true, None) => Arc::new(FileCache::default()),
        };

        Ok(Self::new(rasterizer, extractor, cache).with_workers(options.workers))
    }

    /// Set the number of concurrent extraction workers (minimum 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Compare two documents given as raw bytes.
    ///
    /// A cached result for the same ordered pair is returned without any
    /// rasterization or extraction. Every failure is wrapped as
    /// [`Error::Comparison`].
    pub fn compare(&self, doc1: &[u8], doc2: &[u8]) -> Result<SimilarityResult> {
        self.try_compare(doc1, doc2).map_err(|e| {
            log::error!("handwriting comparison failed: {}", e);
            Error::comparison(e)
        })
    }

    /// Compare two documents read from disk.
    pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path1: P,
        path2: Q,
    ) -> Result<SimilarityResult> {
        let doc1 = fs::read(path1).map_err(|e| Error::comparison(e.into()))?;
        let doc2 = fs::read(path2).map_err(|e| Error::comparison(e.into()))?;
        self.compare(&doc1, &doc2)
    }

    /// Rasterize a document and extract its page features.
    pub fn extract_features(&self, document: &[u8]) -> Result<DocumentFeatureSet> {
        let pages = self.rasterizer.rasterize(document)?;
        log::debug!(
            "extracting {} pages with {} ({} workers)",
            pages.len(),
            self.extractor.name(),
            self.workers
        );
        extract_document(self.extractor.as_ref(), &pages, self.workers)
    }

    fn try_compare(&self, doc1: &[u8], doc2: &[u8]) -> Result<SimilarityResult> {
        let started = Instant::now();
        let key = fingerprint(doc1, doc2);

        if let Some(cached) = self.cache.load(&key)? {
            log::debug!("cache hit for {}", key);
            return Ok(cached);
        }
        log::info!(
            "comparing documents ({} and {} bytes), cache key {}",
            doc1.len(),
            doc2.len(),
            key
        );

        let features1 = self.extract_features(doc1)?;
        let features2 = self.extract_features(doc2)?;
        let result = analyze_pair(&features1, &features2);

        self.cache.save(&key, &result)?;
        log::info!(
            "compared documents ({} vs {} pages): similarity {:.3} in {:?}",
            features1.page_count(),
            features2.page_count(),
            result.similarity,
            started.elapsed()
        );

        Ok(result)
    }
}

/// Score and diagnose two already-extracted documents.
pub fn analyze_pair(doc1: &DocumentFeatureSet, doc2: &DocumentFeatureSet) -> SimilarityResult {
    let score = compare_features(doc1, doc2);
    let diagnostics1 = diagnose(doc1);
    let diagnostics2 = diagnose(doc2);

    SimilarityResult {
        similarity: score.similarity,
        feature_scores: score.feature_scores,
        anomalies_doc1: diagnostics1.anomalies,
        anomalies_doc2: diagnostics2.anomalies,
        variations_doc1: diagnostics1.variations,
        variations_doc2: diagnostics2.variations,
    }
}
