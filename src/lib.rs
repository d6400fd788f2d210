//! # handsim
//!
//! Handwriting similarity scoring for scanned documents.
//!
//! This library compares two scanned or handwritten documents using
//! paragraph-level features from a handwriting/OCR recognition service,
//! and reports a similarity score plus internal-consistency diagnostics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use handsim::{compare_files, render, CompareOptions};
//!
//! fn main() -> handsim::Result<()> {
//!     let options = CompareOptions::from_env();
//!     let result = compare_files("letter_a.pdf", "letter_b.pdf", &options)?;
//!
//!     println!("{}", render::to_text(&result));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Rasterization**: each document is rendered to page images
//! - **Extraction**: pages are sent to the recognizer by a bounded worker
//!   pool; results are restored to page order and failed pages become empty
//! - **Diagnostics**: per-page paragraph anomalies and page-to-page variations
//! - **Scoring**: weighted per-dimension similarity of flattened features
//! - **Caching**: results are memoized by a fingerprint of both inputs
//!
//! The collaborators are traits ([`Rasterizer`], [`FeatureExtractor`],
//! [`ResultCache`]), so the analysis can run entirely offline.

pub mod analysis;
pub mod cache;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod stats;

// Re-export commonly used types
pub use analysis::{compare_features, diagnose, DocumentDiagnostics, SimilarityScore};
pub use cache::{fingerprint, FileCache, MemoryCache, NoCache, ResultCache};
pub use error::{Error, Result};
pub use extract::{FeatureExtractor, PageImage, VisionExtractor};
pub use model::{
    AnomalyRecord, DeviationDetail, Dimension, DocumentFeatureSet, PageFeatureSet, PageSummary,
    ParagraphFeature, SimilarityResult, VariationChange, VariationRecord,
};
pub use pipeline::{analyze_pair, Comparator, CompareOptions};
pub use raster::{PdftoppmRasterizer, Rasterizer};
pub use render::JsonFormat;

use std::path::Path;

/// Compare two documents given as raw PDF bytes.
///
/// Uses the default collaborators configured from the environment
/// (`GOOGLE_CLOUD_API_KEY`, `HANDSIM_CACHE_DIR`).
///
/// # Example
///
/// ```no_run
/// use handsim::compare;
///
/// let doc1 = std::fs::read("a.pdf").unwrap();
/// let doc2 = std::fs::read("b.pdf").unwrap();
/// let result = compare(&doc1, &doc2).unwrap();
/// println!("Similarity: {:.2}", result.similarity);
/// ```
pub fn compare(doc1: &[u8], doc2: &[u8]) -> Result<SimilarityResult> {
    compare_with_options(doc1, doc2, &CompareOptions::from_env())
}

/// Compare two documents given as raw PDF bytes with custom options.
pub fn compare_with_options(
    doc1: &[u8],
    doc2: &[u8],
    options: &CompareOptions,
) -> Result<SimilarityResult> {
    Comparator::from_options(options)
        .map_err(Error::comparison)?
        .compare(doc1, doc2)
}

/// Compare two PDF files.
///
/// # Example
///
/// ```no_run
/// use handsim::{compare_files, CompareOptions};
///
/// let options = CompareOptions::new().with_api_key("key").with_workers(8);
/// let result = compare_files("a.pdf", "b.pdf", &options).unwrap();
/// println!("{} anomalies", result.anomaly_count());
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    path1: P,
    path2: Q,
    options: &CompareOptions,
) -> Result<SimilarityResult> {
    Comparator::from_options(options)
        .map_err(Error::comparison)?
        .compare_files(path1, path2)
}

/// Extract the feature set of one PDF file.
pub fn extract_file<P: AsRef<Path>>(
    path: P,
    options: &CompareOptions,
) -> Result<DocumentFeatureSet> {
    let data = std::fs::read(path)?;
    Comparator::from_options(options)?.extract_features(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_files_missing_input_is_wrapped() {
        let options = CompareOptions::new().without_cache();
        let err = compare_files(
            "/nonexistent/handsim-a.pdf",
            "/nonexistent/handsim-b.pdf",
            &options,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Comparison(_)));
        assert!(err
            .to_string()
            .starts_with("Error computing handwriting similarity"));
    }

    #[test]
    fn test_compare_non_pdf_is_wrapped() {
        let options = CompareOptions::new().without_cache();
        let err = compare_with_options(b"not a pdf", b"also not", &options).unwrap_err();

        match err {
            Error::Comparison(inner) => assert!(matches!(*inner, Error::UnknownFormat)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_reexports() {
        let _options = CompareOptions::default();
        let _cache = MemoryCache::new();
        let _format = JsonFormat::Pretty;
        assert_eq!(Dimension::ALL.len(), 4);
    }
}
