//! Feature extraction from page images.
//!
//! A [`FeatureExtractor`] turns one rasterized page into paragraph
//! features. Extraction never fails past the trait boundary: any error
//! degrades to an empty page and is logged. [`extract_document`] fans a
//! document's pages out over a bounded worker pool and restores page
//! order from each task's page index.
//!
//! # Example
//!
//! ```no_run
//! use handsim::extract::{extract_document, PageImage, VisionExtractor};
//! use std::time::Duration;
//!
//! fn main() -> handsim::Result<()> {
//!     let extractor = VisionExtractor::new(Some("key".to_string()), Duration::from_secs(30))?;
//!     let pages = vec![PageImage::new(1, std::fs::read("page-1.png")?)];
//!     let features = extract_document(&extractor, &pages, 4)?;
//!     println!("{} paragraphs", features.paragraph_count());
//!     Ok(())
//! }
//! ```

mod dispatch;
mod vision;

pub use dispatch::extract_document;
pub use vision::{parse_annotate_response, VisionExtractor, VISION_ENDPOINT};

use crate::error::Result;
use crate::model::PageFeatureSet;

/// A rasterized page, PNG-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl PageImage {
    /// Create a page image.
    pub fn new(number: u32, data: Vec<u8>) -> Self {
        Self { number, data }
    }
}

/// Trait for page feature extractors.
///
/// Implement [`extract_page`](FeatureExtractor::extract_page); callers use
/// [`extract`](FeatureExtractor::extract), which normalizes failures.
pub trait FeatureExtractor: Send + Sync {
    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract paragraph features from one page, reporting failures.
    fn extract_page(&self, page: &PageImage) -> Result<PageFeatureSet>;

    /// Extract paragraph features from one page.
    ///
    /// Failures are logged and yield an empty page.
    fn extract(&self, page: &PageImage) -> PageFeatureSet {
        match self.extract_page(page) {
            Ok(features) => features,
            Err(e) => {
                log::warn!(
                    "{}: extraction failed for page {}: {}",
                    self.name(),
                    page.number,
                    e
                );
                PageFeatureSet::new()
            }
        }
    }
}
