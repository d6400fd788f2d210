//! Bounded concurrent dispatch of page extraction.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crossbeam_channel::unbounded;
use rayon::ThreadPoolBuilder;

use crate::error::Result;
use crate::model::{DocumentFeatureSet, PageFeatureSet};

use super::{FeatureExtractor, PageImage};

/// Extract features for every page of a document.
///
/// Pages are processed by a pool of `workers` threads (at least one). Each
/// task carries its page index and its result is written into that slot,
/// so the returned document is in page order regardless of completion
/// order. A failing or panicking page becomes an empty page.
pub fn extract_document(
    extractor: &dyn FeatureExtractor,
    pages: &[PageImage],
    workers: usize,
) -> Result<DocumentFeatureSet> {
    if pages.is_empty() {
        return Ok(DocumentFeatureSet::new());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("handsim-extract-{}", i))
        .build()?;

    let (tx, rx) = unbounded::<(usize, PageFeatureSet)>();

    pool.scope(|scope| {
        for (index, page) in pages.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let started = Instant::now();
                let features = extract_isolated(extractor, page);
                log::debug!(
                    "page {}: {} paragraphs in {:?}",
                    page.number,
                    features.len(),
                    started.elapsed()
                );
                // The receiver outlives the scope, so this cannot fail.
                let _ = tx.send((index, features));
            });
        }
    });
    drop(tx);

    let mut slots = vec![PageFeatureSet::new(); pages.len()];
    for (index, features) in rx.iter() {
        slots[index] = features;
    }

    Ok(DocumentFeatureSet::from_pages(slots))
}

fn extract_isolated(extractor: &dyn FeatureExtractor, page: &PageImage) -> PageFeatureSet {
    match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(page))) {
        Ok(features) => features,
        Err(_) => {
            log::warn!(
                "{}: extraction panicked for page {}",
                extractor.name(),
                page.number
            );
            PageFeatureSet::new()
        }
    }
}
