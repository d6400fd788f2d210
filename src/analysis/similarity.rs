//! Cross-document similarity scoring.
//!
//! Each document is flattened into one paragraph sequence (page boundaries
//! are ignored) and reduced to per-dimension means. A dimension's
//! similarity is `1 - |mean_a - mean_b|` clamped to `[0, 1]`; the composite
//! is the weighted sum of the four dimension similarities.

use std::collections::BTreeMap;

use crate::model::{Dimension, DocumentFeatureSet};
use crate::stats::{clamp_unit, mean_or_zero};

/// Weight of the paragraph confidence similarity.
pub const CONFIDENCE_WEIGHT: f64 = 0.3;
/// Weight of the symbol density similarity.
pub const SYMBOL_DENSITY_WEIGHT: f64 = 0.3;
/// Weight of the line-break similarity.
pub const LINE_BREAKS_WEIGHT: f64 = 0.2;
/// Weight of the average symbol confidence similarity.
pub const AVERAGE_CONFIDENCE_WEIGHT: f64 = 0.2;

/// Scoring weight of a dimension.
pub fn weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Confidence => CONFIDENCE_WEIGHT,
        Dimension::SymbolDensity => SYMBOL_DENSITY_WEIGHT,
        Dimension::LineBreaks => LINE_BREAKS_WEIGHT,
        Dimension::AverageSymbolConfidence => AVERAGE_CONFIDENCE_WEIGHT,
    }
}

/// Composite score plus per-dimension sub-scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityScore {
    /// Weighted composite in `[0, 1]`
    pub similarity: f64,

    /// Sub-scores keyed by `Dimension::similarity_key`
    pub feature_scores: BTreeMap<String, f64>,
}

impl SimilarityScore {
    /// Zero similarity with no sub-scores.
    pub fn degenerate() -> Self {
        Self::default()
    }
}

/// Compare two documents' handwriting features.
///
/// Degenerate input (no pages, an empty first page, or no paragraphs at all
/// on either side) scores `0.0` with no sub-scores.
pub fn compare_features(doc1: &DocumentFeatureSet, doc2: &DocumentFeatureSet) -> SimilarityScore {
    if is_degenerate(doc1) || is_degenerate(doc2) {
        return SimilarityScore::degenerate();
    }

    let mut feature_scores = BTreeMap::new();
    let mut composite = 0.0;

    for dimension in Dimension::ALL {
        let (a, b) = (
            flattened_mean(doc1, dimension),
            flattened_mean(doc2, dimension),
        );
        composite += weight(dimension) * raw_similarity(a, b);
        feature_scores.insert(
            dimension.similarity_key().to_string(),
            dimension_similarity(a, b),
        );
    }

    SimilarityScore {
        similarity: clamp_unit(composite),
        feature_scores,
    }
}

/// `1 - |a - b|`, clamped to `[0, 1]`.
pub fn dimension_similarity(a: f64, b: f64) -> f64 {
    clamp_unit(raw_similarity(a, b))
}

fn raw_similarity(a: f64, b: f64) -> f64 {
    1.0 - (a - b).abs()
}

fn is_degenerate(document: &DocumentFeatureSet) -> bool {
    match document.pages.first() {
        None => true,
        Some(first) => first.is_empty() || document.paragraph_count() == 0,
    }
}

fn flattened_mean(document: &DocumentFeatureSet, dimension: Dimension) -> f64 {
    let values: Vec<f64> = document
        .paragraphs()
        .map(|p| dimension.of_paragraph(p))
        .collect();
    mean_or_zero(&values)
}
