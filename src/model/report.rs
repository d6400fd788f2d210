//! Comparison output: anomalies, variations, and the similarity result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// How far one paragraph value sits from its page mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationDetail {
    /// Observed paragraph value
    pub value: f64,

    /// Page mean for the dimension
    pub mean: f64,

    /// Distance from the mean in standard-deviation units
    pub deviation: f64,
}

/// A paragraph that deviates from its page's distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Paragraph index within the page (0-indexed)
    pub paragraph_index: usize,

    /// Flagged dimensions only
    pub deviations: BTreeMap<Dimension, DeviationDetail>,
}

impl AnomalyRecord {
    /// Check whether a dimension was flagged.
    pub fn is_flagged(&self, dimension: Dimension) -> bool {
        self.deviations.contains_key(&dimension)
    }

    /// Deviation detail for a flagged dimension.
    pub fn get(&self, dimension: Dimension) -> Option<&DeviationDetail> {
        self.deviations.get(&dimension)
    }
}

/// One dimension that jumped between consecutive pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationChange {
    /// Dimension that changed
    pub dimension: Dimension,

    /// Absolute difference of the page means
    pub difference: f64,

    /// Human-readable description, e.g. "Symbol Density changed by 20.0%"
    pub description: String,
}

/// A page-to-page transition with at least one large change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRecord {
    /// Earlier page number (1-indexed)
    pub from_page: u32,

    /// Later page number (1-indexed)
    pub to_page: u32,

    /// Dimensions whose change exceeded the threshold
    pub changes: Vec<VariationChange>,
}

impl VariationRecord {
    /// Change entry for a dimension, if it was flagged.
    pub fn change(&self, dimension: Dimension) -> Option<&VariationChange> {
        self.changes.iter().find(|c| c.dimension == dimension)
    }
}

/// Final output of a document comparison.
///
/// Persisted verbatim in the result cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Composite similarity in `[0, 1]`
    pub similarity: f64,

    /// Per-dimension similarity sub-scores in `[0, 1]`; empty for degenerate input
    pub feature_scores: BTreeMap<String, f64>,

    /// Anomalies found in the first document
    pub anomalies_doc1: Vec<AnomalyRecord>,

    /// Anomalies found in the second document
    pub anomalies_doc2: Vec<AnomalyRecord>,

    /// Page variations found in the first document
    pub variations_doc1: Vec<VariationRecord>,

    /// Page variations found in the second document
    pub variations_doc2: Vec<VariationRecord>,
}

impl SimilarityResult {
    /// Sub-score for a dimension, if it was computed.
    pub fn feature_score(&self, dimension: Dimension) -> Option<f64> {
        self.feature_scores.get(dimension.similarity_key()).copied()
    }

    /// Total number of anomalies across both documents.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies_doc1.len() + self.anomalies_doc2.len()
    }

    /// Total number of variations across both documents.
    pub fn variation_count(&self) -> usize {
        self.variations_doc1.len() + self.variations_doc2.len()
    }
}
