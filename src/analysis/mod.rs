//! Feature analysis: page aggregation, anomaly and variation detection,
//! and cross-document similarity scoring.
//!
//! Everything in this module is pure, deterministic, and single-threaded.

mod aggregate;
mod anomaly;
mod similarity;
mod variation;

pub use aggregate::{summarize_document, summarize_page};
pub use anomaly::{detect_anomalies, detect_page_anomalies, ANOMALY_THRESHOLD};
pub use similarity::{
    compare_features, dimension_similarity, weight, SimilarityScore, AVERAGE_CONFIDENCE_WEIGHT,
    CONFIDENCE_WEIGHT, LINE_BREAKS_WEIGHT, SYMBOL_DENSITY_WEIGHT,
};
pub use variation::{analyze_page_variations, describe_change, VARIATION_THRESHOLD};

use serde::{Deserialize, Serialize};

use crate::model::{AnomalyRecord, DocumentFeatureSet, PageSummary, VariationRecord};

/// Internal-consistency diagnostics for a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDiagnostics {
    /// Summaries of the non-empty pages
    pub page_summaries: Vec<PageSummary>,

    /// Paragraph anomalies, page order then paragraph order
    pub anomalies: Vec<AnomalyRecord>,

    /// Large jumps between consecutive non-empty pages
    pub variations: Vec<VariationRecord>,
}

/// Run aggregation, anomaly detection and variation analysis on a document.
pub fn diagnose(document: &DocumentFeatureSet) -> DocumentDiagnostics {
    let page_summaries = summarize_document(document);
    let anomalies = detect_anomalies(document);
    let variations = if page_summaries.len() > 1 {
        analyze_page_variations(&page_summaries)
    } else {
        Vec::new()
    };

    DocumentDiagnostics {
        page_summaries,
        anomalies,
        variations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageFeatureSet, ParagraphFeature};

    fn paragraph(confidence: f64, symbol_density: f64) -> ParagraphFeature {
        ParagraphFeature {
            confidence,
            word_count: 3,
            symbol_density,
            line_breaks: 1,
            average_symbol_confidence: Some(confidence),
        }
    }

    #[test]
    fn test_diagnose_empty_document() {
        let diagnostics = diagnose(&DocumentFeatureSet::new());
        assert_eq!(diagnostics, DocumentDiagnostics::default());
    }

    #[test]
    fn test_diagnose_single_summarized_page() {
        let document = DocumentFeatureSet::from_pages(vec![
            PageFeatureSet::new(),
            PageFeatureSet::from_paragraphs(vec![paragraph(0.9, 0.1), paragraph(0.2, 0.9)]),
            PageFeatureSet::new(),
        ]);

        let diagnostics = diagnose(&document);
        assert_eq!(diagnostics.page_summaries.len(), 1);
        assert!(diagnostics.variations.is_empty());
    }

    #[test]
    fn test_diagnose_variation_skips_empty_pages() {
        let document = DocumentFeatureSet::from_pages(vec![
            PageFeatureSet::from_paragraphs(vec![paragraph(0.9, 0.10)]),
            PageFeatureSet::new(),
            PageFeatureSet::from_paragraphs(vec![paragraph(0.9, 0.30)]),
        ]);

        let diagnostics = diagnose(&document);
        assert_eq!(diagnostics.variations.len(), 1);
        assert_eq!(diagnostics.variations[0].from_page, 1);
        assert_eq!(diagnostics.variations[0].to_page, 3);
    }
}
