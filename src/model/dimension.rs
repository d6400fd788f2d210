//! Feature dimensions shared by the analyzers.

use serde::{Deserialize, Serialize};

use super::{PageSummary, ParagraphFeature};

/// A numeric feature dimension of a recognized paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Recognizer-reported paragraph confidence
    Confidence,
    /// Fraction of non-alphanumeric symbols
    SymbolDensity,
    /// Detected line-break symbols
    LineBreaks,
    /// Mean per-symbol confidence
    AverageSymbolConfidence,
}

impl Dimension {
    /// Dimensions tracked per page by the anomaly and variation analyzers.
    pub const PAGE: [Dimension; 3] = [
        Dimension::Confidence,
        Dimension::SymbolDensity,
        Dimension::LineBreaks,
    ];

    /// Every dimension, in scoring order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Confidence,
        Dimension::SymbolDensity,
        Dimension::LineBreaks,
        Dimension::AverageSymbolConfidence,
    ];

    /// Snake-case identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Confidence => "confidence",
            Dimension::SymbolDensity => "symbol_density",
            Dimension::LineBreaks => "line_breaks",
            Dimension::AverageSymbolConfidence => "average_symbol_confidence",
        }
    }

    /// Title-cased label used in variation descriptions.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Confidence => "Confidence",
            Dimension::SymbolDensity => "Symbol Density",
            Dimension::LineBreaks => "Line Breaks",
            Dimension::AverageSymbolConfidence => "Average Symbol Confidence",
        }
    }

    /// Key of this dimension's entry in the similarity sub-score mapping.
    pub fn similarity_key(self) -> &'static str {
        match self {
            Dimension::Confidence => "confidence_similarity",
            Dimension::SymbolDensity => "symbol_density_similarity",
            Dimension::LineBreaks => "line_break_similarity",
            Dimension::AverageSymbolConfidence => "average_confidence_similarity",
        }
    }

    /// Read this dimension from a paragraph. Absent values read as `0.0`.
    pub fn of_paragraph(self, feature: &ParagraphFeature) -> f64 {
        match self {
            Dimension::Confidence => feature.confidence,
            Dimension::SymbolDensity => feature.symbol_density,
            Dimension::LineBreaks => f64::from(feature.line_breaks),
            Dimension::AverageSymbolConfidence => {
                feature.average_symbol_confidence.unwrap_or(0.0)
            }
        }
    }

    /// Read this dimension from a page summary.
    ///
    /// Page summaries do not track average symbol confidence.
    pub fn of_summary(self, summary: &PageSummary) -> Option<f64> {
        match self {
            Dimension::Confidence => Some(summary.confidence),
            Dimension::SymbolDensity => Some(summary.symbol_density),
            Dimension::LineBreaks => Some(summary.line_breaks),
            Dimension::AverageSymbolConfidence => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
