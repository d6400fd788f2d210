//! Feature and result model types.
//!
//! Feature extractors produce `ParagraphFeature` records grouped into
//! pages and documents; the analyzers consume them and produce the
//! anomaly, variation and similarity records that make up a
//! `SimilarityResult`.

mod dimension;
mod document;
mod page;
mod paragraph;
mod report;

pub use dimension::Dimension;
pub use document::DocumentFeatureSet;
pub use page::{PageFeatureSet, PageSummary};
pub use paragraph::{ParagraphFeature, RecognizedSymbol, RecognizedWord};
pub use report::{
    AnomalyRecord, DeviationDetail, SimilarityResult, VariationChange, VariationRecord,
};
