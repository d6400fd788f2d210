//! Paragraph anomaly detection against the page's own distribution.

use std::collections::BTreeMap;

use crate::model::{AnomalyRecord, DeviationDetail, Dimension, DocumentFeatureSet, PageFeatureSet};
use crate::stats::{deviation_in_std_devs, mean_or_zero, population_std_dev};

use super::aggregate::dimension_values;

/// A paragraph is anomalous on a dimension when it lies more than this many
/// standard deviations from the page mean.
pub const ANOMALY_THRESHOLD: f64 = 2.0;

/// Mean and population standard deviation of one dimension on one page.
#[derive(Debug, Clone, Copy)]
struct PageDistribution {
    dimension: Dimension,
    mean: f64,
    std_dev: f64,
}

impl PageDistribution {
    fn of(page: &PageFeatureSet, dimension: Dimension) -> Self {
        let values = dimension_values(page, dimension);
        let mean = mean_or_zero(&values);
        Self {
            dimension,
            mean,
            std_dev: population_std_dev(&values, mean),
        }
    }

    /// Deviation detail when `value` exceeds the threshold. A zero standard
    /// deviation never flags.
    fn flag(&self, value: f64) -> Option<DeviationDetail> {
        let deviation = deviation_in_std_devs(value, self.mean, self.std_dev)?;
        (deviation > ANOMALY_THRESHOLD).then_some(DeviationDetail {
            value,
            mean: self.mean,
            deviation,
        })
    }
}

/// Detect anomalous paragraphs on a single page.
///
/// `page_number` is 1-indexed and copied into each record.
pub fn detect_page_anomalies(page: &PageFeatureSet, page_number: u32) -> Vec<AnomalyRecord> {
    if page.is_empty() {
        return Vec::new();
    }

    let distributions: Vec<PageDistribution> = Dimension::PAGE
        .iter()
        .map(|&dim| PageDistribution::of(page, dim))
        .collect();

    page.iter()
        .enumerate()
        .filter_map(|(paragraph_index, paragraph)| {
            let deviations: BTreeMap<Dimension, DeviationDetail> = distributions
                .iter()
                .filter_map(|dist| {
                    dist.flag(dist.dimension.of_paragraph(paragraph))
                        .map(|detail| (dist.dimension, detail))
                })
                .collect();

            (!deviations.is_empty()).then_some(AnomalyRecord {
                page_number,
                paragraph_index,
                deviations,
            })
        })
        .collect()
}

/// Detect anomalies on every page, in page order then paragraph order.
pub fn detect_anomalies(document: &DocumentFeatureSet) -> Vec<AnomalyRecord> {
    document
        .pages
        .iter()
        .enumerate()
        .flat_map(|(idx, page)| detect_page_anomalies(page, idx as u32 + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphFeature;

    fn paragraph(confidence: f64, symbol_density: f64, line_breaks: u32) -> ParagraphFeature {
        ParagraphFeature {
            confidence,
            word_count: 5,
            symbol_density,
            line_breaks,
            average_symbol_confidence: Some(confidence),
        }
    }

    #[test]
    fn test_flags_low_confidence_outlier() {
        let mut paragraphs: Vec<ParagraphFeature> =
            (0..9).map(|_| paragraph(0.9, 0.1, 2)).collect();
        paragraphs.push(paragraph(0.05, 0.1, 2));
        let page = PageFeatureSet::from_paragraphs(paragraphs);

        let anomalies = detect_page_anomalies(&page, 1);
        assert_eq!(anomalies.len(), 1);

        let record = &anomalies[0];
        assert_eq!(record.page_number, 1);
        assert_eq!(record.paragraph_index, 9);
        assert_eq!(record.deviations.len(), 1);

        let detail = record.get(Dimension::Confidence).unwrap();
        assert_eq!(detail.value, 0.05);
        assert!(detail.deviation > ANOMALY_THRESHOLD);
        assert!((detail.mean - 0.815).abs() < 1e-9);
    }

    #[test]
    fn test_three_paragraphs_cannot_exceed_two_sd() {
        // With n values, no point can lie more than sqrt(n - 1) sd from the mean.
        let page = PageFeatureSet::from_paragraphs(vec![
            paragraph(0.9, 0.1, 1),
            paragraph(0.92, 0.1, 1),
            paragraph(0.05, 0.1, 1),
        ]);
        assert!(detect_page_anomalies(&page, 1).is_empty());
    }

    #[test]
    fn test_single_paragraph_page() {
        let page = PageFeatureSet::from_paragraphs(vec![paragraph(0.3, 0.9, 7)]);
        assert!(detect_page_anomalies(&page, 1).is_empty());
    }

    #[test]
    fn test_zero_variance_dimension_never_flags() {
        let mut paragraphs: Vec<ParagraphFeature> =
            (0..9).map(|_| paragraph(0.8, 0.2, 1)).collect();
        paragraphs.push(paragraph(0.8, 0.2, 12));
        let page = PageFeatureSet::from_paragraphs(paragraphs);

        let anomalies = detect_page_anomalies(&page, 4);
        assert_eq!(anomalies.len(), 1);
        assert!(anomalies[0].is_flagged(Dimension::LineBreaks));
        assert!(!anomalies[0].is_flagged(Dimension::Confidence));
        assert!(!anomalies[0].is_flagged(Dimension::SymbolDensity));
    }

    #[test]
    fn test_document_page_numbers_include_empty_pages() {
        let mut paragraphs: Vec<ParagraphFeature> =
            (0..9).map(|_| paragraph(0.9, 0.1, 2)).collect();
        paragraphs.push(paragraph(0.9, 0.95, 2));

        let document = DocumentFeatureSet::from_pages(vec![
            PageFeatureSet::new(),
            PageFeatureSet::from_paragraphs(paragraphs),
        ]);

        let anomalies = detect_anomalies(&document);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].page_number, 2);
        assert!(anomalies[0].is_flagged(Dimension::SymbolDensity));
    }
}
