//! Page aggregation: paragraph features to per-page means.

use crate::model::{Dimension, DocumentFeatureSet, PageFeatureSet, PageSummary};
use crate::stats::mean;

/// Values of one dimension across a page's paragraphs.
pub(crate) fn dimension_values(page: &PageFeatureSet, dimension: Dimension) -> Vec<f64> {
    page.iter().map(|p| dimension.of_paragraph(p)).collect()
}

/// Summarize one page.
///
/// Returns `None` for an empty page; empty pages take no part in
/// cross-page comparisons.
pub fn summarize_page(page: &PageFeatureSet, page_number: u32) -> Option<PageSummary> {
    let page_mean = |dim| mean(&dimension_values(page, dim));

    Some(PageSummary {
        page_number,
        confidence: page_mean(Dimension::Confidence)?,
        symbol_density: page_mean(Dimension::SymbolDensity)?,
        line_breaks: page_mean(Dimension::LineBreaks)?,
    })
}

/// Summaries of every non-empty page, in page order.
pub fn summarize_document(document: &DocumentFeatureSet) -> Vec<PageSummary> {
    document
        .pages
        .iter()
        .enumerate()
        .filter_map(|(idx, page)| summarize_page(page, idx as u32 + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphFeature;

    fn paragraph(confidence: f64, symbol_density: f64, line_breaks: u32) -> ParagraphFeature {
        ParagraphFeature {
            confidence,
            word_count: 4,
            symbol_density,
            line_breaks,
            average_symbol_confidence: Some(confidence),
        }
    }

    #[test]
    fn test_summarize_empty_page() {
        assert!(summarize_page(&PageFeatureSet::new(), 1).is_none());
    }

    #[test]
    fn test_summarize_page_means() {
        let page = PageFeatureSet::from_paragraphs(vec![
            paragraph(0.9, 0.1, 2),
            paragraph(0.7, 0.3, 4),
        ]);

        let summary = summarize_page(&page, 3).unwrap();
        assert_eq!(summary.page_number, 3);
        assert!((summary.confidence - 0.8).abs() < 1e-12);
        assert!((summary.symbol_density - 0.2).abs() < 1e-12);
        assert!((summary.line_breaks - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_document_skips_empty_pages() {
        let document = DocumentFeatureSet::from_pages(vec![
            PageFeatureSet::from_paragraphs(vec![paragraph(0.9, 0.1, 1)]),
            PageFeatureSet::new(),
            PageFeatureSet::from_paragraphs(vec![paragraph(0.5, 0.2, 0)]),
        ]);

        let summaries = summarize_document(&document);
        let numbers: Vec<u32> = summaries.iter().map(|s| s.page_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }
}
