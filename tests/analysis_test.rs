//! Integration tests for aggregation, diagnostics and scoring.

use handsim::analysis::{
    analyze_page_variations, compare_features, detect_anomalies, diagnose, summarize_document,
    summarize_page, ANOMALY_THRESHOLD,
};
use handsim::model::{
    Dimension, DocumentFeatureSet, PageFeatureSet, PageSummary, ParagraphFeature,
};
use proptest::prelude::*;

fn paragraph_strategy() -> impl Strategy<Value = ParagraphFeature> {
    (
        0.0f64..=1.0,
        0u32..40,
        0.0f64..=0.6,
        0u32..12,
        proptest::option::of(0.0f64..=1.0),
    )
        .prop_map(
            |(confidence, word_count, symbol_density, line_breaks, average_symbol_confidence)| {
                ParagraphFeature {
                    confidence,
                    word_count,
                    symbol_density,
                    line_breaks,
                    average_symbol_confidence,
                }
            },
        )
}

fn page_strategy() -> impl Strategy<Value = PageFeatureSet> {
    prop::collection::vec(paragraph_strategy(), 0..7).prop_map(PageFeatureSet::from_paragraphs)
}

fn document_strategy() -> impl Strategy<Value = DocumentFeatureSet> {
    prop::collection::vec(page_strategy(), 0..5).prop_map(DocumentFeatureSet::from_pages)
}

fn paragraph(confidence: f64, symbol_density: f64, line_breaks: u32) -> ParagraphFeature {
    ParagraphFeature {
        confidence,
        word_count: 6,
        symbol_density,
        line_breaks,
        average_symbol_confidence: Some(confidence),
    }
}

proptest! {
    #[test]
    fn test_summary_means_match_arithmetic_mean(
        paragraphs in prop::collection::vec(paragraph_strategy(), 1..9)
    ) {
        let page = PageFeatureSet::from_paragraphs(paragraphs.clone());
        let summary = summarize_page(&page, 1).unwrap();

        let n = paragraphs.len() as f64;
        let conf: f64 = paragraphs.iter().map(|p| p.confidence).sum::<f64>() / n;
        let density: f64 = paragraphs.iter().map(|p| p.symbol_density).sum::<f64>() / n;
        let breaks: f64 = paragraphs
            .iter()
            .map(|p| f64::from(p.line_breaks))
            .sum::<f64>()
            / n;

        prop_assert!((summary.confidence - conf).abs() < 1e-12);
        prop_assert!((summary.symbol_density - density).abs() < 1e-12);
        prop_assert!((summary.line_breaks - breaks).abs() < 1e-12);
    }

    #[test]
    fn test_scores_always_within_unit_interval(
        doc1 in document_strategy(),
        doc2 in document_strategy(),
    ) {
        let score = compare_features(&doc1, &doc2);
        prop_assert!((0.0..=1.0).contains(&score.similarity));
        for value in score.feature_scores.values() {
            prop_assert!((0.0..=1.0).contains(value));
        }
    }

    #[test]
    fn test_similarity_is_symmetric(doc1 in document_strategy(), doc2 in document_strategy()) {
        prop_assert_eq!(compare_features(&doc1, &doc2), compare_features(&doc2, &doc1));
    }

    #[test]
    fn test_zero_variance_dimensions_never_cited(
        paragraphs in prop::collection::vec(paragraph_strategy(), 1..11),
        fixed_density in 0.0f64..=0.6,
    ) {
        let paragraphs: Vec<ParagraphFeature> = paragraphs
            .into_iter()
            .map(|p| ParagraphFeature {
                symbol_density: fixed_density,
                ..p
            })
            .collect();
        let document =
            DocumentFeatureSet::from_pages(vec![PageFeatureSet::from_paragraphs(paragraphs)]);

        for record in detect_anomalies(&document) {
            prop_assert!(!record.is_flagged(Dimension::SymbolDensity));
            for detail in record.deviations.values() {
                prop_assert!(detail.deviation.is_finite());
                prop_assert!(detail.deviation > ANOMALY_THRESHOLD);
            }
        }
    }
}

#[test]
fn test_empty_flattened_documents_score_zero() {
    let empty_pages = DocumentFeatureSet::from_pages(vec![PageFeatureSet::new(); 3]);
    let full = DocumentFeatureSet::from_pages(vec![PageFeatureSet::from_paragraphs(vec![
        paragraph(0.9, 0.1, 2),
    ])]);

    for (a, b) in [(&empty_pages, &full), (&full, &empty_pages), (&empty_pages, &empty_pages)] {
        let score = compare_features(a, b);
        assert_eq!(score.similarity, 0.0);
        assert!(score.feature_scores.is_empty());
    }
}

#[test]
fn test_low_confidence_paragraph_flagged() {
    let mut paragraphs: Vec<ParagraphFeature> = [0.9, 0.92, 0.91, 0.9, 0.93, 0.92, 0.9, 0.91]
        .into_iter()
        .map(|c| paragraph(c, 0.1, 2))
        .collect();
    paragraphs.push(paragraph(0.05, 0.1, 2));
    let document =
        DocumentFeatureSet::from_pages(vec![PageFeatureSet::from_paragraphs(paragraphs)]);

    let anomalies = detect_anomalies(&document);
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].paragraph_index, 8);

    let detail = anomalies[0].get(Dimension::Confidence).unwrap();
    assert_eq!(detail.value, 0.05);
    assert!(detail.deviation > 2.0);
}

#[test]
fn test_single_summarized_page_has_no_variations() {
    let document = DocumentFeatureSet::from_pages(vec![
        PageFeatureSet::new(),
        PageFeatureSet::from_paragraphs(vec![paragraph(0.1, 0.9, 9), paragraph(0.9, 0.0, 0)]),
    ]);

    let summaries = summarize_document(&document);
    assert_eq!(summaries.len(), 1);
    assert!(analyze_page_variations(&summaries).is_empty());
    assert!(diagnose(&document).variations.is_empty());
}

#[test]
fn test_symbol_density_variation_example() {
    let summaries = vec![
        PageSummary {
            page_number: 1,
            confidence: 0.85,
            symbol_density: 0.10,
            line_breaks: 3.0,
        },
        PageSummary {
            page_number: 2,
            confidence: 0.85,
            symbol_density: 0.30,
            line_breaks: 3.0,
        },
    ];

    let variations = analyze_page_variations(&summaries);
    assert_eq!(variations.len(), 1);

    let change = variations[0].change(Dimension::SymbolDensity).unwrap();
    assert_eq!(change.description, "Symbol Density changed by 20.0%");
}
