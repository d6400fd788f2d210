//! Plain text report rendering.

use std::fmt::Write;

use crate::model::{AnomalyRecord, Dimension, SimilarityResult, VariationRecord};

/// Render a human-readable comparison report.
pub fn to_text(result: &SimilarityResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Handwriting similarity: {:.1}%",
        result.similarity * 100.0
    );

    if result.feature_scores.is_empty() {
        out.push_str("Feature scores: unavailable (no recognized text)\n");
    } else {
        out.push_str("Feature scores:\n");
        for dimension in Dimension::ALL {
            if let Some(score) = result.feature_score(dimension) {
                let _ = writeln!(out, "  {:<26} {:>6.1}%", dimension.title(), score * 100.0);
            }
        }
    }

    for (label, anomalies, variations) in [
        ("Document 1", &result.anomalies_doc1, &result.variations_doc1),
        ("Document 2", &result.anomalies_doc2, &result.variations_doc2),
    ] {
        out.push('\n');
        let _ = writeln!(out, "{}", label);
        write_anomalies(&mut out, anomalies);
        write_variations(&mut out, variations);
    }

    out.trim_end().to_string()
}

fn write_anomalies(out: &mut String, anomalies: &[AnomalyRecord]) {
    if anomalies.is_empty() {
        out.push_str("  Anomalies: none\n");
        return;
    }

    let _ = writeln!(out, "  Anomalies: {}", anomalies.len());
    for record in anomalies {
        let details: Vec<String> = record
            .deviations
            .iter()
            .map(|(dim, d)| {
                format!(
                    "{} {:.3} vs mean {:.3} ({:.1} sd)",
                    dim.title(),
                    d.value,
                    d.mean,
                    d.deviation
                )
            })
            .collect();
        let _ = writeln!(
            out,
            "    page {}, paragraph {}: {}",
            record.page_number,
            record.paragraph_index,
            details.join("; ")
        );
    }
}

fn write_variations(out: &mut String, variations: &[VariationRecord]) {
    if variations.is_empty() {
        out.push_str("  Page variations: none\n");
        return;
    }

    let _ = writeln!(out, "  Page variations: {}", variations.len());
    for record in variations {
        let descriptions: Vec<&str> = record
            .changes
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        let _ = writeln!(
            out,
            "    page {} -> {}: {}",
            record.from_page,
            record.to_page,
            descriptions.join(", ")
        );
    }
}
