//! Page-to-page variation analysis over page summaries.

use crate::model::{Dimension, PageSummary, VariationChange, VariationRecord};

/// A page mean changing by more than this between consecutive summarized
/// pages is reported as a variation.
pub const VARIATION_THRESHOLD: f64 = 0.15;

/// Compare consecutive page summaries and report large jumps.
///
/// Summaries are expected in page order with empty pages already removed,
/// so "consecutive" means consecutive non-empty pages. Fewer than two
/// summaries yield no variations.
pub fn analyze_page_variations(summaries: &[PageSummary]) -> Vec<VariationRecord> {
    if summaries.len() < 2 {
        return Vec::new();
    }

    summaries
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let changes: Vec<VariationChange> = Dimension::PAGE
                .iter()
                .filter_map(|&dimension| change_between(prev, curr, dimension))
                .collect();

            (!changes.is_empty()).then(|| VariationRecord {
                from_page: prev.page_number,
                to_page: curr.page_number,
                changes,
            })
        })
        .collect()
}

fn change_between(
    prev: &PageSummary,
    curr: &PageSummary,
    dimension: Dimension,
) -> Option<VariationChange> {
    let difference = (dimension.of_summary(curr)? - dimension.of_summary(prev)?).abs();
    (difference > VARIATION_THRESHOLD).then(|| VariationChange {
        dimension,
        difference,
        description: describe_change(dimension, difference),
    })
}

/// "<Dimension Title> changed by <difference as percent, 1 decimal>%".
pub fn describe_change(dimension: Dimension, difference: f64) -> String {
    format!("{} changed by {:.1}%", dimension.title(), difference * 100.0)
}
