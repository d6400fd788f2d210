//! Page-level types.

use serde::{Deserialize, Serialize};

use super::ParagraphFeature;

/// Paragraph features of a single page, in document order.
///
/// An empty set is a valid page with no recognized text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageFeatureSet {
    paragraphs: Vec<ParagraphFeature>,
}

impl PageFeatureSet {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page from its paragraphs.
    pub fn from_paragraphs(paragraphs: Vec<ParagraphFeature>) -> Self {
        Self { paragraphs }
    }

    /// Append a paragraph.
    pub fn push(&mut self, paragraph: ParagraphFeature) {
        self.paragraphs.push(paragraph);
    }

    /// Paragraphs on the page.
    pub fn paragraphs(&self) -> &[ParagraphFeature] {
        &self.paragraphs
    }

    /// Iterate over paragraphs.
    pub fn iter(&self) -> std::slice::Iter<'_, ParagraphFeature> {
        self.paragraphs.iter()
    }

    /// Number of paragraphs on the page.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the page has no recognized paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl FromIterator<ParagraphFeature> for PageFeatureSet {
    fn from_iter<I: IntoIterator<Item = ParagraphFeature>>(iter: I) -> Self {
        Self {
            paragraphs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PageFeatureSet {
    type Item = &'a ParagraphFeature;
    type IntoIter = std::slice::Iter<'a, ParagraphFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

/// Per-page means of the paragraph features, for cross-page comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Mean paragraph confidence
    pub confidence: f64,

    /// Mean symbol density
    pub symbol_density: f64,

    /// Mean line-break count
    pub line_breaks: f64,
}
