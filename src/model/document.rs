//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{PageFeatureSet, ParagraphFeature};

/// Page feature sets of a whole document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFeatureSet {
    /// Pages in the document
    pub pages: Vec<PageFeatureSet>,
}

impl DocumentFeatureSet {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from its pages.
    pub fn from_pages(pages: Vec<PageFeatureSet>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&PageFeatureSet> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageFeatureSet) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All paragraphs across pages, page order then paragraph order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphFeature> {
        self.pages.iter().flat_map(|page| page.iter())
    }

    /// Total number of paragraphs across all pages.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(PageFeatureSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(confidence: f64) -> ParagraphFeature {
        ParagraphFeature {
            confidence,
            word_count: 2,
            symbol_density: 0.1,
            line_breaks: 1,
            average_symbol_confidence: Some(confidence),
        }
    }

    #[test]
    fn test_document_new() {
        let doc = DocumentFeatureSet::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.paragraph_count(), 0);
    }

    #[test]
    fn test_get_page() {
        let mut doc = DocumentFeatureSet::new();
        doc.add_page(PageFeatureSet::from_paragraphs(vec![paragraph(0.9)]));
        doc.add_page(PageFeatureSet::new());

        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.get_page(1).map(PageFeatureSet::len), Some(1));
        assert!(doc.get_page(2).is_some_and(PageFeatureSet::is_empty));
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_flattened_paragraph_order() {
        let doc = DocumentFeatureSet::from_pages(vec![
            PageFeatureSet::from_paragraphs(vec![paragraph(0.1), paragraph(0.2)]),
            PageFeatureSet::new(),
            PageFeatureSet::from_paragraphs(vec![paragraph(0.3)]),
        ]);

        let confidences: Vec<f64> = doc.paragraphs().map(|p| p.confidence).collect();
        assert_eq!(confidences, vec![0.1, 0.2, 0.3]);
        assert_eq!(doc.paragraph_count(), 3);
    }
}
