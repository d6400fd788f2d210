//! Paragraph-level feature records.

use serde::{Deserialize, Serialize};

use crate::stats::{mean, safe_ratio};

/// Statistical summary of one recognized paragraph.
///
/// Built once per paragraph by a feature extractor and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFeature {
    /// Recognizer-reported paragraph confidence in `[0, 1]`
    pub confidence: f64,

    /// Number of recognized words
    pub word_count: u32,

    /// Fraction of symbols that are not alphanumeric
    pub symbol_density: f64,

    /// Number of symbols carrying a detected break
    pub line_breaks: u32,

    /// Mean per-symbol confidence; `None` when the paragraph has no symbols
    pub average_symbol_confidence: Option<f64>,
}

impl ParagraphFeature {
    /// Summarize a paragraph from its recognized words.
    ///
    /// Returns `None` when `words` is empty: a paragraph without words is
    /// not a paragraph feature.
    pub fn from_words(confidence: f64, words: &[RecognizedWord]) -> Option<Self> {
        if words.is_empty() {
            return None;
        }

        let symbols: Vec<&RecognizedSymbol> = words.iter().flat_map(|w| &w.symbols).collect();
        let symbol_count = symbols.len() as f64;

        let marks = symbols.iter().filter(|s| !s.is_alphanumeric()).count() as f64;
        let line_breaks = symbols.iter().filter(|s| s.has_break).count() as u32;
        let confidences: Vec<f64> = symbols.iter().map(|s| s.confidence).collect();

        Some(Self {
            confidence,
            word_count: words.len() as u32,
            symbol_density: safe_ratio(marks, symbol_count).unwrap_or(0.0),
            line_breaks,
            average_symbol_confidence: mean(&confidences),
        })
    }
}

/// A recognized word, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizedWord {
    /// Symbols making up the word
    pub symbols: Vec<RecognizedSymbol>,
}

impl RecognizedWord {
    /// Create a word from its symbols.
    pub fn new(symbols: Vec<RecognizedSymbol>) -> Self {
        Self { symbols }
    }
}

/// A single recognized symbol (usually one character).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizedSymbol {
    /// Symbol text
    pub text: String,

    /// Per-symbol recognizer confidence (0.0 when not reported)
    pub confidence: f64,

    /// Whether the recognizer detected a break after this symbol
    pub has_break: bool,
}

impl RecognizedSymbol {
    /// Create a symbol without a detected break.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
            has_break: false,
        }
    }

    /// Mark this symbol as followed by a detected break.
    pub fn with_break(mut self) -> Self {
        self.has_break = true;
        self
    }

    /// Empty text, or any non-alphanumeric character, counts as a mark.
    pub fn is_alphanumeric(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphanumeric)
    }
}
