//! Google Cloud Vision document text detection adapter.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{PageFeatureSet, ParagraphFeature, RecognizedSymbol, RecognizedWord};

use super::{FeatureExtractor, PageImage};

/// Default annotate endpoint.
pub const VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

const MAX_RESULTS: u32 = 50;

/// Feature extractor backed by the Vision `images:annotate` API.
#[derive(Debug, Clone)]
pub struct VisionExtractor {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl VisionExtractor {
    /// Create an extractor with a per-request timeout.
    ///
    /// A missing API key is not an error here; every page will then fail
    /// extraction and come back empty.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        if api_key.is_none() {
            log::warn!("no recognition API key configured; pages will be empty");
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: VISION_ENDPOINT.to_string(),
        })
    }

    /// Use a different annotate endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl FeatureExtractor for VisionExtractor {
    fn name(&self) -> &str {
        "vision"
    }

    fn extract_page(&self, page: &PageImage) -> Result<PageFeatureSet> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Extraction("no API key configured".to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&AnnotateRequest::document_text(&page.data))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Extraction(format!("status {}: {}", status, body)));
        }

        parse_annotate_response(&body)
    }
}

/// Parse an `images:annotate` response body into paragraph features.
///
/// Paragraphs are read in block order across all annotated pages.
/// Paragraphs without words are skipped. A response without a text
/// annotation is an empty page; invalid JSON or an error status in the
/// response is an error.
pub fn parse_annotate_response(body: &str) -> Result<PageFeatureSet> {
    let response: AnnotateResponse = serde_json::from_str(body)
        .map_err(|e| Error::Extraction(format!("malformed response: {}", e)))?;

    let Some(first) = response.responses.into_iter().next() else {
        return Ok(PageFeatureSet::new());
    };

    if let Some(status) = first.error {
        return Err(Error::Extraction(format!(
            "service error {}: {}",
            status.code, status.message
        )));
    }

    let Some(annotation) = first.full_text_annotation else {
        return Ok(PageFeatureSet::new());
    };

    Ok(annotation
        .pages
        .iter()
        .flat_map(|p| &p.blocks)
        .flat_map(|b| &b.paragraphs)
        .filter_map(|paragraph| {
            let words: Vec<RecognizedWord> = paragraph.words.iter().map(Word::recognized).collect();
            ParagraphFeature::from_words(paragraph.confidence.unwrap_or(0.0), &words)
        })
        .collect())
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<FeatureRequest>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRequest {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

impl AnnotateRequest {
    fn document_text(image: &[u8]) -> Self {
        Self {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![FeatureRequest {
                    feature_type: "DOCUMENT_TEXT_DETECTION",
                    max_results: MAX_RESULTS,
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnnotateResponse {
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<ServiceStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceStatus {
    code: i32,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextAnnotation {
    pages: Vec<AnnotatedPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnnotatedPage {
    blocks: Vec<Block>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Block {
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Paragraph {
    confidence: Option<f64>,
    words: Vec<Word>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    fn recognized(&self) -> RecognizedWord {
        RecognizedWord::new(self.symbols.iter().map(Symbol::recognized).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Symbol {
    text: String,
    confidence: Option<f64>,
    property: Option<TextProperty>,
}

impl Symbol {
    fn recognized(&self) -> RecognizedSymbol {
        let has_break = self
            .property
            .as_ref()
            .and_then(|p| p.detected_break.as_ref())
            .and_then(|b| b.break_type.as_deref())
            .is_some_and(|t| !t.is_empty());

        RecognizedSymbol {
            text: self.text.clone(),
            confidence: self.confidence.unwrap_or(0.0),
            has_break,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextProperty {
    detected_break: Option<DetectedBreak>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetectedBreak {
    #[serde(rename = "type")]
    break_type: Option<String>,
}
