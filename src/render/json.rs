//! JSON rendering for comparison results.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::SimilarityResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a comparison result to JSON.
pub fn to_json(result: &SimilarityResult, format: JsonFormat) -> Result<String> {
    value_to_json(result, format)
}

/// Convert any serializable report value to JSON.
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    rendered.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
