//! Error types for handsim library.

use std::io;
use thiserror::Error;

/// Result type alias for handsim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while comparing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not recognized as a PDF document.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Converting a document into page images failed.
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// Feature extraction for a single page failed.
    #[error("Feature extraction error: {0}")]
    Extraction(String),

    /// Transport-level failure talking to the recognition service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Result cache read or write failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The extraction worker pool could not be built.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Error during report rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Any failure inside a document comparison, wrapped with context.
    #[error("Error computing handwriting similarity: {0}")]
    Comparison(Box<Error>),
}

impl Error {
    /// Wrap an error as a comparison failure.
    ///
    /// Already-wrapped errors are returned unchanged so the context is
    /// never repeated.
    pub fn comparison(err: Error) -> Self {
        match err {
            Error::Comparison(_) => err,
            other => Error::Comparison(Box::new(other)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Http(format!("request timed out: {}", err))
        } else {
            Error::Http(err.to_string())
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool(err.to_string())
    }
}
