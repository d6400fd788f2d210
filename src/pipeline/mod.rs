//! Comparison pipeline: configuration and orchestration.

mod comparator;
mod options;

pub use comparator::{analyze_pair, Comparator};
pub use options::{CompareOptions, API_KEY_ENV, CACHE_DIR_ENV};
