use crate::concurrent_map::DEFAULT_BUCKET_COUNT;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of hits a search returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Engine settings, loadable from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub stop_words: Vec<String>,
    /// Shards of the relevance accumulator used by parallel searches.
    pub bucket_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stop_words: Vec::new(),
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl SearchConfig {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
