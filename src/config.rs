use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

/// Configuration of one similarity run.
///
/// Defaults mirror the usual "report the two closest documents, skip
/// near-orthogonal matches" setup: `max_count = 2`,
/// `min_score = 0.0001`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Maximum number of similar documents reported per document.
    pub max_count: usize,
    /// Exclusive minimum cosine score a neighbor must reach to be
    /// reported. Ranked candidates are truncated to `max_count` first,
    /// then filtered by this bound.
    pub min_score: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_count: 2,
            min_score: 1e-4,
        }
    }
}

impl SimilarityConfig {
    /// Reject malformed settings before any similarity work begins.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.max_count == 0 {
            return Err(SimilarityError::InvalidMaxCount);
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(SimilarityError::InvalidMinScore(self.min_score));
        }
        Ok(())
    }
}
