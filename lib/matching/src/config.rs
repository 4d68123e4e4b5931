use serde::{Deserialize, Serialize};
use talentx_core::{Error, Result};

/// Tunables for a matching run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Sub-score given to a dimension the candidate has no data for
    pub missing_penalty: f64,
    /// Pool size from which candidates are scored on the rayon pool
    pub parallel_threshold: usize,
    /// Length of the top list and of the group ranking in the summary
    pub top_n: usize,
    /// Number of equal-width match-rate bins over [0, 100]
    pub histogram_bins: usize,
    /// Candidates passed on to the narrative step
    pub insight_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_penalty: 0.0,
            parallel_threshold: 256,
            top_n: 10,
            histogram_bins: 10,
            insight_top_n: 5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.missing_penalty) {
            return Err(Error::InvalidConfig(format!(
                "missing_penalty must be within [0, 1], got {}",
                self.missing_penalty
            )));
        }
        if self.histogram_bins == 0 {
            return Err(Error::InvalidConfig("histogram_bins must be at least 1".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_missing_penalty(mut self, penalty: f64) -> Self {
        self.missing_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
