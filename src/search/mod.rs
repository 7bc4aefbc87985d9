//! Search coordination: parse, gather candidates, score, rank, paginate.

pub mod searcher;

pub use self::searcher::Searcher;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::query::ScoringConfig;

/// Candidate count from which scoring is spread over the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuration for search operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scoring parameters.
    pub scoring: ScoringConfig,
    /// Cap on the ranked list; matches beyond it are neither returned nor
    /// counted. `None` means unlimited.
    pub max_results: Option<usize>,
    /// Score candidates in parallel once there are at least this many.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            scoring: ScoringConfig::default(),
            max_results: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.max_results == Some(0) {
            return Err(SiftError::invalid_config("max_results must be at least 1"));
        }
        Ok(())
    }
}
