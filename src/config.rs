// src/config.rs
//! Engine options.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Options for one detection run.
///
/// The engine queries every token-length threshold in
/// `[to_threshold, from_threshold]`, largest first. A fragment must reach at
/// least the threshold it was discovered at to be reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Largest (inclusive) threshold queried.
    #[serde(default = "default_threshold")]
    pub from_threshold: usize,

    /// Smallest (inclusive) threshold queried.
    #[serde(default = "default_threshold")]
    pub to_threshold: usize,

    /// Root path prefixes a clone group must span. Empty means no filter.
    #[serde(default)]
    pub path_filter: Vec<String>,

    /// Number of parallel tokenizer workers. Zero is rejected by
    /// [`Options::validate`]; the default is the CPU count.
    #[serde(default = "default_parallelism")]
    pub tokenizer_parallelism: usize,
}

fn default_threshold() -> usize {
    15
}

fn default_parallelism() -> usize {
    num_cpus::get()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            from_threshold: default_threshold(),
            to_threshold: default_threshold(),
            path_filter: Vec::new(),
            tokenizer_parallelism: default_parallelism(),
        }
    }
}

impl Options {
    /// Checks the options before the pipeline starts.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] on a non-positive threshold, inverted
    /// threshold range, or zero workers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.to_threshold == 0 {
            return Err(ConfigError::ThresholdTooSmall(self.to_threshold));
        }
        if self.to_threshold > self.from_threshold {
            return Err(ConfigError::ThresholdsInverted {
                from: self.from_threshold,
                to: self.to_threshold,
            });
        }
        if self.tokenizer_parallelism == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// The thresholds to query, largest first.
    #[must_use]
    pub fn thresholds(&self) -> Vec<usize> {
        (self.to_threshold..=self.from_threshold).rev().collect()
    }
}
