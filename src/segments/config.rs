#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by invalid split configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Window size must be positive.
    #[error("invalid window size {0}: must be > 0")]
    InvalidWindowSize(u32),
}

/// Parameters of the candidate-indel split strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplitConfig {
    /// Maximum distance between a window's anchor and any record it includes.
    pub window_size: u32,
    /// Minimum indel evidence count for a candidate indel.
    pub candidate_indel_threshold: u32,
    /// Emit per-segment diagnostics at info level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub verbose: bool,
    /// Move the anchor of the current window to each adjacent indel of a run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reanchor_adjacent_indels: bool,
}

impl SplitConfig {
    /// Construct a validated configuration.
    pub fn new(window_size: u32, candidate_indel_threshold: u32) -> Result<Self, ConfigError> {
        let config = Self {
            window_size,
            candidate_indel_threshold,
            verbose: false,
            reanchor_adjacent_indels: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Enable verbose diagnostics.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Re-anchor windows on adjacent indels instead of keeping the first one.
    pub fn with_reanchoring(mut self, enabled: bool) -> Self {
        self.reanchor_adjacent_indels = enabled;
        self
    }

    /// Check invariants; fields are public so callers may have edited them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::InvalidWindowSize(self.window_size));
        }
        Ok(())
    }
}
