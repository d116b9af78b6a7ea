//! Estimator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Thresholds and timings for the sync estimator.
///
/// All fields default to the values the estimator was tuned with, so a
/// partial JSON document only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// How long samples stay in the window (ms).
    pub sample_horizon_ms: u64,
    /// Minimum indexer advance over the window before a rate is trusted.
    pub indexer_tip_diff_threshold: u64,
    /// The cache counts as caught up when fewer than this many blocks remain.
    pub cache_diff_threshold: u64,
    /// The best-known tip is stable when it moved less than this since the last sample.
    pub best_known_diff_threshold: u64,
    /// Maximum tip age (ms) for the sync to count as completed.
    pub max_tip_block_delay_ms: u64,
    /// Tip age (ms) beyond which a caught-up cache is reported as pending.
    pub stale_tip_age_ms: u64,
    /// Quiet period applied to node-change bursts by the event loop (ms). Zero disables.
    pub node_change_debounce_ms: u64,
    /// Capacity of the sample broadcast channel.
    pub publish_capacity: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_horizon_ms: 60_000,
            indexer_tip_diff_threshold: 50,
            cache_diff_threshold: 5,
            best_known_diff_threshold: 50,
            max_tip_block_delay_ms: 180_000,
            stale_tip_age_ms: 600_000,
            node_change_debounce_ms: 500,
            publish_capacity: 64,
        }
    }
}

impl EstimatorConfig {
    /// Decode a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the thresholds are consistent with each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_horizon_ms == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.max_tip_block_delay_ms > self.stale_tip_age_ms {
            return Err(ConfigError::InvertedTipDelays {
                max_tip_block_delay: self.max_tip_block_delay_ms,
                stale_tip_age: self.stale_tip_age_ms,
            });
        }
        if self.publish_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// The sampling horizon as a duration.
    pub fn sample_horizon(&self) -> Duration {
        Duration::from_millis(self.sample_horizon_ms)
    }

    /// The node-change quiet period as a duration.
    pub fn node_change_debounce(&self) -> Duration {
        Duration::from_millis(self.node_change_debounce_ms)
    }
}
