//! Sample: one observation of sync progress at a point in time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{NodeUrl, SyncStatus};

/// One immutable observation of sync progress.
///
/// Samples are shared as `Arc<Sample>` once they enter a
/// [`SampleWindow`](crate::SampleWindow); a new tick always produces a new
/// sample rather than touching an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// The node this observation was taken from.
    pub node: NodeUrl,
    /// Wall-clock time of the observation (Unix ms).
    pub timestamp: u64,
    /// Local height up to which the indexer has built.
    pub indexer_tip: u64,
    /// Local height up to which block data is cached.
    pub cache_tip: u64,
    /// Highest height the node claims the network has reached.
    pub best_known_tip: u64,
    /// Timestamp of the best-known block (Unix ms).
    pub best_known_timestamp: u64,
    /// Indexing rate over the sampling window, in heights per millisecond.
    pub index_rate: Option<f64>,
    /// Caching rate. Reserved; never populated by the classifier.
    pub cache_rate: Option<f64>,
    /// Estimated time to reach the best-known tip, in milliseconds.
    pub estimate: Option<u64>,
    /// Classification of this observation.
    pub status: SyncStatus,
}

impl Sample {
    /// The zeroed sample that seeds a window after a node switch.
    ///
    /// Its timestamp is the epoch, so it falls outside any sampling horizon
    /// and is never mistaken for a real observation.
    pub fn bootstrap(node: NodeUrl) -> Self {
        Self {
            node,
            timestamp: 0,
            indexer_tip: 0,
            cache_tip: 0,
            best_known_tip: 0,
            best_known_timestamp: 0,
            index_rate: None,
            cache_rate: None,
            estimate: None,
            status: SyncStatus::NotStarted,
        }
    }

    /// Whether this is a bootstrap sample rather than an observation.
    pub fn is_bootstrap(&self) -> bool {
        self.status == SyncStatus::NotStarted && self.timestamp == 0
    }

    /// Age of this sample relative to `now` (ms). Zero if it is from the future.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    /// Fraction of the best-known chain that has been cached, in `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        if self.best_known_tip == 0 {
            return None;
        }
        let fraction = self.cache_tip as f64 / self.best_known_tip as f64;
        Some(fraction.min(1.0))
    }

    /// The time-to-completion estimate as a duration.
    pub fn estimate(&self) -> Option<Duration> {
        self.estimate.map(Duration::from_millis)
    }
}
