//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use tipwatch::{Estimator, EstimatorConfig, ManualClock, NodeUrl, RawTick, Sample, TickOutcome};
use tipwatch_core::{BestKnownBlock, Clock, TipHeader};
use tipwatch_node::{MemoryCursor, MemoryNode};

/// Clock reading every harness starts from (Unix ms).
pub const HARNESS_EPOCH: u64 = 1_700_000_000_000;

/// An estimator wired to an in-memory node, cursor, and manual clock.
pub struct Harness {
    pub node: Arc<MemoryNode>,
    pub cursor: Arc<MemoryCursor>,
    pub clock: ManualClock,
    pub active: watch::Sender<NodeUrl>,
    pub estimator: Estimator<Arc<MemoryNode>, ManualClock>,
}

impl Harness {
    /// Create a harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    /// Create a harness with a custom configuration.
    ///
    /// Panics if the configuration is invalid.
    pub fn with_config(config: EstimatorConfig) -> Self {
        let node = Arc::new(MemoryNode::new());
        let cursor = Arc::new(MemoryCursor::new());
        let clock = ManualClock::new(HARNESS_EPOCH);
        let (active, active_rx) = watch::channel(Self::default_node());

        let estimator = Estimator::new(Arc::clone(&node), clock.clone(), active_rx, config)
            .expect("harness configuration must be valid")
            .with_cursor(Arc::clone(&cursor));

        Self {
            node,
            cursor,
            clock,
            active,
            estimator,
        }
    }

    /// The node every harness starts on.
    pub fn default_node() -> NodeUrl {
        NodeUrl::new("http://harness:8114")
    }

    /// Current harness time (Unix ms).
    pub fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Move harness time forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Serve `height` as both tip and best-known for the active node, with a
    /// tip that is `tip_age_ms` old.
    pub fn set_chain(&self, height: u64, tip_age_ms: u64) {
        let node = self.estimator.active_node();
        self.set_chain_for(&node, height, tip_age_ms);
    }

    /// Like [`Harness::set_chain`] for a specific node.
    pub fn set_chain_for(&self, node: &NodeUrl, height: u64, tip_age_ms: u64) {
        let timestamp = self.now().saturating_sub(tip_age_ms);
        self.node.set_tip(
            node,
            TipHeader {
                number: height,
                timestamp,
            },
        );
        self.node.set_best_known(
            node,
            BestKnownBlock {
                best_known_block_number: height,
                best_known_block_timestamp: timestamp,
            },
        );
    }

    /// Deliver a tick with numeric heights.
    pub async fn tick(&self, indexer_tip: u64, cache_tip: u64) -> tipwatch::Result<TickOutcome> {
        self.estimator
            .on_tick(&RawTick::new(indexer_tip, cache_tip))
            .await
    }

    /// Announce a new active node and reset the estimator to it.
    pub async fn switch_node(&self, node: NodeUrl) -> Arc<Sample> {
        self.active.send_replace(node.clone());
        self.estimator.reset(node).await
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
