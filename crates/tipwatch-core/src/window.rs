//! The sampling window.
//!
//! Holds recent samples for one node at a time. Pruning is a pure function
//! of "now": every push first drops samples that are stale or belong to
//! another node, so the window heals itself after a node switch or a long
//! gap without any background timer.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::sample::Sample;
use crate::types::{NodeUrl, SyncStatus};

/// Recent samples, ordered by insertion.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<Arc<Sample>>,
    horizon_ms: u64,
}

impl SampleWindow {
    /// Create an empty window retaining samples for `horizon_ms`.
    pub fn new(horizon_ms: u64) -> Self {
        Self {
            samples: VecDeque::new(),
            horizon_ms,
        }
    }

    /// The retention horizon (ms).
    pub fn horizon_ms(&self) -> u64 {
        self.horizon_ms
    }

    /// Samples owned by `node` whose age at `now` is within the horizon, oldest first.
    pub fn samples_for<'a>(
        &'a self,
        node: &'a NodeUrl,
        now: u64,
    ) -> impl DoubleEndedIterator<Item = &'a Arc<Sample>> + 'a {
        let horizon = self.horizon_ms;
        self.samples
            .iter()
            .filter(move |s| &s.node == node && s.age(now) <= horizon)
    }

    /// Oldest fresh sample for `node`.
    pub fn first_for(&self, node: &NodeUrl, now: u64) -> Option<&Arc<Sample>> {
        let horizon = self.horizon_ms;
        self.samples
            .iter()
            .find(|s| &s.node == node && s.age(now) <= horizon)
    }

    /// Newest fresh sample for `node`.
    pub fn last_for(&self, node: &NodeUrl, now: u64) -> Option<&Arc<Sample>> {
        let horizon = self.horizon_ms;
        self.samples
            .iter()
            .rfind(|s| &s.node == node && s.age(now) <= horizon)
    }

    /// Prune to fresh samples for the sample's node, then append it.
    pub fn push(&mut self, sample: Sample, now: u64) -> Arc<Sample> {
        let horizon = self.horizon_ms;
        self.samples
            .retain(|s| s.node == sample.node && s.age(now) <= horizon);

        let sample = Arc::new(sample);
        self.samples.push_back(Arc::clone(&sample));
        sample
    }

    /// Replace the whole window with a bootstrap sample for `node`.
    pub fn reset(&mut self, node: NodeUrl) -> Arc<Sample> {
        let bootstrap = Arc::new(Sample::bootstrap(node));
        self.samples.clear();
        self.samples.push_back(Arc::clone(&bootstrap));
        bootstrap
    }

    /// Newest sample, regardless of age or node.
    pub fn latest(&self) -> Option<&Arc<Sample>> {
        self.samples.back()
    }

    /// The two newest samples as `(previous, latest)`.
    pub fn latest_pair(&self) -> Option<(&Arc<Sample>, &Arc<Sample>)> {
        let len = self.samples.len();
        if len < 2 {
            return None;
        }
        Some((&self.samples[len - 2], &self.samples[len - 1]))
    }

    /// Status of the newest sample, or `NotStarted` when empty.
    pub fn status(&self) -> SyncStatus {
        self.latest()
            .map(|s| s.status)
            .unwrap_or(SyncStatus::NotStarted)
    }

    /// All retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Sample>> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
