//! The estimation cache.
//!
//! Polling consumers read the "current" estimate far more often than ticks
//! arrive. The cache hands back a stable `Arc<Sample>` between ticks, follows
//! the latest sample while the cache tip is not moving, and lets go of the
//! held value as soon as it belongs to another node or ages past the horizon.

use std::sync::Arc;

use crate::sample::Sample;
use crate::types::NodeUrl;
use crate::window::SampleWindow;

/// Last estimate handed to a polling consumer.
#[derive(Debug, Clone, Default)]
pub struct EstimationCache {
    cached: Option<Arc<Sample>>,
}

impl EstimationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The estimate to report for `active` at `now`.
    ///
    /// Returns `None` only while the window is empty.
    pub fn current(
        &mut self,
        window: &SampleWindow,
        active: &NodeUrl,
        now: u64,
    ) -> Option<Arc<Sample>> {
        let latest = window.latest()?;

        let Some(cached) = self.cached.clone() else {
            return Some(self.replace(latest));
        };

        if let Some((previous, latest)) = window.latest_pair() {
            if previous.cache_tip == latest.cache_tip {
                return Some(self.replace(latest));
            }
        }

        if &cached.node != active || cached.age(now) > window.horizon_ms() {
            return Some(self.replace(latest));
        }

        Some(cached)
    }

    /// The held value, if any, without refreshing it.
    pub fn peek(&self) -> Option<&Arc<Sample>> {
        self.cached.as_ref()
    }

    /// Forget the held value.
    pub fn clear(&mut self) {
        self.cached = None;
    }

    fn replace(&mut self, latest: &Arc<Sample>) -> Arc<Sample> {
        self.cached = Some(Arc::clone(latest));
        Arc::clone(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SyncStatus;

    const T0: u64 = 1_700_000_000_000;

    fn push(window: &mut SampleWindow, node: &str, timestamp: u64, cache_tip: u64) -> Arc<Sample> {
        let sample = Sample {
            timestamp,
            cache_tip,
            status: SyncStatus::Syncing,
            ..Sample::bootstrap(NodeUrl::new(node))
        };
        window.push(sample, timestamp)
    }

    #[test]
    fn test_empty_window_has_no_estimate() {
        let mut cache = EstimationCache::new();
        let window = SampleWindow::new(60_000);
        assert!(cache.current(&window, &NodeUrl::new("http://a"), T0).is_none());
        assert!(cache.peek().is_none());
    }

    #[test]
    fn test_first_read_caches_latest() {
        let node = NodeUrl::new("http://a");
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        let latest = push(&mut window, "http://a", T0, 10);

        let current = cache.current(&window, &node, T0).unwrap();
        assert!(Arc::ptr_eq(&current, &latest));
    }

    #[test]
    fn test_holds_value_while_cache_tip_moves() {
        let node = NodeUrl::new("http://a");
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        let first = push(&mut window, "http://a", T0, 10);
        cache.current(&window, &node, T0);

        push(&mut window, "http://a", T0 + 1_000, 20);
        let current = cache.current(&window, &node, T0 + 1_000).unwrap();
        assert!(Arc::ptr_eq(&current, &first));
    }

    #[test]
    fn test_follows_latest_when_cache_tip_stalls() {
        let node = NodeUrl::new("http://a");
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        push(&mut window, "http://a", T0, 10);
        cache.current(&window, &node, T0);

        let latest = push(&mut window, "http://a", T0 + 1_000, 10);
        let a = cache.current(&window, &node, T0 + 1_000).unwrap();
        let b = cache.current(&window, &node, T0 + 1_500).unwrap();
        assert!(Arc::ptr_eq(&a, &latest));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_replaces_stale_value() {
        let node = NodeUrl::new("http://a");
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        push(&mut window, "http://a", T0, 10);
        cache.current(&window, &node, T0);

        let latest = push(&mut window, "http://a", T0 + 50_000, 20);
        let held = cache.current(&window, &node, T0 + 50_000).unwrap();
        assert!(!Arc::ptr_eq(&held, &latest));

        let current = cache.current(&window, &node, T0 + 60_001).unwrap();
        assert!(Arc::ptr_eq(&current, &latest));
    }

    #[test]
    fn test_switches_on_node_change() {
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        push(&mut window, "http://a", T0, 10);
        push(&mut window, "http://a", T0 + 1_000, 20);
        cache.current(&window, &NodeUrl::new("http://a"), T0 + 1_000);

        let node_b = NodeUrl::new("http://b");
        let bootstrap = window.reset(node_b.clone());
        let current = cache.current(&window, &node_b, T0 + 1_100).unwrap();
        assert!(Arc::ptr_eq(&current, &bootstrap));
        assert_eq!(current.status, SyncStatus::NotStarted);
    }

    #[test]
    fn test_clear() {
        let node = NodeUrl::new("http://a");
        let mut cache = EstimationCache::new();
        let mut window = SampleWindow::new(60_000);
        push(&mut window, "http://a", T0, 10);
        cache.current(&window, &node, T0);
        assert!(cache.peek().is_some());

        cache.clear();
        assert!(cache.peek().is_none());
    }
}
