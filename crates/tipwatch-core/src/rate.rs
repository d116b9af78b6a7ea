//! Index-rate calculation.
//!
//! A secant over the sampling window: progress from the oldest retained
//! sample to the current indexer tip, divided by the time between them.

use crate::types::NodeUrl;
use crate::window::SampleWindow;

/// Average indexing rate for `node` in heights per millisecond.
///
/// Returns `None` when there is no fresh sample for the node, when the
/// indexer advanced less than `min_advance` heights since that sample, or
/// when no time has elapsed.
pub fn average_index_rate(
    window: &SampleWindow,
    node: &NodeUrl,
    indexer_tip: u64,
    now: u64,
    min_advance: u64,
) -> Option<f64> {
    let first = window.first_for(node, now)?;

    let advanced = indexer_tip.checked_sub(first.indexer_tip)?;
    if advanced < min_advance {
        return None;
    }

    let elapsed = now.checked_sub(first.timestamp)?;
    if elapsed == 0 {
        return None;
    }

    Some(advanced as f64 / elapsed as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;
    use crate::types::SyncStatus;

    const T0: u64 = 1_700_000_000_000;

    fn window_with(node: &NodeUrl, points: &[(u64, u64)]) -> SampleWindow {
        let mut window = SampleWindow::new(60_000);
        for &(timestamp, indexer_tip) in points {
            let sample = Sample {
                timestamp,
                indexer_tip,
                status: SyncStatus::Syncing,
                ..Sample::bootstrap(node.clone())
            };
            window.push(sample, timestamp);
        }
        window
    }

    #[test]
    fn test_rate_over_window() {
        let node = NodeUrl::new("http://a");
        let window = window_with(&node, &[(T0, 100)]);

        let rate = average_index_rate(&window, &node, 160, T0 + 10_000, 50).unwrap();
        assert!((rate - 0.006).abs() < 1e-12);
    }

    #[test]
    fn test_uses_oldest_sample() {
        let node = NodeUrl::new("http://a");
        let window = window_with(&node, &[(T0, 0), (T0 + 10_000, 500), (T0 + 20_000, 900)]);

        let rate = average_index_rate(&window, &node, 1_000, T0 + 20_000, 50).unwrap();
        assert!((rate - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_none_without_samples() {
        let node = NodeUrl::new("http://a");
        let window = SampleWindow::new(60_000);
        assert_eq!(average_index_rate(&window, &node, 1_000, T0, 50), None);

        // Samples of another node do not count
        let window = window_with(&NodeUrl::new("http://b"), &[(T0, 0)]);
        assert_eq!(average_index_rate(&window, &node, 1_000, T0 + 1, 50), None);
    }

    #[test]
    fn test_none_below_threshold() {
        let node = NodeUrl::new("http://a");
        let window = window_with(&node, &[(T0, 100)]);
        assert_eq!(average_index_rate(&window, &node, 149, T0 + 10_000, 50), None);
        assert!(average_index_rate(&window, &node, 150, T0 + 10_000, 50).is_some());
    }

    #[test]
    fn test_none_when_indexer_rewinds() {
        let node = NodeUrl::new("http://a");
        let window = window_with(&node, &[(T0, 100)]);
        assert_eq!(average_index_rate(&window, &node, 10, T0 + 10_000, 0), None);
    }

    #[test]
    fn test_none_without_elapsed_time() {
        let node = NodeUrl::new("http://a");
        let window = window_with(&node, &[(T0, 100)]);
        assert_eq!(average_index_rate(&window, &node, 200, T0, 50), None);
    }

    #[test]
    fn test_bootstrap_never_anchors_rate() {
        let node = NodeUrl::new("http://a");
        let mut window = SampleWindow::new(60_000);
        window.reset(node.clone());
        assert_eq!(average_index_rate(&window, &node, 1_000_000, T0, 50), None);
    }
}
