//! Sync-status classification.
//!
//! Turns one observation into a [`Sample`], using the window for the
//! previous best-known tip and for the index rate.
//!
//! ```text
//!            best-known stable?
//!              /          \
//!            no            yes
//!         Syncing      cache caught up?
//!                        /          \
//!                      yes           no
//!                 tip age?         Syncing (+ rate, estimate)
//!        <= max delay  -> Completed
//!        >  stale age  -> Pending
//!        otherwise     -> Syncing
//! ```

use crate::config::EstimatorConfig;
use crate::rate::average_index_rate;
use crate::sample::Sample;
use crate::tick::ProgressTick;
use crate::types::{BestKnownBlock, NodeUrl, SyncStatus, TipHeader};
use crate::window::SampleWindow;

/// Everything gathered for one tick before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Node the queries were issued against.
    pub node: NodeUrl,
    /// Local progress.
    pub tick: ProgressTick,
    /// The node's own tip.
    pub tip_header: TipHeader,
    /// The network's best-known block, as reported by the node.
    pub best_known: BestKnownBlock,
}

/// Classify an observation taken at `now` into a new sample.
///
/// The window is only read; the caller decides whether to push the result.
pub fn classify(
    window: &SampleWindow,
    observation: &Observation,
    now: u64,
    config: &EstimatorConfig,
) -> Sample {
    let Observation {
        node,
        tick,
        tip_header,
        best_known,
    } = observation;
    let best_known_tip = best_known.best_known_block_number;

    let best_known_stable = window.last_for(node, now).is_some_and(|previous| {
        best_known_tip.saturating_sub(previous.best_known_tip) < config.best_known_diff_threshold
    });

    let mut status = SyncStatus::Syncing;
    let mut index_rate = None;
    let mut estimate = None;

    if best_known_stable {
        let remaining_to_cache = best_known_tip.saturating_sub(tick.cache_tip);
        let all_cached = remaining_to_cache < config.cache_diff_threshold;

        if all_cached {
            let tip_age = now.saturating_sub(tip_header.timestamp);
            if tip_age <= config.max_tip_block_delay_ms {
                status = SyncStatus::Completed;
            }
            // Evaluated after the completed check so a long-stale tip always wins.
            if tip_age > config.stale_tip_age_ms {
                status = SyncStatus::Pending;
            }
        } else if let Some(rate) = average_index_rate(
            window,
            node,
            tick.indexer_tip,
            now,
            config.indexer_tip_diff_threshold,
        ) {
            let remaining = best_known_tip.saturating_sub(tick.indexer_tip);
            index_rate = Some(rate);
            estimate = Some((remaining as f64 / rate).round() as u64);
        }
    }

    Sample {
        node: node.clone(),
        timestamp: now,
        indexer_tip: tick.indexer_tip,
        cache_tip: tick.cache_tip,
        best_known_tip,
        best_known_timestamp: best_known.best_known_block_timestamp,
        index_rate,
        cache_rate: None,
        estimate,
        status,
    }
}
