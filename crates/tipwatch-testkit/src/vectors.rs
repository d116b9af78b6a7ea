//! Scenario vectors for deterministic verification.
//!
//! Each scenario is a short series of observations against one node,
//! replayed through the classifier with the default configuration. The
//! final sample must carry the expected status and estimate.

use tipwatch_core::{
    classify, BestKnownBlock, EstimatorConfig, NodeUrl, Observation, ProgressTick, Sample,
    SampleWindow, SyncStatus, TipHeader,
};

use crate::fixtures::HARNESS_EPOCH;

/// One observation in a scenario.
#[derive(Debug, Clone, Copy)]
pub struct Observed {
    /// Offset from the scenario epoch (ms).
    pub at_ms: u64,
    pub indexer_tip: u64,
    pub cache_tip: u64,
    pub best_known: u64,
    /// Age of the node's tip when observed (ms).
    pub tip_age_ms: u64,
}

/// A named scenario vector.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Human-readable name for the scenario.
    pub name: &'static str,
    /// What the scenario exercises.
    pub description: &'static str,
    /// Observations in order.
    pub observations: Vec<Observed>,
    /// Status of the final sample.
    pub expected_status: SyncStatus,
    /// Estimate of the final sample (ms).
    pub expected_estimate: Option<u64>,
}

const fn obs(at_ms: u64, indexer_tip: u64, cache_tip: u64, best_known: u64, tip_age_ms: u64) -> Observed {
    Observed {
        at_ms,
        indexer_tip,
        cache_tip,
        best_known,
        tip_age_ms,
    }
}

/// Get all scenario vectors.
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "first sample",
            description: "a lone observation has no previous best-known tip to trust",
            observations: vec![obs(0, 100, 90, 1_000, 0)],
            expected_status: SyncStatus::Syncing,
            expected_estimate: None,
        },
        Scenario {
            name: "rate and estimate",
            description: "60 heights in 10 s with 845 remaining",
            observations: vec![obs(0, 100, 90, 1_000, 0), obs(10_000, 160, 95, 1_005, 0)],
            expected_status: SyncStatus::Syncing,
            expected_estimate: Some(140_833),
        },
        Scenario {
            name: "completed with fresh tip",
            description: "cache caught up and the tip is one minute old",
            observations: vec![
                obs(0, 1_000, 1_000, 1_000, 0),
                obs(10_000, 1_002, 1_002, 1_002, 60_000),
            ],
            expected_status: SyncStatus::Completed,
            expected_estimate: None,
        },
        Scenario {
            name: "pending with stale tip",
            description: "cache caught up but the tip is over ten minutes old",
            observations: vec![
                obs(0, 1_000, 1_000, 1_000, 0),
                obs(10_000, 1_002, 1_002, 1_002, 700_000),
            ],
            expected_status: SyncStatus::Pending,
            expected_estimate: None,
        },
        Scenario {
            name: "moderately stale tip",
            description: "cache caught up, tip between three and ten minutes old",
            observations: vec![
                obs(0, 1_000, 1_000, 1_000, 0),
                obs(10_000, 1_002, 1_002, 1_002, 300_000),
            ],
            expected_status: SyncStatus::Syncing,
            expected_estimate: None,
        },
        Scenario {
            name: "jumping best-known tip",
            description: "the network tip moved 100 blocks between ticks",
            observations: vec![obs(0, 100, 90, 1_000, 0), obs(10_000, 400, 95, 1_100, 0)],
            expected_status: SyncStatus::Syncing,
            expected_estimate: None,
        },
        Scenario {
            name: "slow indexer",
            description: "the indexer advanced fewer than 50 heights",
            observations: vec![obs(0, 100, 90, 1_000, 0), obs(10_000, 130, 95, 1_001, 0)],
            expected_status: SyncStatus::Syncing,
            expected_estimate: None,
        },
        Scenario {
            name: "gap longer than horizon",
            description: "the previous sample aged out before the next tick",
            observations: vec![obs(0, 100, 90, 1_000, 0), obs(70_000, 400, 300, 1_010, 0)],
            expected_status: SyncStatus::Syncing,
            expected_estimate: None,
        },
        Scenario {
            name: "rate over three samples",
            description: "the oldest retained sample anchors the rate",
            observations: vec![
                obs(0, 0, 0, 10_000, 0),
                obs(10_000, 500, 400, 10_010, 0),
                obs(20_000, 1_000, 900, 10_020, 0),
            ],
            expected_status: SyncStatus::Syncing,
            expected_estimate: Some(180_400),
        },
    ]
}

/// Replay a scenario through the classifier, returning every sample.
pub fn replay(scenario: &Scenario) -> Vec<Sample> {
    let config = EstimatorConfig::default();
    let node = NodeUrl::new("http://scenario:8114");
    let mut window = SampleWindow::new(config.sample_horizon_ms);

    scenario
        .observations
        .iter()
        .map(|o| {
            let now = HARNESS_EPOCH + o.at_ms;
            let tip_ts = now - o.tip_age_ms;
            let observation = Observation {
                node: node.clone(),
                tick: ProgressTick {
                    indexer_tip: o.indexer_tip,
                    cache_tip: o.cache_tip,
                },
                tip_header: TipHeader {
                    number: o.best_known,
                    timestamp: tip_ts,
                },
                best_known: BestKnownBlock {
                    best_known_block_number: o.best_known,
                    best_known_block_timestamp: tip_ts,
                },
            };
            let sample = classify(&window, &observation, now, &config);
            window.push(sample.clone(), now);
            sample
        })
        .collect()
}

/// Replay every scenario, reporting `(name, passed, final sample summary)`.
pub fn verify_all_scenarios() -> Vec<(String, bool, String)> {
    all_scenarios()
        .iter()
        .map(|scenario| {
            let samples = replay(scenario);
            let last = samples.last();
            let passed = last.is_some_and(|s| {
                s.status == scenario.expected_status && s.estimate == scenario.expected_estimate
            });
            let summary = match last {
                Some(s) => format!("{} estimate={:?}", s.status, s.estimate),
                None => "no samples".to_string(),
            };
            (scenario.name.to_string(), passed, summary)
        })
        .collect()
}
