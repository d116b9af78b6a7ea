//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tipwatch_core::{RawTick, TipNumber};

/// One step of a simulated sync: how far time and each tip moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Time since the previous step (ms).
    pub advance_ms: u64,
    /// Indexer progress since the previous step.
    pub indexer_delta: u64,
    /// Cache progress since the previous step.
    pub cache_delta: u64,
    /// Best-known tip movement since the previous step.
    pub best_known_delta: u64,
    /// Age of the node's own tip at this step (ms).
    pub tip_age_ms: u64,
}

/// Generate a single step. Time gaps occasionally exceed the default horizon.
pub fn step() -> impl Strategy<Value = Step> {
    (
        prop_oneof![4 => 0u64..=15_000, 1 => 15_000u64..=120_000],
        0u64..=400,
        0u64..=400,
        prop_oneof![3 => 0u64..=10, 1 => 10u64..=200],
        prop_oneof![
            Just(0u64),
            0u64..=180_000,
            180_001u64..=600_000,
            600_001u64..=3_600_000,
        ],
    )
        .prop_map(
            |(advance_ms, indexer_delta, cache_delta, best_known_delta, tip_age_ms)| Step {
                advance_ms,
                indexer_delta,
                cache_delta,
                best_known_delta,
                tip_age_ms,
            },
        )
}

/// Generate a series of up to `max_len` steps (at least one).
pub fn progress_series(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(), 1..=max_len.max(1))
}

/// Generate a tip height in any representation a tick source may use.
pub fn tip_number() -> impl Strategy<Value = (u64, TipNumber)> {
    prop_oneof![
        any::<u64>().prop_map(|n| (n, TipNumber::Number(n.into()))),
        any::<u64>().prop_map(|n| (n, TipNumber::Text(n.to_string()))),
        any::<u64>().prop_map(|n| (n, TipNumber::Text(format!("{:#x}", n)))),
        any::<u64>().prop_map(|n| (n, TipNumber::Text(format!("  {}\t", n)))),
    ]
}

/// Generate a well-formed raw tick along with the heights it encodes.
pub fn raw_tick() -> impl Strategy<Value = (u64, u64, RawTick)> {
    (tip_number(), tip_number()).prop_map(|((indexer, i), (cache, c))| {
        (
            indexer,
            cache,
            RawTick {
                indexer_tip_number: i,
                cache_tip_number: c,
            },
        )
    })
}

/// Generate a tip string that is not a block number.
pub fn malformed_tip() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[1-9][0-9]{0,5}[g-z]{1,3}",
        Just(String::new()),
        Just("0x".to_string()),
        Just("1.5".to_string()),
        Just("99999999999999999999999".to_string()),
    ]
}

/// Generate the JSON text of a well-formed tick along with the heights it encodes.
pub fn tick_json() -> impl Strategy<Value = (u64, u64, String)> {
    raw_tick().prop_map(|(indexer, cache, raw)| {
        let json = serde_json::to_string(&raw).expect("raw ticks always serialize");
        (indexer, cache, json)
    })
}
