//! Error types for tipwatch core.

use thiserror::Error;

/// Errors raised while parsing a raw progress tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error("{field} is not a block number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: String },
}

/// Errors raised while loading or validating estimator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample horizon must be greater than zero")]
    ZeroHorizon,

    #[error(
        "max tip block delay ({max_tip_block_delay} ms) exceeds stale tip age ({stale_tip_age} ms)"
    )]
    InvertedTipDelays {
        max_tip_block_delay: u64,
        stale_tip_age: u64,
    },

    #[error("publish capacity must be greater than zero")]
    ZeroCapacity,

    #[error("decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}
