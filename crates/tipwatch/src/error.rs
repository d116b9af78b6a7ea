//! Error types for the estimator.

use thiserror::Error;
use tipwatch_core::{ConfigError, TickError};
use tipwatch_node::RpcError;

/// Errors that can occur while handling estimator events.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// The tick carried heights that are not block numbers.
    #[error("malformed tick: {0}")]
    Tick(#[from] TickError),

    /// The node could not be queried for its tip.
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),

    /// The configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;
