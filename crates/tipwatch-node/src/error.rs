//! Error types for node queries.

use thiserror::Error;
use tipwatch_core::NodeUrl;

/// Errors that can occur while talking to a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// The request never got a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with an error.
    #[error("rpc error ({code}): {message}")]
    Rpc { code: i64, message: String },

    /// The node does not serve this URL or is not reachable.
    #[error("node unavailable: {0}")]
    NodeUnavailable(NodeUrl),
}

/// Result type for node queries.
pub type Result<T> = std::result::Result<T, RpcError>;
