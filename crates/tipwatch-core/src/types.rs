//! Strong type definitions shared across tipwatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a node, in practice its RPC URL.
///
/// Cheap to clone; samples and in-flight ticks carry one each.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUrl(Arc<str>);

impl NodeUrl {
    /// Create a node identifier from a URL string.
    pub fn new(url: impl AsRef<str>) -> Self {
        Self(Arc::from(url.as_ref()))
    }

    /// Get the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeUrl({})", self.0)
    }
}

impl fmt::Display for NodeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for NodeUrl {
    fn from(url: String) -> Self {
        Self(Arc::from(url))
    }
}

impl AsRef<str> for NodeUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of overall synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    /// No observation yet for the active node.
    #[default]
    NotStarted,
    /// Cache caught up, but the node's own tip is long stale.
    Pending,
    /// Catching up, or not yet enough signal to say otherwise.
    Syncing,
    /// Cache caught up with a fresh network tip.
    Completed,
}

impl SyncStatus {
    /// Whether this status reports a finished sync.
    pub fn is_completed(&self) -> bool {
        matches!(self, SyncStatus::Completed)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStatus::NotStarted => "not-started",
            SyncStatus::Pending => "pending",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The node's own current tip header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipHeader {
    /// Block height.
    pub number: u64,
    /// Block timestamp (Unix ms).
    pub timestamp: u64,
}

/// The highest block the node claims the network has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestKnownBlock {
    /// Block height.
    pub best_known_block_number: u64,
    /// Block timestamp (Unix ms).
    pub best_known_block_timestamp: u64,
}

impl From<TipHeader> for BestKnownBlock {
    fn from(header: TipHeader) -> Self {
        Self {
            best_known_block_number: header.number,
            best_known_block_timestamp: header.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_url_display() {
        let url = NodeUrl::new("http://localhost:8114");
        assert_eq!(format!("{}", url), "http://localhost:8114");
        assert_eq!(format!("{:?}", url), "NodeUrl(http://localhost:8114)");
    }

    #[test]
    fn test_node_url_equality_ignores_origin() {
        let a = NodeUrl::from("http://a");
        let b = NodeUrl::from(String::from("http://a"));
        assert_eq!(a, b);
        assert_ne!(a, NodeUrl::from("http://b"));
    }

    #[test]
    fn test_status_default_is_not_started() {
        assert_eq!(SyncStatus::default(), SyncStatus::NotStarted);
        assert!(!SyncStatus::Syncing.is_completed());
        assert!(SyncStatus::Completed.is_completed());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&SyncStatus::NotStarted).unwrap();
        assert_eq!(json, "\"notStarted\"");
        let status: SyncStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, SyncStatus::Completed);
    }

    #[test]
    fn test_best_known_from_header() {
        let header = TipHeader {
            number: 42,
            timestamp: 1_000,
        };
        let best = BestKnownBlock::from(header);
        assert_eq!(best.best_known_block_number, 42);
        assert_eq!(best.best_known_block_timestamp, 1_000);
    }
}
