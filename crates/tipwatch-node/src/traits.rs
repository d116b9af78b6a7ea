//! Collaborator traits: the node RPC and the synced-block cursor.

use std::sync::Arc;

use async_trait::async_trait;
use tipwatch_core::{BestKnownBlock, NodeUrl, TipHeader};

use crate::error::Result;

/// Queries the estimator issues against a node.
///
/// Implementations must be thread-safe (Send + Sync). The estimator never
/// retries; a failed tip-header query aborts the tick.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// The network's best-known block as reported by the node.
    ///
    /// May fail on nodes that do not expose extended sync state; the
    /// estimator then falls back to the tip header.
    async fn get_best_known_sync(&self, node: &NodeUrl) -> Result<BestKnownBlock>;

    /// The node's own current tip.
    async fn get_tip_header(&self, node: &NodeUrl) -> Result<TipHeader>;
}

#[async_trait]
impl<R: NodeRpc + ?Sized> NodeRpc for Arc<R> {
    async fn get_best_known_sync(&self, node: &NodeUrl) -> Result<BestKnownBlock> {
        (**self).get_best_known_sync(node).await
    }

    async fn get_tip_header(&self, node: &NodeUrl) -> Result<TipHeader> {
        (**self).get_tip_header(node).await
    }
}

/// Persists the "last synced block" cursor.
#[async_trait]
pub trait CursorSink: Send + Sync {
    /// Record the cache tip reached by the latest committed tick.
    async fn save_synced_block(&self, height: u64) -> Result<()>;
}

#[async_trait]
impl<C: CursorSink + ?Sized> CursorSink for Arc<C> {
    async fn save_synced_block(&self, height: u64) -> Result<()> {
        (**self).save_synced_block(height).await
    }
}
