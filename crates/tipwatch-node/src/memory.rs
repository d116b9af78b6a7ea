//! In-memory implementations of the collaborator traits.
//!
//! These are primarily for testing and simulation. Values are set per node
//! URL and served back until changed; failures can be scripted per query.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tipwatch_core::{BestKnownBlock, NodeUrl, TipHeader};

use crate::error::{Result, RpcError};
use crate::traits::{CursorSink, NodeRpc};

/// A scriptable in-memory node.
///
/// Thread-safe via RwLock. Unknown URLs answer `NodeUnavailable`.
#[derive(Default)]
pub struct MemoryNode {
    inner: RwLock<HashMap<NodeUrl, NodeState>>,
    tip_queries: AtomicUsize,
    best_known_queries: AtomicUsize,
}

#[derive(Default)]
struct NodeState {
    tip: Option<TipHeader>,
    best_known: Option<BestKnownBlock>,
    tip_failure: Option<RpcError>,
    best_known_failure: Option<RpcError>,
}

impl MemoryNode {
    /// Create a node that serves no URLs yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tip header served for `node`.
    pub fn set_tip(&self, node: &NodeUrl, tip: TipHeader) {
        self.update(node, |state| state.tip = Some(tip));
    }

    /// Set the best-known block served for `node`.
    pub fn set_best_known(&self, node: &NodeUrl, best_known: BestKnownBlock) {
        self.update(node, |state| state.best_known = Some(best_known));
    }

    /// Make tip-header queries for `node` fail until cleared with `None`.
    pub fn fail_tip(&self, node: &NodeUrl, error: Option<RpcError>) {
        self.update(node, |state| state.tip_failure = error);
    }

    /// Make best-known queries for `node` fail until cleared with `None`.
    pub fn fail_best_known(&self, node: &NodeUrl, error: Option<RpcError>) {
        self.update(node, |state| state.best_known_failure = error);
    }

    /// Number of tip-header queries served or refused so far.
    pub fn tip_queries(&self) -> usize {
        self.tip_queries.load(Ordering::SeqCst)
    }

    /// Number of best-known queries served or refused so far.
    pub fn best_known_queries(&self) -> usize {
        self.best_known_queries.load(Ordering::SeqCst)
    }

    fn update(&self, node: &NodeUrl, f: impl FnOnce(&mut NodeState)) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(inner.entry(node.clone()).or_default());
    }

    fn read<T>(&self, node: &NodeUrl, f: impl FnOnce(&NodeState) -> Result<T>) -> Result<T> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match inner.get(node) {
            Some(state) => f(state),
            None => Err(RpcError::NodeUnavailable(node.clone())),
        }
    }
}

#[async_trait]
impl NodeRpc for MemoryNode {
    async fn get_best_known_sync(&self, node: &NodeUrl) -> Result<BestKnownBlock> {
        self.best_known_queries.fetch_add(1, Ordering::SeqCst);
        self.read(node, |state| {
            if let Some(error) = &state.best_known_failure {
                return Err(error.clone());
            }
            state.best_known.ok_or_else(|| RpcError::Rpc {
                code: -32601,
                message: "method not found".into(),
            })
        })
    }

    async fn get_tip_header(&self, node: &NodeUrl) -> Result<TipHeader> {
        self.tip_queries.fetch_add(1, Ordering::SeqCst);
        self.read(node, |state| {
            if let Some(error) = &state.tip_failure {
                return Err(error.clone());
            }
            state
                .tip
                .ok_or_else(|| RpcError::NodeUnavailable(node.clone()))
        })
    }
}

/// Cursor sink that keeps every saved height in memory.
#[derive(Default)]
pub struct MemoryCursor {
    saved: RwLock<Vec<u64>>,
}

impl MemoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently saved height.
    pub fn last(&self) -> Option<u64> {
        self.saved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Every saved height, in order.
    pub fn history(&self) -> Vec<u64> {
        self.saved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CursorSink for MemoryCursor {
    async fn save_synced_block(&self, height: u64) -> Result<()> {
        self.saved
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(height);
        Ok(())
    }
}
