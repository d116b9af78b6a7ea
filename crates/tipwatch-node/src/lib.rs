//! # Tipwatch Node
//!
//! The boundary between the estimator and the node it watches. Queries go
//! through the [`NodeRpc`] trait and the synced-block cursor through
//! [`CursorSink`], so the estimator stays transport-agnostic.
//!
//! ## Key Types
//!
//! - [`NodeRpc`] - Async queries for the tip header and best-known block
//! - [`CursorSink`] - Receives the cache tip after every committed tick
//! - [`MemoryNode`] - Scriptable in-memory node for tests and simulations
//! - [`MemoryCursor`] - In-memory cursor that records every height
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tipwatch_core::{NodeUrl, TipHeader};
//! use tipwatch_node::{MemoryNode, NodeRpc};
//!
//! async fn example() {
//!     let node = MemoryNode::new();
//!     let url = NodeUrl::new("http://localhost:8114");
//!     node.set_tip(&url, TipHeader { number: 100, timestamp: 1_700_000_000_000 });
//!
//!     let tip = node.get_tip_header(&url).await.unwrap();
//!     assert_eq!(tip.number, 100);
//! }
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, RpcError};
pub use memory::{MemoryCursor, MemoryNode};
pub use traits::{CursorSink, NodeRpc};
