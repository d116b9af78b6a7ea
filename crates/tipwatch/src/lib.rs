//! # Tipwatch
//!
//! A sync-progress estimator for blockchain clients. Fed periodic progress
//! ticks (local indexer and cache tips), it queries the node for the
//! network's best-known tip and produces a de-noised sync status plus a
//! rolling time-to-completion estimate.
//!
//! ## Overview
//!
//! - **Sample window**: recent samples for the active node, pruned by a time horizon
//! - **Rate calculator**: indexing rate from the oldest retained sample to now
//! - **Status classifier**: `NotStarted`, `Pending`, `Syncing`, `Completed`
//! - **Estimation cache**: a stable current estimate for polling consumers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::{mpsc, watch};
//! use tipwatch::{Estimator, EstimatorConfig, NodeUrl, RawTick};
//! use tipwatch::node::{MemoryCursor, MemoryNode};
//!
//! async fn example() {
//!     let (_node_tx, node_rx) = watch::channel(NodeUrl::new("http://localhost:8114"));
//!     let estimator = Arc::new(
//!         Estimator::with_system_clock(MemoryNode::new(), node_rx, EstimatorConfig::default())
//!             .unwrap()
//!             .with_cursor(MemoryCursor::new()),
//!     );
//!
//!     let mut samples = estimator.subscribe();
//!     let (tick_tx, tick_rx) = mpsc::channel(16);
//!     tokio::spawn({
//!         let estimator = Arc::clone(&estimator);
//!         async move { estimator.run(tick_rx).await }
//!     });
//!
//!     tick_tx.send(RawTick::new("160", "95")).await.unwrap();
//!     let sample = samples.recv().await.unwrap();
//!     println!("{} eta={:?}", sample.status, sample.estimate());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `tipwatch::core` - Samples, window, rate, classifier, cache
//! - `tipwatch::node` - Node RPC and cursor interfaces

pub mod debounce;
pub mod error;
pub mod estimator;

// Re-export component crates
pub use tipwatch_core as core;
pub use tipwatch_node as node;

pub use error::{EstimatorError, Result};
pub use estimator::{Estimator, TickOutcome};

// Re-export commonly used core types
pub use tipwatch_core::{
    Clock, EstimatorConfig, ManualClock, NodeUrl, ProgressTick, RawTick, Sample, SyncStatus,
    SystemClock,
};
