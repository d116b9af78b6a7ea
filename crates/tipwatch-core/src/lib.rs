//! # Tipwatch Core
//!
//! Pure primitives for estimating blockchain sync progress: samples, the
//! sampling window, the index-rate calculator, the sync-status classifier,
//! and the estimation cache.
//!
//! This crate contains no I/O, no async, and no wall-clock reads. Every
//! operation takes the current time as an argument, so callers drive time
//! through a [`Clock`].
//!
//! ## Key Types
//!
//! - [`Sample`] - One immutable observation of sync progress
//! - [`SampleWindow`] - Recent samples for the active node, pruned by horizon
//! - [`SyncStatus`] - `NotStarted`, `Pending`, `Syncing`, `Completed`
//! - [`EstimationCache`] - Debounced view of the current estimate
//! - [`EstimatorConfig`] - Thresholds for all of the above
//!
//! ## Flow
//!
//! ```text
//! RawTick --parse--> ProgressTick --+
//!                                   +--> classify --> Sample --> SampleWindow::push
//! TipHeader + BestKnownBlock -------+
//! ```

pub mod cache;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod rate;
pub mod sample;
pub mod tick;
pub mod types;
pub mod window;

pub use cache::EstimationCache;
pub use classify::{classify, Observation};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EstimatorConfig;
pub use error::{ConfigError, TickError};
pub use rate::average_index_rate;
pub use sample::Sample;
pub use tick::{ProgressTick, RawTick, TipNumber};
pub use types::{BestKnownBlock, NodeUrl, SyncStatus, TipHeader};
pub use window::SampleWindow;
