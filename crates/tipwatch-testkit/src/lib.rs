//! # Tipwatch Testkit
//!
//! Testing utilities for tipwatch.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenario vectors**: Named tick sequences with the status and estimate they must produce
//! - **Generators**: Proptest strategies for ticks and progress series
//! - **Fixtures**: A harness wiring an estimator to an in-memory node and a manual clock
//!
//! ## Scenario Vectors
//!
//! ```rust
//! use tipwatch_testkit::vectors::{all_scenarios, replay};
//!
//! for scenario in all_scenarios() {
//!     let samples = replay(&scenario);
//!     let last = samples.last().unwrap();
//!     assert_eq!(last.status, scenario.expected_status, "{}", scenario.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tipwatch_testkit::generators::progress_series;
//!
//! proptest! {
//!     #[test]
//!     fn window_stays_within_horizon(steps in progress_series(32)) {
//!         // replay and check the window
//!     }
//! }
//! ```
//!
//! ## Harness
//!
//! ```rust,no_run
//! use tipwatch_testkit::fixtures::Harness;
//!
//! async fn example() {
//!     let harness = Harness::new();
//!     harness.set_chain(1_000, 0);
//!     let outcome = harness.tick(100, 90).await.unwrap();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{Harness, HARNESS_EPOCH};
pub use generators::{progress_series, raw_tick, Step};
pub use vectors::{all_scenarios, replay, verify_all_scenarios, Scenario};
