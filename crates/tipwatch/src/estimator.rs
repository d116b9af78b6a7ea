//! The Sync Estimator: event handling around the core computation.
//!
//! All mutation happens inside two handlers, [`Estimator::on_tick`] and
//! [`Estimator::reset`]. Both take the state lock only for the commit, never
//! across node I/O, so a reset lands while a tick is still waiting on the
//! node. A tick whose node is no longer active when its queries return is
//! discarded instead of committed.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tracing::{debug, info, warn};

use tipwatch_core::{
    classify, BestKnownBlock, Clock, EstimationCache, EstimatorConfig, NodeUrl, Observation,
    RawTick, Sample, SampleWindow, SyncStatus, SystemClock,
};
use tipwatch_node::{CursorSink, NodeRpc};

use crate::debounce;
use crate::error::Result;

/// What became of a progress tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The tick produced a sample that is now in the window.
    Recorded(Arc<Sample>),
    /// The active node changed while the tick was querying its node.
    Discarded {
        /// The node the tick's queries were issued against.
        issued_for: NodeUrl,
    },
}

impl TickOutcome {
    /// The recorded sample, if any.
    pub fn sample(&self) -> Option<&Arc<Sample>> {
        match self {
            TickOutcome::Recorded(sample) => Some(sample),
            TickOutcome::Discarded { .. } => None,
        }
    }
}

struct EstimatorState {
    window: SampleWindow,
    cache: EstimationCache,
}

/// Estimates sync progress for the active node.
///
/// Constructed once by whatever composes the application and shared by
/// reference (or `Arc`). The active node is read from a `watch` channel
/// owned by the network configuration; every committed sample is
/// broadcast to subscribers in commit order.
pub struct Estimator<R: NodeRpc, C: Clock = SystemClock> {
    rpc: R,
    clock: C,
    config: EstimatorConfig,
    active: watch::Receiver<NodeUrl>,
    state: Mutex<EstimatorState>,
    publisher: broadcast::Sender<Arc<Sample>>,
    cursor: Option<Box<dyn CursorSink>>,
}

impl<R: NodeRpc> Estimator<R, SystemClock> {
    /// Create an estimator reading wall-clock time.
    pub fn with_system_clock(
        rpc: R,
        active: watch::Receiver<NodeUrl>,
        config: EstimatorConfig,
    ) -> Result<Self> {
        Self::new(rpc, SystemClock, active, config)
    }
}

impl<R: NodeRpc, C: Clock> Estimator<R, C> {
    /// Create an estimator with an empty window.
    ///
    /// Fails if the configuration is inconsistent.
    pub fn new(
        rpc: R,
        clock: C,
        active: watch::Receiver<NodeUrl>,
        config: EstimatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (publisher, _) = broadcast::channel(config.publish_capacity);

        Ok(Self {
            rpc,
            clock,
            state: Mutex::new(EstimatorState {
                window: SampleWindow::new(config.sample_horizon_ms),
                cache: EstimationCache::new(),
            }),
            config,
            active,
            publisher,
            cursor: None,
        })
    }

    /// Forward the cache tip of every committed tick to `cursor`.
    pub fn with_cursor(mut self, cursor: impl CursorSink + 'static) -> Self {
        self.cursor = Some(Box::new(cursor));
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// The node currently announced as active.
    pub fn active_node(&self) -> NodeUrl {
        self.active.borrow().clone()
    }

    /// Subscribe to every sample committed from now on, bootstrap samples included.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Sample>> {
        self.publisher.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle one progress tick.
    ///
    /// Malformed input and tip-header failures abort the tick before
    /// anything is committed. A failing best-known query falls back to the
    /// tip header.
    pub async fn on_tick(&self, raw: &RawTick) -> Result<TickOutcome> {
        let tick = raw.parse()?;
        let node = self.active_node();

        let tip_header = self.rpc.get_tip_header(&node).await?;
        let best_known = match self.rpc.get_best_known_sync(&node).await {
            Ok(best_known) => best_known,
            Err(e) => {
                debug!(%node, error = %e, "best-known query failed, using tip header");
                BestKnownBlock::from(tip_header)
            }
        };

        let observation = Observation {
            node,
            tick,
            tip_header,
            best_known,
        };

        let sample = {
            let mut state = self.state.lock().await;

            if *self.active.borrow() != observation.node {
                debug!(issued_for = %observation.node, "active node changed, discarding tick");
                return Ok(TickOutcome::Discarded {
                    issued_for: observation.node,
                });
            }

            let now = self.clock.now_millis();
            let previous = state.window.status();
            let sample = classify(&state.window, &observation, now, &self.config);
            let sample = state.window.push(sample, now);

            if previous != sample.status {
                info!(node = %sample.node, from = %previous, to = %sample.status, "sync status changed");
            }
            debug!(
                indexer_tip = sample.indexer_tip,
                cache_tip = sample.cache_tip,
                best_known_tip = sample.best_known_tip,
                status = %sample.status,
                estimate = ?sample.estimate,
                "recorded sample"
            );

            self.publish(&sample);
            sample
        };

        if let Some(cursor) = &self.cursor {
            if let Err(e) = cursor.save_synced_block(sample.cache_tip).await {
                warn!(height = sample.cache_tip, error = %e, "failed to save synced block");
            }
        }

        Ok(TickOutcome::Recorded(sample))
    }

    /// Handle a node change: restart the window for `node`.
    ///
    /// Immediate and idempotent. Publishes the bootstrap sample.
    pub async fn reset(&self, node: NodeUrl) -> Arc<Sample> {
        let mut state = self.state.lock().await;
        let bootstrap = state.window.reset(node);
        state.cache.clear();

        info!(node = %bootstrap.node, "node changed, sync estimate reset");
        self.publish(&bootstrap);
        bootstrap
    }

    fn publish(&self, sample: &Arc<Sample>) {
        // No subscribers is fine
        let _ = self.publisher.send(Arc::clone(sample));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Status of the newest sample, or `NotStarted` when there is none.
    pub async fn sync_status(&self) -> SyncStatus {
        self.state.lock().await.window.status()
    }

    /// The debounced current estimate.
    ///
    /// Repeated calls between ticks return the same `Arc`. `None` only before
    /// the first tick or reset.
    pub async fn cached_estimation(&self) -> Option<Arc<Sample>> {
        let active = self.active_node();
        let now = self.clock.now_millis();
        let mut state = self.state.lock().await;
        let EstimatorState { window, cache } = &mut *state;
        cache.current(window, &active, now)
    }

    /// Fresh samples for the active node, oldest first.
    pub async fn samples(&self) -> Vec<Arc<Sample>> {
        let active = self.active_node();
        let now = self.clock.now_millis();
        let state = self.state.lock().await;
        state.window.samples_for(&active, now).cloned().collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Drive the estimator from a tick stream and the active-node channel.
    ///
    /// Ticks are handled one at a time; node changes are debounced by
    /// `node_change_debounce_ms` and applied concurrently with an in-flight
    /// tick. Returns when the tick stream closes or the node channel's
    /// sender is dropped.
    pub async fn run(&self, mut ticks: mpsc::Receiver<RawTick>) {
        let mut changes = self.active.clone();
        let quiet = self.config.node_change_debounce();

        let tick_loop = async {
            while let Some(raw) = ticks.recv().await {
                if let Err(e) = self.on_tick(&raw).await {
                    warn!(error = %e, "progress tick failed");
                }
            }
        };

        let node_loop = async {
            while let Ok(node) = debounce::next_change(&mut changes, quiet).await {
                self.reset(node).await;
            }
        };

        tokio::select! {
            _ = tick_loop => debug!("tick stream closed"),
            _ = node_loop => debug!("active node provider closed"),
        }
    }
}
