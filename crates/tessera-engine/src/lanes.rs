//! Single-writer event lanes.
//!
//! Events are hashed by instrument id onto a fixed number of lanes. Each
//! lane is a bounded queue drained in order by one task, so every event for
//! a given instrument is applied by the same task in arrival order while
//! instruments on different lanes are processed in parallel.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tessera_traits::{InstrumentId, MarketEvent};

use crate::engine::PricingEngine;
use crate::error::{EngineError, EngineResult};

enum LaneCommand {
    Event(MarketEvent),
    Flush(oneshot::Sender<()>),
}

/// Routes events to per-instrument lanes.
pub struct LaneDispatcher {
    senders: Vec<mpsc::Sender<LaneCommand>>,
    handles: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for LaneDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaneDispatcher")
            .field("lanes", &self.senders.len())
            .finish()
    }
}

impl LaneDispatcher {
    /// Spawns the lane tasks using the engine's lane settings.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(engine: Arc<PricingEngine>) -> Self {
        let lanes = engine.config().lanes.max(1);
        let capacity = engine.config().lane_capacity.max(1);

        let mut senders = Vec::with_capacity(lanes);
        let mut handles = Vec::with_capacity(lanes);

        for lane in 0..lanes {
            let (tx, rx) = mpsc::channel(capacity);
            senders.push(tx);
            handles.push(tokio::spawn(run_lane(lane, engine.clone(), rx)));
        }

        info!("Started {} lanes (capacity {})", lanes, capacity);
        Self { senders, handles }
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.senders.len()
    }

    /// Lane that owns `instrument_id`.
    pub fn lane_for(&self, instrument_id: &InstrumentId) -> usize {
        lane_index(instrument_id.as_str(), self.senders.len())
    }

    /// Queues an event on its instrument's lane.
    ///
    /// Waits while the lane's queue is full.
    pub async fn dispatch(&self, event: MarketEvent) -> EngineResult<()> {
        let lane = self.lane_for(event.instrument_id());
        self.senders[lane]
            .send(LaneCommand::Event(event))
            .await
            .map_err(|_| EngineError::LaneClosed(format!("lane {lane}")))
    }

    /// Waits until every event queued so far has been applied.
    pub async fn flush(&self) -> EngineResult<()> {
        let mut pending = Vec::with_capacity(self.senders.len());
        for (lane, tx) in self.senders.iter().enumerate() {
            let (done_tx, done_rx) = oneshot::channel();
            tx.send(LaneCommand::Flush(done_tx))
                .await
                .map_err(|_| EngineError::LaneClosed(format!("lane {lane}")))?;
            pending.push((lane, done_rx));
        }
        for (lane, done_rx) in pending {
            done_rx
                .await
                .map_err(|_| EngineError::LaneClosed(format!("lane {lane}")))?;
        }
        Ok(())
    }

    /// Closes the lanes and waits for queued events to drain.
    pub async fn shutdown(self) {
        let Self { senders, handles } = self;
        drop(senders);
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Lane task failed: {}", e);
            }
        }
        info!("Lanes stopped");
    }
}

async fn run_lane(lane: usize, engine: Arc<PricingEngine>, mut rx: mpsc::Receiver<LaneCommand>) {
    debug!("Lane {} started", lane);
    while let Some(command) = rx.recv().await {
        match command {
            LaneCommand::Event(event) => {
                if let Err(e) = engine.process(&event).await {
                    warn!("Lane {} dropped event for {}: {}", lane, event.instrument_id(), e);
                }
            }
            LaneCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Lane {} stopped", lane);
}

/// Deterministic string hash, stable across runs and platforms.
fn lane_index(key: &str, lanes: usize) -> usize {
    let mut hash: u32 = 0;
    for byte in key.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    hash as usize % lanes.max(1)
}
