// src/timer.rs

//! Pluggable tick timer abstraction.
//!
//! The reactor talks to a `TimerBackend` instead of spawning Tokio tasks
//! directly. This makes it easy to swap in a manually-fired timer in tests
//! while keeping the production interval timer here.
//!
//! - `TokioTimerBackend` is the default implementation: one spawned
//!   `tokio::time::interval` ticker task per engagement, which feeds
//!   `TimerTicked` events (tagged with the engagement id) back into the
//!   reactor's event channel until it is aborted.
//! - Tests can provide their own `TimerBackend` that records start/stop
//!   calls and fires ticks on demand.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engage::{EngagementId, ReactorEvent};
use crate::errors::Result;

/// Trait abstracting how per-engagement tick timers are created and
/// disposed.
///
/// The reactor calls `start` exactly once per engagement start and `stop`
/// exactly once per engagement completion; `stop` must be idempotent.
pub trait TimerBackend: Send {
    /// Create and start a fresh timer for this engagement.
    fn start(&mut self, engagement: EngagementId) -> Result<()>;

    /// Dispose the timer started for this engagement. A no-op if no such
    /// timer is running.
    fn stop(&mut self, engagement: EngagementId) -> Result<()>;
}

/// Real timer backend used in production.
///
/// `start` spawns a ticker task that sends one [`ReactorEvent::TimerTicked`]
/// per interval into the reactor's event channel; `stop` aborts it. A tick
/// that was already queued in the channel when the timer was stopped still
/// carries the old engagement id and is discarded by the core.
pub struct TokioTimerBackend {
    event_tx: mpsc::Sender<ReactorEvent>,
    interval: Duration,
    running: Option<(EngagementId, JoinHandle<()>)>,
}

impl TokioTimerBackend {
    pub fn new(event_tx: mpsc::Sender<ReactorEvent>, interval: Duration) -> Self {
        Self {
            event_tx,
            interval,
            running: None,
        }
    }
}

impl TimerBackend for TokioTimerBackend {
    fn start(&mut self, engagement: EngagementId) -> Result<()> {
        if let Some((old, handle)) = self.running.take() {
            // One timer per engagement; the core stops the previous timer
            // before starting a new one, so this should not occur.
            warn!(engagement = %old, "timer still running on start; aborting it");
            handle.abort();
        }

        let tx = self.event_tx.clone();
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a Tokio interval completes immediately; skip
            // it so ticks arrive one full interval after engagement start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx
                    .send(ReactorEvent::TimerTicked { engagement })
                    .await
                    .is_err()
                {
                    // Reactor gone; stop ticking.
                    break;
                }
            }
        });

        debug!(engagement = %engagement, ?interval, "tick timer started");
        self.running = Some((engagement, handle));
        Ok(())
    }

    fn stop(&mut self, engagement: EngagementId) -> Result<()> {
        match self.running.take() {
            Some((id, handle)) if id == engagement => {
                handle.abort();
                debug!(engagement = %engagement, "tick timer stopped");
            }
            Some(other) => {
                // A different engagement's timer is running; leave it alone.
                debug!(engagement = %engagement, "no matching timer to stop");
                self.running = Some(other);
            }
            None => {
                // Already stopped; disposal is idempotent.
            }
        }
        Ok(())
    }
}

impl Drop for TokioTimerBackend {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.running.take() {
            handle.abort();
        }
    }
}
