use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::sync::mpsc;

use holdgate::engage::{EngagementId, ReactorEvent};
use holdgate::errors::Result;
use holdgate::timer::TimerBackend;

#[derive(Debug, Default)]
struct ManualTimerState {
    created: u32,
    stopped: u32,
    running: Option<EngagementId>,
}

/// A fake timer backend that:
/// - records how many timers were created and stopped
/// - fires ticks only when the test asks for them (via [`ManualTimerHandle`])
///
/// This is the analogue of `RecordingSink` on the timer side: the backend is
/// moved into a reactor, the handle stays with the test.
#[derive(Debug)]
pub struct ManualTimerBackend {
    event_tx: mpsc::Sender<ReactorEvent>,
    state: Arc<Mutex<ManualTimerState>>,
}

impl ManualTimerBackend {
    pub fn new(event_tx: mpsc::Sender<ReactorEvent>) -> Self {
        Self {
            event_tx,
            state: Arc::new(Mutex::new(ManualTimerState::default())),
        }
    }

    pub fn handle(&self) -> ManualTimerHandle {
        ManualTimerHandle {
            event_tx: self.event_tx.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl TimerBackend for ManualTimerBackend {
    fn start(&mut self, engagement: EngagementId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.created += 1;
        state.running = Some(engagement);
        Ok(())
    }

    fn stop(&mut self, engagement: EngagementId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.running == Some(engagement) {
            state.running = None;
            state.stopped += 1;
        }
        Ok(())
    }
}

/// Test-side handle for a [`ManualTimerBackend`].
#[derive(Debug, Clone)]
pub struct ManualTimerHandle {
    event_tx: mpsc::Sender<ReactorEvent>,
    state: Arc<Mutex<ManualTimerState>>,
}

impl ManualTimerHandle {
    pub fn created(&self) -> u32 {
        self.state.lock().unwrap().created
    }

    pub fn stopped(&self) -> u32 {
        self.state.lock().unwrap().stopped
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().unwrap().running.is_some()
    }

    /// Fire one tick of the currently running timer into the reactor.
    pub async fn fire_tick(&self) -> anyhow::Result<()> {
        let engagement = self
            .state
            .lock()
            .unwrap()
            .running
            .ok_or_else(|| anyhow!("no timer running"))?;
        self.fire_tick_as(engagement).await
    }

    /// Fire a tick tagged with an arbitrary engagement id (for exercising
    /// stale-delivery handling).
    pub async fn fire_tick_as(&self, engagement: EngagementId) -> anyhow::Result<()> {
        self.event_tx
            .send(ReactorEvent::TimerTicked { engagement })
            .await
            .map_err(|_| anyhow!("reactor event channel closed"))?;
        Ok(())
    }
}
