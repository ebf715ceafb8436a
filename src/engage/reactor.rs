// src/engage/reactor.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::signal::Signal;
use crate::sink::NotificationSink;
use crate::timer::TimerBackend;

use super::core::CoreReactor;
use super::{CoreCommand, ReactorEvent};

/// Drives the engagement state machine in response to `ReactorEvent`s,
/// and delegates timer management and notification delivery to the injected
/// backends.
///
/// This is a pure IO shell around `CoreReactor`, which contains all the
/// engagement semantics. This struct handles async IO: reading events from
/// the channel, starting/stopping timers and calling the sink.
pub struct Reactor<T: TimerBackend, S: NotificationSink> {
    core: CoreReactor,
    event_rx: mpsc::Receiver<ReactorEvent>,
    timers: T,
    sink: S,
}

impl<T: TimerBackend, S: NotificationSink> fmt::Debug for Reactor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactor")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<T: TimerBackend, S: NotificationSink> Reactor<T, S> {
    pub fn new(
        core: CoreReactor,
        event_rx: mpsc::Receiver<ReactorEvent>,
        timers: T,
        sink: S,
    ) -> Self {
        Self {
            core,
            event_rx,
            timers,
            sink,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `ReactorEvent`s from `event_rx`, one at a time; events are
    ///   strictly ordered by arrival, which is what makes the disengage vs
    ///   budget-exhaustion tie-break well defined.
    /// - Feeds them into the pure core.
    /// - Executes the commands returned by the core (timers, notifications).
    pub async fn run(mut self) -> Result<()> {
        info!("holdgate reactor started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("reactor event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "reactor received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command)?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping reactor");
                break;
            }
        }

        info!("reactor exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartTimer(engagement) => self.timers.start(engagement),
            CoreCommand::StopTimer(engagement) => self.timers.stop(engagement),
            CoreCommand::Notify(notification) => {
                notification.deliver(&mut self.sink);
                Ok(())
            }
        }
    }
}

/// Cloneable sender-side handle for delivering signal events to a running
/// reactor.
#[derive(Debug, Clone)]
pub struct ReactorHandle {
    event_tx: mpsc::Sender<ReactorEvent>,
}

impl ReactorHandle {
    pub fn new(event_tx: mpsc::Sender<ReactorEvent>) -> Self {
        Self { event_tx }
    }

    /// Deliver a `begin` transition for `signal`.
    pub async fn begin(&self, signal: Signal) -> Result<()> {
        self.event_tx
            .send(ReactorEvent::SignalBegan { signal })
            .await?;
        Ok(())
    }

    /// Deliver an `end` transition for `signal`.
    pub async fn end(&self, signal: Signal) -> Result<()> {
        self.event_tx
            .send(ReactorEvent::SignalEnded { signal })
            .await?;
        Ok(())
    }

    /// Request a graceful shutdown of the reactor loop.
    pub async fn shutdown(&self) -> Result<()> {
        self.event_tx.send(ReactorEvent::ShutdownRequested).await?;
        Ok(())
    }
}
