// src/lib.rs

//! holdgate: a two-signal engagement reactor.
//!
//! Tracks the liveness of two independent begin/end input signals (primary,
//! secondary) and, while both are concurrently active, drives a bounded
//! timer-driven tick sequence: the engagement starts on the edge where both
//! signals become active, forwards up to three ticks to a notification sink,
//! and completes exactly once, either when a signal ends early or when the
//! tick budget is exhausted.
//!
//! The engagement semantics live in a pure, synchronous core
//! ([`engage::CoreReactor`]); [`spawn_reactor`] wraps it in an async shell
//! wired to a Tokio interval timer.

pub mod engage;
pub mod errors;
pub mod logging;
pub mod signal;
pub mod sink;
pub mod timer;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engage::{CoreReactor, Reactor, ReactorEvent, ReactorHandle, ReactorOptions};
use crate::errors::Result;
use crate::sink::NotificationSink;
use crate::timer::TokioTimerBackend;

/// High-level entry point.
///
/// This wires together:
/// - the reactor event channel
/// - the pure core state machine (single source of truth for semantics)
/// - the production Tokio interval timer backend
/// - the caller's notification sink
///
/// and spawns the reactor loop, returning a [`ReactorHandle`] for delivering
/// signal events plus the join handle of the loop task.
pub fn spawn_reactor<S>(
    options: ReactorOptions,
    sink: S,
) -> (ReactorHandle, JoinHandle<Result<()>>)
where
    S: NotificationSink + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel::<ReactorEvent>(64);

    let timers = TokioTimerBackend::new(event_tx.clone(), options.tick_interval);
    let core = CoreReactor::new(options);
    let reactor = Reactor::new(core, event_rx, timers, sink);

    let join = tokio::spawn(reactor.run());

    (ReactorHandle::new(event_tx), join)
}
