// src/engage/mod.rs

//! Engagement controller for holdgate.
//!
//! This module ties together:
//! - the signal tracker's edge output
//! - the per-engagement tick timer and its budget
//! - the notification sink (start / tick / complete)
//! - the main reactor event loop that reacts to:
//!   - signal begin/end events
//!   - timer ticks
//!   - shutdown requests
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`reactor`].

use std::fmt;
use std::time::Duration;

use crate::signal::Signal;

/// Default number of ticks forwarded per engagement before auto-completion.
pub const DEFAULT_TICK_BUDGET: u32 = 3;

/// Identity of a single engagement, allocated monotonically and never
/// reused. Timer ticks carry the id their ticker was started for, so a
/// straggling tick from a disposed timer is never mistaken for a tick of a
/// newer engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngagementId(pub u64);

impl fmt::Display for EngagementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reactor options used by both the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct ReactorOptions {
    /// Ticks forwarded per engagement before the engagement auto-completes.
    pub tick_budget: u32,
    /// Interval the production timer backend ticks at.
    pub tick_interval: Duration,
}

impl Default for ReactorOptions {
    fn default() -> Self {
        Self {
            tick_budget: DEFAULT_TICK_BUDGET,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Events flowing into the reactor from input sources and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorEvent {
    /// An input signal reported a `begin` transition.
    SignalBegan { signal: Signal },
    /// An input signal reported an `end` transition.
    SignalEnded { signal: Signal },
    /// The timer started for `engagement` produced a tick.
    TimerTicked { engagement: EngagementId },
    /// Graceful shutdown requested by the embedder.
    ShutdownRequested,
}

pub mod core;
pub mod handlers;
pub mod reactor;

pub use self::core::CoreReactor;
pub use self::handlers::{CoreCommand, CoreStep};
pub use self::reactor::{Reactor, ReactorHandle};
