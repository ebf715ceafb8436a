// src/engage/core.rs

//! Pure core reactor state machine.
//!
//! This module contains a synchronous, deterministic "core reactor" that
//! consumes [`ReactorEvent`]s and produces:
//! - an updated engagement state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engage::reactor::Reactor`) is responsible for:
//! - reading events from channels
//! - starting/stopping the tick timer
//! - delivering notifications to the sink
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels or timers.

use crate::engage::handlers::{handle_edge, handle_timer_tick, CoreCommand, CoreStep};
use crate::engage::{EngagementId, ReactorEvent, ReactorOptions};
use crate::signal::SignalTracker;

/// State of the single allowed engagement.
///
/// `Engaged` exists if and only if exactly one timer subscription is open on
/// the shell side; the pairing is maintained by emitting `StartTimer` and
/// `StopTimer` commands on exactly the transitions in [`handle_edge`] and
/// [`handle_timer_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementState {
    Idle,
    Engaged {
        id: EngagementId,
        /// Ticks forwarded to the sink so far; never exceeds the budget.
        forwarded: u32,
    },
}

/// Pure core reactor state.
///
/// This owns:
/// - the signal tracker
/// - the engagement state (id + forwarded tick count)
/// - reactor options (tick budget)
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreReactor {
    tracker: SignalTracker,
    engagement: EngagementState,
    next_engagement: u64,
    options: ReactorOptions,
}

impl CoreReactor {
    pub fn new(options: ReactorOptions) -> Self {
        Self {
            tracker: SignalTracker::new(),
            engagement: EngagementState::Idle,
            next_engagement: 1,
            options,
        }
    }

    /// Expose whether an engagement is open (for tests).
    pub fn is_engaged(&self) -> bool {
        matches!(self.engagement, EngagementState::Engaged { .. })
    }

    /// Id of the currently open engagement, if any (for tests).
    pub fn current_engagement(&self) -> Option<EngagementId> {
        match self.engagement {
            EngagementState::Engaged { id, .. } => Some(id),
            EngagementState::Idle => None,
        }
    }

    /// Handle a single reactor event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: ReactorEvent) -> CoreStep {
        match event {
            ReactorEvent::SignalBegan { signal } => {
                let edge = self.tracker.begin(signal);
                handle_edge(&mut self.engagement, &mut self.next_engagement, edge)
            }
            ReactorEvent::SignalEnded { signal } => {
                let edge = self.tracker.end(signal);
                handle_edge(&mut self.engagement, &mut self.next_engagement, edge)
            }
            ReactorEvent::TimerTicked { engagement } => {
                handle_timer_tick(&mut self.engagement, self.options.tick_budget, engagement)
            }
            ReactorEvent::ShutdownRequested => {
                let mut commands = Vec::new();
                // Teardown is not a completion: stop the timer but do not
                // notify the sink.
                if let EngagementState::Engaged { id, .. } = self.engagement {
                    commands.push(CoreCommand::StopTimer(id));
                    self.engagement = EngagementState::Idle;
                }
                CoreStep {
                    commands,
                    keep_running: false,
                }
            }
        }
    }
}
