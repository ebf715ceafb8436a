// src/engage/handlers.rs

//! Event handling logic for the core reactor.

use tracing::debug;

use crate::engage::core::EngagementState;
use crate::engage::EngagementId;
use crate::signal::Edge;
use crate::sink::Notification;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    /// Start a fresh tick timer for this engagement.
    StartTimer(EngagementId),
    /// Stop and dispose the timer of this engagement.
    StopTimer(EngagementId),
    /// Deliver this notification to the sink.
    Notify(Notification),
}

/// Decision returned by the core after handling a single `ReactorEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer reactor loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn noop() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

/// Handle an [`Edge`] reported by the signal tracker.
///
/// - `BothActive` while idle opens a new engagement: allocate an id, start
///   its timer, notify the sink that the engagement started.
/// - `Disengaged` while engaged completes the engagement early. While idle
///   it is a no-op: the engagement already completed via its tick budget,
///   and completion must not fire twice.
/// - `None` is ignored.
pub fn handle_edge(
    state: &mut EngagementState,
    next_engagement: &mut u64,
    edge: Edge,
) -> CoreStep {
    let mut step = CoreStep::noop();

    match edge {
        Edge::None => {}
        Edge::BothActive => match *state {
            EngagementState::Idle => {
                let id = EngagementId(*next_engagement);
                *next_engagement += 1;
                *state = EngagementState::Engaged { id, forwarded: 0 };

                debug!(engagement = %id, "both signals active; engagement started");
                step.commands.push(CoreCommand::StartTimer(id));
                step.commands
                    .push(CoreCommand::Notify(Notification::EngagementStarted));
            }
            EngagementState::Engaged { id, .. } => {
                // The tracker only reports this edge from a not-both-active
                // state, so this should not occur; ignore it rather than
                // restart the timer mid-engagement.
                debug!(engagement = %id, "both-active edge while engaged; ignored");
            }
        },
        Edge::Disengaged => match *state {
            EngagementState::Engaged { id, .. } => {
                *state = EngagementState::Idle;

                debug!(engagement = %id, "signal ended mid-engagement; completing");
                step.commands.push(CoreCommand::StopTimer(id));
                step.commands
                    .push(CoreCommand::Notify(Notification::EngagementCompleted));
            }
            EngagementState::Idle => {
                // Engagement already completed (tick budget exhausted).
            }
        },
    }

    step
}

/// Handle a tick delivered by the timer started for `engagement`.
///
/// While the pre-increment forwarded count is under `tick_budget`, the tick
/// is forwarded to the sink with its zero-based index. The first tick past
/// the budget is not forwarded; it converts into the single completion
/// notification and disposes the timer.
///
/// Ticks whose id does not match the open engagement (or that arrive while
/// idle) are stale deliveries from an already-disposed timer and are
/// silently discarded.
pub fn handle_timer_tick(
    state: &mut EngagementState,
    tick_budget: u32,
    engagement: EngagementId,
) -> CoreStep {
    let mut step = CoreStep::noop();

    match state {
        EngagementState::Engaged { id, forwarded } if *id == engagement => {
            if *forwarded < tick_budget {
                let index = *forwarded;
                *forwarded += 1;
                step.commands
                    .push(CoreCommand::Notify(Notification::TickForwarded { index }));
            } else {
                let id = *id;
                *state = EngagementState::Idle;

                debug!(engagement = %id, "tick budget exhausted; completing");
                step.commands.push(CoreCommand::StopTimer(id));
                step.commands
                    .push(CoreCommand::Notify(Notification::EngagementCompleted));
            }
        }
        _ => {
            debug!(engagement = %engagement, "discarding stale timer tick");
        }
    }

    step
}
