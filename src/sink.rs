// src/sink.rs

//! Notification sink: the external observer of engagement lifecycle events.
//!
//! The contract is the ordering and cardinality of the three event kinds,
//! not the mechanism: per engagement, `engagement_started` fires once, each
//! forwarded tick carries a strictly increasing zero-based index, and
//! `engagement_completed` fires exactly once. All calls are fire-and-forget.

use tracing::info;

/// A single lifecycle notification, as carried in core commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    EngagementStarted,
    TickForwarded { index: u32 },
    EngagementCompleted,
}

impl Notification {
    /// Dispatch this notification to the matching sink method.
    pub fn deliver<S: NotificationSink + ?Sized>(self, sink: &mut S) {
        match self {
            Notification::EngagementStarted => sink.engagement_started(),
            Notification::TickForwarded { index } => sink.tick_forwarded(index),
            Notification::EngagementCompleted => sink.engagement_completed(),
        }
    }
}

/// Trait abstracting the consumer of engagement notifications.
///
/// Production code can use [`LoggingSink`] or its own implementation
/// (rendering, business actions); tests record the calls.
pub trait NotificationSink: Send {
    /// Both signals became concurrently active; an engagement opened.
    fn engagement_started(&mut self);

    /// A tick was forwarded within the open engagement. Indices are
    /// zero-based and strictly increasing within one engagement.
    fn tick_forwarded(&mut self, index: u32);

    /// The engagement closed, either by a signal ending or by the tick
    /// budget being exhausted. Fires exactly once per engagement.
    fn engagement_completed(&mut self);
}

/// Sink that just logs every notification at info level.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl NotificationSink for LoggingSink {
    fn engagement_started(&mut self) {
        info!("engagement started");
    }

    fn tick_forwarded(&mut self, index: u32) {
        info!(index, "engagement tick");
    }

    fn engagement_completed(&mut self) {
        info!("engagement completed");
    }
}
