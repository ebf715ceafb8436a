// src/signal.rs

//! Liveness tracking for the two gated input signals.
//!
//! [`SignalTracker`] keeps one boolean per signal and classifies each
//! `begin`/`end` call as an [`Edge`]:
//! - `BothActive`: this call made the pair concurrently active
//! - `Disengaged`: this call broke an active pair
//! - `None`: everything else, including redundant repeats
//!
//! Edges are computed purely from the pre-call combined state and the
//! intended transition of the call. The tracker knows nothing about timers,
//! tick budgets or notifications; that separation keeps the transition logic
//! unit-testable without any runtime.

/// One of the two tracked begin/end input streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Primary,
    Secondary,
}

/// A combined-state transition of interest, as seen by a single
/// `begin`/`end` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// No transition of interest (includes redundant repeat events).
    None,
    /// Both signals became concurrently active as a result of this call.
    BothActive,
    /// One signal of an active pair just ended.
    Disengaged,
}

/// Liveness of the primary and secondary signal.
///
/// Redundant events (`begin` while already active, `end` while already
/// inactive) are absorbed as no-ops: the source is an external input device
/// whose delivery is not guaranteed to be strictly alternating.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalTracker {
    primary: bool,
    secondary: bool,
}

impl SignalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `signal` as active. Returns [`Edge::BothActive`] iff this call
    /// transitioned the signal inactive→active while the other signal was
    /// already active.
    pub fn begin(&mut self, signal: Signal) -> Edge {
        if self.is_active(signal) {
            return Edge::None;
        }
        *self.slot_mut(signal) = true;

        if self.other_active(signal) {
            Edge::BothActive
        } else {
            Edge::None
        }
    }

    /// Mark `signal` as inactive. Returns [`Edge::Disengaged`] iff this call
    /// transitioned the signal active→inactive while the other signal was
    /// active (i.e. it broke an active pair).
    pub fn end(&mut self, signal: Signal) -> Edge {
        if !self.is_active(signal) {
            return Edge::None;
        }
        *self.slot_mut(signal) = false;

        if self.other_active(signal) {
            Edge::Disengaged
        } else {
            Edge::None
        }
    }

    pub fn is_active(&self, signal: Signal) -> bool {
        match signal {
            Signal::Primary => self.primary,
            Signal::Secondary => self.secondary,
        }
    }

    pub fn both_active(&self) -> bool {
        self.primary && self.secondary
    }

    fn other_active(&self, signal: Signal) -> bool {
        match signal {
            Signal::Primary => self.secondary,
            Signal::Secondary => self.primary,
        }
    }

    fn slot_mut(&mut self, signal: Signal) -> &mut bool {
        match signal {
            Signal::Primary => &mut self.primary,
            Signal::Secondary => &mut self.secondary,
        }
    }
}
