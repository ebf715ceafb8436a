use holdgate::engage::{CoreCommand, CoreReactor, EngagementId, ReactorEvent, ReactorOptions};
use holdgate::signal::Signal;

use crate::recording_sink::{Recording, RecordingHandle, RecordingSink};

/// Synchronous driver for the pure core reactor.
///
/// Plays the role of the IO shell without any async machinery: it executes
/// the core's commands against an in-memory timer record and a
/// [`RecordingSink`], so scenario tests read as a flat list of input events
/// followed by assertions on cumulative counts.
pub struct CoreHarness {
    core: CoreReactor,
    sink: RecordingSink,
    recording: RecordingHandle,
    timers_created: u32,
    timers_stopped: u32,
    running: Option<EngagementId>,
}

impl CoreHarness {
    pub fn new() -> Self {
        Self::with_options(ReactorOptions::default())
    }

    pub fn with_options(options: ReactorOptions) -> Self {
        let sink = RecordingSink::new();
        let recording = sink.handle();
        Self {
            core: CoreReactor::new(options),
            sink,
            recording,
            timers_created: 0,
            timers_stopped: 0,
            running: None,
        }
    }

    pub fn begin_primary(&mut self) {
        self.apply(ReactorEvent::SignalBegan {
            signal: Signal::Primary,
        });
    }

    pub fn end_primary(&mut self) {
        self.apply(ReactorEvent::SignalEnded {
            signal: Signal::Primary,
        });
    }

    pub fn begin_secondary(&mut self) {
        self.apply(ReactorEvent::SignalBegan {
            signal: Signal::Secondary,
        });
    }

    pub fn end_secondary(&mut self) {
        self.apply(ReactorEvent::SignalEnded {
            signal: Signal::Secondary,
        });
    }

    /// Fire one tick of the currently running timer.
    ///
    /// Panics if no timer is running; use [`CoreHarness::tick_as`] to
    /// simulate a stale delivery.
    pub fn tick(&mut self) {
        let engagement = self.running.expect("tick fired with no running timer");
        self.apply(ReactorEvent::TimerTicked { engagement });
    }

    /// Fire a tick tagged with an arbitrary engagement id.
    pub fn tick_as(&mut self, engagement: EngagementId) {
        self.apply(ReactorEvent::TimerTicked { engagement });
    }

    /// Deliver a shutdown request; returns whether the loop would keep
    /// running (always false).
    pub fn shutdown(&mut self) -> bool {
        self.apply(ReactorEvent::ShutdownRequested)
    }

    fn apply(&mut self, event: ReactorEvent) -> bool {
        let step = self.core.step(event);
        for command in &step.commands {
            match *command {
                CoreCommand::StartTimer(id) => {
                    self.timers_created += 1;
                    self.running = Some(id);
                }
                CoreCommand::StopTimer(id) => {
                    if self.running == Some(id) {
                        self.running = None;
                        self.timers_stopped += 1;
                    }
                }
                CoreCommand::Notify(notification) => notification.deliver(&mut self.sink),
            }
        }
        step.keep_running
    }

    pub fn snapshot(&self) -> Recording {
        self.recording.snapshot()
    }

    pub fn starts(&self) -> u32 {
        self.recording.starts()
    }

    pub fn ticks(&self) -> u32 {
        self.recording.ticks()
    }

    pub fn completions(&self) -> u32 {
        self.recording.completions()
    }

    pub fn tick_indices(&self) -> Vec<u32> {
        self.recording.tick_indices()
    }

    pub fn timers_created(&self) -> u32 {
        self.timers_created
    }

    pub fn timers_stopped(&self) -> u32 {
        self.timers_stopped
    }

    pub fn timer_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_engaged(&self) -> bool {
        self.core.is_engaged()
    }
}

impl Default for CoreHarness {
    fn default() -> Self {
        Self::new()
    }
}
