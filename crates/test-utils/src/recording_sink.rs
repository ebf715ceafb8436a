use std::sync::{Arc, Mutex};

use holdgate::sink::NotificationSink;

/// Everything a sink observed, in arrival order per category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recording {
    pub starts: u32,
    pub completions: u32,
    /// Zero-based index of every forwarded tick, in order.
    pub tick_indices: Vec<u32>,
}

/// A fake notification sink that records every call it receives.
///
/// The recording is shared behind `Arc<Mutex<_>>` so a test can keep a
/// [`RecordingHandle`] while the sink itself is moved into a reactor.
#[derive(Debug, Default)]
pub struct RecordingSink {
    shared: Arc<Mutex<Recording>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> RecordingHandle {
        RecordingHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl NotificationSink for RecordingSink {
    fn engagement_started(&mut self) {
        self.shared.lock().unwrap().starts += 1;
    }

    fn tick_forwarded(&mut self, index: u32) {
        self.shared.lock().unwrap().tick_indices.push(index);
    }

    fn engagement_completed(&mut self) {
        self.shared.lock().unwrap().completions += 1;
    }
}

/// Read-side view of a [`RecordingSink`].
#[derive(Debug, Clone)]
pub struct RecordingHandle {
    shared: Arc<Mutex<Recording>>,
}

impl RecordingHandle {
    pub fn snapshot(&self) -> Recording {
        self.shared.lock().unwrap().clone()
    }

    pub fn starts(&self) -> u32 {
        self.shared.lock().unwrap().starts
    }

    pub fn completions(&self) -> u32 {
        self.shared.lock().unwrap().completions
    }

    pub fn ticks(&self) -> u32 {
        self.shared.lock().unwrap().tick_indices.len() as u32
    }

    pub fn tick_indices(&self) -> Vec<u32> {
        self.shared.lock().unwrap().tick_indices.clone()
    }
}
