//! Event sink that records everything it receives

use parking_lot::Mutex;
use warden_core::{AdapterEvent, EventSink};

/// Records events in emission order
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<AdapterEvent>>,
}

impl RecordingEventSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<AdapterEvent> {
        self.events.lock().clone()
    }

    /// Drop recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: AdapterEvent) {
        self.events.lock().push(event);
    }
}
