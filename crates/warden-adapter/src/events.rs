//! Event sink implementations

use tracing::info;
use warden_core::{AdapterEvent, EventSink};

/// Logs every event through `tracing` with its JSON rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: AdapterEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(target: "warden::events", event = event.name(), %payload, "Adapter event"),
            Err(err) => info!(target: "warden::events", event = event.name(), error = %err, "Adapter event"),
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: AdapterEvent) {}
}
