//! Telemetry sink seam.
//!
//! Callers construct [`TelemetryEvent`]s and hand them to a sink; the sink
//! owns transport. Emission is fire-and-forget: no sink method returns a
//! result, and callers never block on delivery.

use std::sync::Mutex;

use sqltools_types::TelemetryEvent;
use tracing::info;

/// Destination for telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Record one event. Must not block or fail.
    fn track(&self, event: TelemetryEvent);
}

/// Sink that writes events to the `tracing` pipeline at info level.
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn track(&self, event: TelemetryEvent) {
        let properties = event.properties();
        info!(event = event.name(), ?properties, "telemetry");
    }
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn track(&self, _event: TelemetryEvent) {}
}

/// Sink that retains events in memory for inspection; used by tests and
/// previews without external side effects.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything tracked so far, in emission order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("telemetry lock poisoned").clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn track(&self, event: TelemetryEvent) {
        self.events.lock().expect("telemetry lock poisoned").push(event);
    }
}
