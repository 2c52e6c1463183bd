//! Pluggable event sinks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// The buffer is shared, so a handle obtained from [`VecSink::events`]
/// still reads the events after the sink is boxed into a bus.
#[derive(Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected events.
    pub fn events(&self) -> Arc<Mutex<Vec<SimulationEvent>>> {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Routine per-frame events go out at `routine_level`; state changes
/// (landings, grabs, self-collision) always at `INFO` or above.
pub struct TracingSink {
    routine_level: Level,
}

impl TracingSink {
    pub fn new(routine_level: Level) -> Self {
        Self { routine_level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        // Lower levels are more severe.
        let level = if event.is_routine() {
            self.routine_level
        } else {
            Level::INFO.min(self.routine_level)
        };
        let (frame, name) = (event.frame, event.name());
        // `tracing` macros need a constant level.
        if level == Level::TRACE {
            tracing::trace!(frame, event = ?event.kind, "{name}");
        } else if level == Level::DEBUG {
            tracing::debug!(frame, event = ?event.kind, "{name}");
        } else if level == Level::INFO {
            tracing::info!(frame, event = ?event.kind, "{name}");
        } else if level == Level::WARN {
            tracing::warn!(frame, event = ?event.kind, "{name}");
        } else {
            tracing::error!(frame, event = ?event.kind, "{name}");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    failed: bool,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, failed: false }
    }

    /// Recover the writer, e.g. to inspect a buffer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &SimulationEvent) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            // Report once, then stop writing.
            tracing::warn!(error = %e, "json event sink disabled");
            self.failed = true;
        }
    }

    fn finalize(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "failed to flush json event sink");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
