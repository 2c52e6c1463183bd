//! # drape-telemetry
//!
//! Event bus for simulation telemetry. The simulation loop's per-frame
//! reports are turned into structured events (frame timing, landings,
//! self-collision activity, energy, grab state) and dispatched to
//! pluggable sinks: `tracing` logs, JSON lines, or an in-memory buffer.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
