//! Simulation event types.
//!
//! Lightweight value types, one per notable thing that happened during a
//! rendered frame.

use serde::{Deserialize, Serialize};

/// A simulation event tagged with the frame that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame index (0-indexed).
    pub frame: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulation clock at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
        substeps: u32,
    },

    /// Self-collision moved points during the frame.
    SelfCollision {
        /// Point corrections summed over substeps.
        corrections: u32,
    },

    /// Points reached the floor and were pinned.
    PointsLanded {
        count: u32,
        /// Pinned points in the whole cloth after the frame.
        total_pinned: u32,
    },

    /// Energy snapshot after the frame.
    Energy {
        /// `0.5 · m · |v|²` over free points, with per-substep velocities.
        kinetic: f64,
    },

    /// Grab state changed.
    Grab {
        /// Grabbed point, or `None` after a release.
        index: Option<usize>,
    },
}

impl SimulationEvent {
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short snake_case name of the payload variant.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::SelfCollision { .. } => "self_collision",
            EventKind::PointsLanded { .. } => "points_landed",
            EventKind::Energy { .. } => "energy",
            EventKind::Grab { .. } => "grab",
        }
    }

    /// Per-frame bookkeeping events, as opposed to state changes.
    pub fn is_routine(&self) -> bool {
        matches!(
            self.kind,
            EventKind::FrameBegin { .. } | EventKind::FrameEnd { .. } | EventKind::Energy { .. }
        )
    }
}
