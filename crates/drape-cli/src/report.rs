//! Frame report → telemetry events.

use drape_cloth::ClothState;
use drape_solver::FrameReport;
use drape_telemetry::{EventKind, SimulationEvent};

/// Converts successive frame reports into events, remembering the grab
/// state so only changes are reported.
pub struct FrameEvents {
    dt: f64,
    last_grab: Option<usize>,
}

impl FrameEvents {
    pub fn new(dt: f32) -> Self {
        Self { dt: dt as f64, last_grab: None }
    }

    pub fn events_for(&mut self, report: &FrameReport, cloth: &ClothState) -> Vec<SimulationEvent> {
        let frame = report.frame;
        let mut events = vec![SimulationEvent::new(
            frame,
            EventKind::FrameBegin { sim_time: report.sim_time - self.dt },
        )];

        if report.self_collision_corrections > 0 {
            events.push(SimulationEvent::new(
                frame,
                EventKind::SelfCollision { corrections: report.self_collision_corrections },
            ));
        }
        if report.points_landed > 0 {
            let total_pinned = cloth.fixed().iter().filter(|f| **f).count() as u32;
            events.push(SimulationEvent::new(
                frame,
                EventKind::PointsLanded { count: report.points_landed, total_pinned },
            ));
        }
        if report.grabbed != self.last_grab {
            self.last_grab = report.grabbed;
            events.push(SimulationEvent::new(frame, EventKind::Grab { index: report.grabbed }));
        }

        events.push(SimulationEvent::new(
            frame,
            EventKind::Energy { kinetic: cloth.kinetic_energy() },
        ));
        events.push(SimulationEvent::new(
            frame,
            EventKind::FrameEnd { wall_time: report.wall_time, substeps: report.substeps },
        ));
        events
    }
}
