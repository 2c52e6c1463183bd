//! The per-frame simulation loop.
//!
//! One call to [`SimulationLoop::step_frame`] advances the cloth by one
//! rendered frame of `dt` seconds, split into `substeps` integration steps.
//! Feature flags are re-read at the start of every substep.

use std::sync::Arc;
use std::time::Instant;

use drape_cloth::ClothState;
use drape_contact::{
    apply_proxy_collisions, CollisionProxy, CollisionSettings, SelfCollisionSettings,
    SelfCollisionSystem,
};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PhysicsSettings;
use crate::control::{FeatureFlags, SimulationControl};
use crate::grab::{GrabInput, Grabber};
use crate::gravity::apply_gravity;
use crate::integrator::integrate;
use crate::tension::apply_tension;
use crate::wind::apply_wind;

/// Summary of one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Index of the frame just simulated, starting at 0.
    pub frame: u64,
    /// Simulation clock at the end of the frame (seconds).
    pub sim_time: f64,
    pub substeps: u32,
    /// Points moved by self-collision, summed over substeps.
    pub self_collision_corrections: u32,
    /// Points that reached the floor and were pinned this frame.
    pub points_landed: u32,
    /// Point held by the grab at the end of the frame.
    pub grabbed: Option<usize>,
    /// Wall-clock time spent in the frame (seconds).
    pub wall_time: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct SubstepStats {
    corrections: u32,
    landed: u32,
}

/// Drives the substep pipeline over a [`ClothState`].
pub struct SimulationLoop {
    physics: PhysicsSettings,
    collision: CollisionSettings,
    self_collision: SelfCollisionSystem,
    control: Arc<SimulationControl>,
    grabber: Grabber,
    frame: u64,
    sim_time: f64,
}

impl SimulationLoop {
    pub fn new(
        physics: PhysicsSettings,
        collision: CollisionSettings,
        self_collision: SelfCollisionSettings,
        control: Arc<SimulationControl>,
    ) -> DrapeResult<Self> {
        physics.validate()?;
        if self_collision.cell_size <= 0.0 || !self_collision.cell_size.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "self-collision cell_size must be positive, got {}",
                self_collision.cell_size
            )));
        }
        Ok(Self {
            physics,
            collision,
            self_collision: SelfCollisionSystem::new(self_collision),
            control,
            grabber: Grabber::new(),
            frame: 0,
            sim_time: 0.0,
        })
    }

    #[inline]
    pub fn physics(&self) -> &PhysicsSettings {
        &self.physics
    }

    #[inline]
    pub fn collision(&self) -> &CollisionSettings {
        &self.collision
    }

    /// Shared handle to the feature toggles.
    #[inline]
    pub fn control(&self) -> Arc<SimulationControl> {
        Arc::clone(&self.control)
    }

    #[inline]
    pub fn grabber(&self) -> &Grabber {
        &self.grabber
    }

    /// Frames simulated since construction or the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulation clock in seconds.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Advance one rendered frame, or return `None` while paused.
    pub fn step_frame(
        &mut self,
        state: &mut ClothState,
        proxies: &[CollisionProxy],
        grab: &GrabInput,
    ) -> Option<FrameReport> {
        let flags = self.control.snapshot();
        if flags.paused {
            return None;
        }
        let start = Instant::now();

        if flags.grab {
            self.grabber.update(state, grab, &self.physics.grab);
        } else if self.grabber.grabbed().is_some() {
            self.grabber.release(state);
        }

        let substeps = self.physics.temporal.substeps;
        let substep_duration = self.physics.substep_duration() as f64;
        let mut totals = SubstepStats::default();
        for s in 0..substeps {
            let flags = self.control.snapshot();
            let time = self.sim_time + s as f64 * substep_duration;
            let stats = self.substep(state, proxies, grab, &flags, time as f32);
            totals.corrections += stats.corrections;
            totals.landed += stats.landed;
        }

        let frame = self.frame;
        self.frame += 1;
        self.sim_time += self.physics.temporal.dt as f64;
        if self.frame % self.physics.temporal.normal_refresh_interval as u64 == 0 {
            state.recompute_normals();
        }

        let report = FrameReport {
            frame,
            sim_time: self.sim_time,
            substeps,
            self_collision_corrections: totals.corrections,
            points_landed: totals.landed,
            grabbed: self.grabber.grabbed(),
            wall_time: start.elapsed().as_secs_f64(),
        };
        debug!(
            frame,
            sim_time = report.sim_time,
            landed = report.points_landed,
            corrections = report.self_collision_corrections,
            "frame complete"
        );
        Some(report)
    }

    /// Run one integration substep at simulation time `time`.
    fn substep(
        &mut self,
        state: &mut ClothState,
        proxies: &[CollisionProxy],
        grab: &GrabInput,
        flags: &FeatureFlags,
        time: f32,
    ) -> SubstepStats {
        let mut stats = SubstepStats::default();

        state.reset_acceleration();

        if flags.self_collision {
            stats.corrections = self.self_collision.solve(state).corrections_applied;
        }
        if flags.gravity {
            apply_gravity(state, &self.physics.gravity);
        }
        if flags.tension {
            apply_tension(state, &self.physics.tension);
        }
        if flags.wind {
            apply_wind(state, &self.physics.wind, time);
        }
        if flags.collision {
            apply_proxy_collisions(state, proxies, &self.collision, flags.primitive_filter());
        }
        if flags.grab {
            self.grabber.apply_force(state, grab, &self.physics.grab);
        }

        stats.landed = integrate(state, self.physics.acceleration_scale()) as u32;
        state.rotate_buffers();
        state.recompute_velocities();
        stats
    }

    /// Return the cloth to its rest grid and restart the clock.
    pub fn reset(&mut self, state: &mut ClothState) {
        self.grabber.release(state);
        state.reset_to_rest();
        self.frame = 0;
        self.sim_time = 0.0;
        info!("simulation reset");
    }
}
