//! # drape-solver
//!
//! Force accumulation, time integration and the per-frame simulation loop.
//!
//! ## Key Types
//!
//! - [`PhysicsSettings`] — gravity, tension, wind, grab and timestep parameters
//! - [`SimulationLoop`] — runs `substeps` integration steps per rendered frame
//! - [`SimulationControl`] — thread-safe feature toggles and pause
//! - [`Grabber`] — picks a point under a ray and drags it toward the cursor
//!
//! ## Substep order
//!
//! ```text
//! reset acceleration → self-collision → gravity → tension → wind
//!   → proxy collisions → grab → integrate → rotate → recompute velocity
//! ```
//!
//! Disabled stages contribute nothing; the order never changes.

pub mod config;
pub mod control;
pub mod grab;
pub mod gravity;
pub mod integrator;
pub mod simulation;
pub mod tension;
pub mod wind;

pub use config::{
    GrabSettings, GravitySettings, PhysicsSettings, TemporalSettings, TensionSettings,
    WindSettings,
};
pub use control::{FeatureFlags, SimulationControl};
pub use grab::{find_closest_point_to_ray, GrabInput, Grabber};
pub use simulation::{FrameReport, SimulationLoop};
