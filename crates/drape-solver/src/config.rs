//! Physics configuration.
//!
//! Force and timestep parameters. Every struct deserializes with missing
//! fields taken from its `Default`.

use drape_math::Vec3;
use drape_types::constants::{
    DEFAULT_DT, DEFAULT_NORMAL_REFRESH_INTERVAL, DEFAULT_SUBSTEPS, GRAVITY, GRAVITY_SCALE,
};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// Constant body acceleration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySettings {
    pub amplitude: f32,
    pub direction: Vec3,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            amplitude: GRAVITY * GRAVITY_SCALE,
            direction: Vec3::NEG_Z,
        }
    }
}

/// Structural spring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TensionSettings {
    /// Spring constant.
    pub force: f32,
    /// Per-link cap on the force magnitude.
    pub max_force: f32,
    /// Damping of relative velocity along the link.
    pub damping: f32,
}

impl Default for TensionSettings {
    fn default() -> Self {
        Self {
            force: 500.0,
            max_force: 10.0,
            damping: 200_000.0,
        }
    }
}

/// Directional wind, optionally oscillating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindSettings {
    pub direction: Vec3,
    pub amplitude: f32,
    /// Oscillation frequency in Hz.
    pub frequency: f32,
    pub oscillate: bool,
    /// Accumulate wind on pinned points too. It never moves them.
    pub affect_fixed_points: bool,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            direction: Vec3::X,
            amplitude: 1.0,
            frequency: 1.0,
            oscillate: true,
            affect_fixed_points: true,
        }
    }
}

/// Mouse-grab spring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabSettings {
    pub force: f32,
    pub damping: f32,
    /// Maximum distance from the ray for a point to be picked.
    pub pick_radius: f32,
}

impl Default for GrabSettings {
    fn default() -> Self {
        Self {
            force: 500.0,
            damping: 200_000.0,
            pick_radius: 0.5,
        }
    }
}

/// Frame timestep and substep count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalSettings {
    /// Seconds per rendered frame.
    pub dt: f32,
    /// Integration steps per rendered frame.
    pub substeps: u32,
    /// Recompute normals every this many frames.
    pub normal_refresh_interval: u32,
}

impl Default for TemporalSettings {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            substeps: DEFAULT_SUBSTEPS,
            normal_refresh_interval: DEFAULT_NORMAL_REFRESH_INTERVAL,
        }
    }
}

/// All force and timestep parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: GravitySettings,
    pub tension: TensionSettings,
    pub wind: WindSettings,
    pub grab: GrabSettings,
    pub temporal: TemporalSettings,
}

impl PhysicsSettings {
    /// Reject timestep values the integrator cannot run with.
    pub fn validate(&self) -> DrapeResult<()> {
        let t = &self.temporal;
        if !t.dt.is_finite() || t.dt <= 0.0 {
            return Err(DrapeError::InvalidConfig(format!(
                "dt must be positive, got {}",
                t.dt
            )));
        }
        if t.substeps == 0 {
            return Err(DrapeError::InvalidConfig("substeps must be at least 1".into()));
        }
        if t.normal_refresh_interval == 0 {
            return Err(DrapeError::InvalidConfig(
                "normal_refresh_interval must be at least 1".into(),
            ));
        }
        if self.tension.max_force < 0.0 {
            return Err(DrapeError::InvalidConfig(
                "tension max_force must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// `dt² / substeps`, the factor applied to acceleration each substep.
    #[inline]
    pub fn acceleration_scale(&self) -> f32 {
        let dt = self.temporal.dt;
        dt * dt / self.temporal.substeps as f32
    }

    /// Duration of one substep on the simulation clock.
    #[inline]
    pub fn substep_duration(&self) -> f32 {
        self.temporal.dt / self.temporal.substeps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = PhysicsSettings::default();
        assert!(s.validate().is_ok());
        assert!((s.gravity.amplitude - 0.04905).abs() < 1e-6);
        assert_eq!(s.temporal.substeps, 20);
    }

    #[test]
    fn zero_substeps_rejected() {
        let mut s = PhysicsSettings::default();
        s.temporal.substeps = 0;
        assert!(matches!(s.validate(), Err(DrapeError::InvalidConfig(_))));
    }

    #[test]
    fn acceleration_scale_divides_by_substeps() {
        let mut s = PhysicsSettings::default();
        s.temporal.dt = 0.1;
        s.temporal.substeps = 4;
        assert!((s.acceleration_scale() - 0.0025).abs() < 1e-8);
    }
}
