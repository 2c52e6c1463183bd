//! Cloth construction parameters.

use drape_math::Vec3;
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// Configuration consumed once when a [`ClothState`](crate::ClothState) is built.
///
/// The cloth lies flat in the XY plane at `origin.z + starting_height`;
/// the world is Z-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothSettings {
    /// World-space offset of grid point (0, 0) before the starting height is applied.
    pub origin: Vec3,
    /// Physical extent along X.
    pub size_x: f32,
    /// Physical extent along Y.
    pub size_y: f32,
    /// Number of points along X.
    pub resolution_x: usize,
    /// Number of points along Y.
    pub resolution_y: usize,
    /// Initial height of the flat cloth.
    pub starting_height: f32,
    /// Points reaching this height are clamped and pinned.
    pub floor_height: f32,
    /// Mass of a single point.
    pub mass: f32,
    /// Pin the four corners at construction and on reset.
    pub lock_corners: bool,
}

impl Default for ClothSettings {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            size_x: 10.8,
            size_y: 10.8,
            resolution_x: 5,
            resolution_y: 5,
            starting_height: 0.5,
            floor_height: -10.0,
            mass: 1.0,
            lock_corners: true,
        }
    }
}

impl ClothSettings {
    /// Total number of grid points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.resolution_x * self.resolution_y
    }

    /// Rest spacing between neighbours along X.
    #[inline]
    pub fn spacing_x(&self) -> f32 {
        self.size_x / self.resolution_x as f32
    }

    /// Rest spacing between neighbours along Y.
    #[inline]
    pub fn spacing_y(&self) -> f32 {
        self.size_y / self.resolution_y as f32
    }

    /// Rest position of grid point `(x, y)`.
    #[inline]
    pub fn rest_position(&self, x: usize, y: usize) -> Vec3 {
        self.origin
            + Vec3::new(
                x as f32 * self.spacing_x(),
                y as f32 * self.spacing_y(),
                self.starting_height,
            )
    }

    /// Reject configurations that cannot produce a usable grid.
    pub fn validate(&self) -> DrapeResult<()> {
        if self.resolution_x == 0 || self.resolution_y == 0 {
            return Err(DrapeError::InvalidConfig(format!(
                "cloth resolution must be non-zero (got {}x{})",
                self.resolution_x, self.resolution_y
            )));
        }
        if self.mass <= 0.0 || !self.mass.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "cloth point mass must be positive (got {})",
                self.mass
            )));
        }
        if !self.size_x.is_finite() || !self.size_y.is_finite() {
            return Err(DrapeError::InvalidConfig("cloth size must be finite".into()));
        }
        Ok(())
    }
}
