//! Collision response parameters.

use serde::{Deserialize, Serialize};

/// Shared parameters for every proxy resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Extra clearance added to every proxy surface.
    pub anti_clipping_gap: f32,
    /// Penalty stiffness: acceleration per unit of penetration.
    pub stiffness: f32,
    /// Damping of the velocity component along the contact normal.
    pub damping: f32,
    /// Boxes inflate each extent by `anti_clipping_gap * box_gap_factor`.
    pub box_gap_factor: f32,
    /// Multiplier on `stiffness` for cylinders.
    pub cylinder_stiffness_scale: f32,
    /// Multiplier on `stiffness` for disks.
    pub disk_stiffness_scale: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            anti_clipping_gap: 0.1,
            stiffness: 50_000.0,
            damping: 20_000.0,
            box_gap_factor: 5.0,
            cylinder_stiffness_scale: 1.0e-3,
            disk_stiffness_scale: 1.0e-4,
        }
    }
}

/// Parameters for the spatial-hash self-collision pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfCollisionSettings {
    /// Points closer than this are pushed apart to exactly this distance.
    pub min_distance: f32,
    /// Edge length of a spatial hash cell.
    pub cell_size: f32,
}

impl Default for SelfCollisionSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.04,
            cell_size: 0.08,
        }
    }
}
