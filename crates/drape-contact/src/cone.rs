//! Finite cone collision.
//!
//! The cone is described by its tip and the axis pointing from tip to
//! base. The allowed radius grows linearly from zero at the tip to
//! `radius` at the base, plus the gap everywhere.

use drape_cloth::ClothState;
use drape_math::Vec3;
use drape_types::constants::DEGENERATE_LENGTH;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::CollisionSettings;

/// Finite cone collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeCollider {
    /// Apex of the cone.
    pub tip: Vec3,
    /// Direction from tip to base.
    pub axis: Vec3,
    pub height: f32,
    /// Base radius.
    pub radius: f32,
}

impl ConeCollider {
    pub fn new(tip: Vec3, axis: Vec3, height: f32, radius: f32) -> Self {
        Self { tip, axis, height, radius }
    }

    /// Radius of the engaged region at axial distance `h` from the tip.
    #[inline]
    pub fn reach_at(&self, h: f32, settings: &CollisionSettings) -> f32 {
        h * self.radius / self.height + settings.anti_clipping_gap
    }

    /// Penalty plus normal damping; `axis` must be unit length.
    pub fn response(
        &self,
        p: Vec3,
        velocity: Vec3,
        axis: Vec3,
        settings: &CollisionSettings,
    ) -> Option<Vec3> {
        let to_point = p - self.tip;
        let h = to_point.dot(axis);
        if h < 0.0 || h > self.height {
            return None;
        }

        let radial = to_point - axis * h;
        let dist = radial.length();
        let reach = self.reach_at(h, settings);
        if dist >= reach {
            return None;
        }

        let normal = if dist > DEGENERATE_LENGTH { radial / dist } else { Vec3::X };
        let penalty = normal * (reach - dist) * settings.stiffness;
        let damping = -settings.damping * velocity.dot(normal) * normal;
        Some(penalty + damping)
    }

    pub fn apply(&self, state: &mut ClothState, settings: &CollisionSettings) {
        let axis = self.axis.try_normalize().unwrap_or(Vec3::Z);
        let buffers = state.buffers_mut();
        let position = &*buffers.position;
        let position_old = &*buffers.position_old;
        buffers
            .acceleration
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, acc)| {
                let velocity = position[i] - position_old[i];
                if let Some(a) = self.response(position[i], velocity, axis, settings) {
                    *acc += a;
                }
            });
    }
}
