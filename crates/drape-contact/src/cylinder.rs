//! Finite cylinder collision.
//!
//! Only the lateral surface pushes; caps are not handled. A point engages
//! when its axial offset from the center is within half the height and its
//! radial distance is under `radius + gap`.

use drape_cloth::ClothState;
use drape_math::Vec3;
use drape_types::constants::DEGENERATE_LENGTH;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::CollisionSettings;

/// Finite cylinder collider, centered on its midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderCollider {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
    pub axis: Vec3,
}

impl CylinderCollider {
    pub fn new(center: Vec3, radius: f32, height: f32, axis: Vec3) -> Self {
        Self { center, radius, height, axis }
    }

    /// Penalty plus normal damping for a point at `p` moving with
    /// `velocity`. `axis` must be unit length.
    pub fn response(
        &self,
        p: Vec3,
        velocity: Vec3,
        axis: Vec3,
        settings: &CollisionSettings,
    ) -> Option<Vec3> {
        let to_point = p - self.center;
        let h = to_point.dot(axis);
        if h.abs() > self.height * 0.5 {
            return None;
        }

        let radial = to_point - axis * h;
        let reach = self.radius + settings.anti_clipping_gap;
        let dist2 = radial.length_squared();
        if dist2 >= reach * reach {
            return None;
        }

        let dist = dist2.sqrt();
        let normal = if dist > DEGENERATE_LENGTH { radial / dist } else { Vec3::X };
        let penalty = normal
            * (reach - dist)
            * settings.stiffness
            * settings.cylinder_stiffness_scale;
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
