//! Flat disk collision.
//!
//! A disk is a plane patch: points below the plane (opposite the axis)
//! and within `radius + gap` of the center in-plane are pushed back along
//! the axis.

use drape_cloth::ClothState;
use drape_math::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::CollisionSettings;

/// Disk collider; `axis` is the plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskCollider {
    pub center: Vec3,
    pub radius: f32,
    pub axis: Vec3,
}

impl DiskCollider {
    pub fn new(center: Vec3, radius: f32, axis: Vec3) -> Self {
        Self { center, radius, axis }
    }

    /// Penalty plus normal damping; `normal` must be unit length.
    pub fn response(
        &self,
        p: Vec3,
        velocity: Vec3,
        normal: Vec3,
        settings: &CollisionSettings,
    ) -> Option<Vec3> {
        let to_point = p - self.center;
        let signed = to_point.dot(normal);
        if signed >= 0.0 {
            return None;
        }

        let in_plane = to_point - normal * signed;
        let reach = self.radius + settings.anti_clipping_gap;
        if in_plane.length_squared() > reach * reach {
            return None;
        }

        let penetration = -signed + settings.anti_clipping_gap;
        let penalty =
            normal * penetration * settings.stiffness * settings.disk_stiffness_scale;
        let damping = -settings.damping * velocity.dot(normal) * normal;
        Some(penalty + damping)
    }

    pub fn apply(&self, state: &mut ClothState, settings: &CollisionSettings) {
        let normal = self.axis.try_normalize().unwrap_or(Vec3::Z);
        let buffers = state.buffers_mut();
        let position = &*buffers.position;
        let position_old = &*buffers.position_old;
        buffers
            .acceleration
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, acc)| {
                let velocity = position[i] - position_old[i];
                if let Some(a) = self.response(position[i], velocity, normal, settings) {
                    *acc += a;
                }
            });
    }
}
