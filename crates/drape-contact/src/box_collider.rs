//! Oriented box collision through a signed distance field.
//!
//! The box is evaluated in its local frame, where it is axis-aligned; the
//! frame maps local +Z onto the box axis. Normals come from a central
//! difference of the SDF and are rotated back to world space.

use drape_cloth::ClothState;
use drape_math::sdf::{central_gradient, sdf_box};
use drape_math::{rotation_from_z, Quat, Vec3};
use drape_types::constants::SDF_GRADIENT_STEP;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::CollisionSettings;

/// Oriented box collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Center of the box.
    pub center: Vec3,
    /// Full extents along the local axes.
    pub size: Vec3,
    /// Direction the local +Z axis maps to.
    pub axis: Vec3,
}

impl BoxCollider {
    pub fn new(center: Vec3, size: Vec3, axis: Vec3) -> Self {
        Self { center, size, axis }
    }

    /// Local-to-world rotation.
    pub fn rotation(&self) -> Quat {
        rotation_from_z(self.axis)
    }

    /// Half extents after inflating each side by the gap.
    pub fn half_size(&self, settings: &CollisionSettings) -> Vec3 {
        (self.size + Vec3::splat(settings.anti_clipping_gap * settings.box_gap_factor)) * 0.5
    }

    /// Penalty acceleration for a point at `p`, or `None` when the SDF is
    /// non-negative.
    pub fn response(
        &self,
        p: Vec3,
        rotation: Quat,
        half: Vec3,
        settings: &CollisionSettings,
    ) -> Option<Vec3> {
        let local = rotation.inverse() * (p - self.center);
        let dist = sdf_box(local, half);
        if dist >= 0.0 {
            return None;
        }
        let gradient = central_gradient(|q| sdf_box(q, half), local, SDF_GRADIENT_STEP);
        let normal = rotation * gradient.try_normalize().unwrap_or(Vec3::Z);
        Some(normal * (-dist) * settings.stiffness)
    }

    /// Add the box's penalty acceleration to every point inside it.
    pub fn apply(&self, state: &mut ClothState, settings: &CollisionSettings) {
        let rotation = self.rotation();
        let half = self.half_size(settings);
        let buffers = state.buffers_mut();
        let position = &*buffers.position;
        buffers
            .acceleration
            .par_iter_mut()
            .zip(position.par_iter())
            .for_each(|(acc, &p)| {
                if let Some(a) = self.response(p, rotation, half, settings) {
                    *acc += a;
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CollisionSettings {
        CollisionSettings {
            anti_clipping_gap: 0.0,
            stiffness: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn point_near_top_face_pushed_up() {
        let b = BoxCollider::new(Vec3::ZERO, Vec3::splat(2.0), Vec3::Z);
        let s = settings();
        let a = b
            .response(Vec3::new(0.1, -0.2, 0.9), b.rotation(), b.half_size(&s), &s)
            .unwrap();
        assert!((a - Vec3::new(0.0, 0.0, 0.1)).length() < 1e-3);
    }

    #[test]
    fn rotated_box_pushes_along_world_axis() {
        // Local +Z mapped onto world +X: the "top" face now faces +X.
        let b = BoxCollider::new(Vec3::ZERO, Vec3::new(4.0, 4.0, 2.0), Vec3::X);
        let s = settings();
        let a = b
            .response(Vec3::new(0.8, 0.0, 0.0), b.rotation(), b.half_size(&s), &s)
            .unwrap();
        assert!(a.x > 0.0);
        assert!((a.x - 0.2).abs() < 1e-3);
    }

    #[test]
    fn gap_inflates_box() {
        let b = BoxCollider::new(Vec3::ZERO, Vec3::splat(2.0), Vec3::Z);
        let s = CollisionSettings { anti_clipping_gap: 0.1, ..settings() };
        // Half extent becomes 1.25.
        let p = Vec3::new(0.0, 0.0, 1.2);
        assert!(b.response(p, b.rotation(), b.half_size(&s), &s).is_some());
        assert!(b.response(p, b.rotation(), b.half_size(&settings()), &settings()).is_none());
    }
}
