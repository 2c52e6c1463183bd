//! Analytical sphere collision.
//!
//! Pushes points out of a sphere inflated by the anti-clipping gap.

use drape_cloth::ClothState;
use drape_math::Vec3;
use drape_types::constants::DEGENERATE_LENGTH;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::CollisionSettings;

/// Analytical sphere collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl SphereCollider {
    /// Creates a new sphere collider.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Penalty acceleration for a point at `p`, or `None` outside the
    /// inflated sphere.
    ///
    /// A point exactly at the center is pushed along +Z.
    pub fn response(&self, p: Vec3, settings: &CollisionSettings) -> Option<Vec3> {
        let reach = self.radius + settings.anti_clipping_gap;
        let offset = p - self.center;
        let dist = offset.length();
        if dist > reach {
            return None;
        }
        let normal = if dist > DEGENERATE_LENGTH { offset / dist } else { Vec3::Z };
        Some(normal * (reach - dist) * settings.stiffness)
    }

    /// Add the sphere's penalty acceleration to every engaged point.
    pub fn apply(&self, state: &mut ClothState, settings: &CollisionSettings) {
        let buffers = state.buffers_mut();
        let position = &*buffers.position;
        buffers
            .acceleration
            .par_iter_mut()
            .zip(position.par_iter())
            .for_each(|(acc, &p)| {
                if let Some(a) = self.response(p, settings) {
                    *acc += a;
                }
            });
    }
}
