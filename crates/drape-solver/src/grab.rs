//! Mouse grab: pick a point under a ray and spring it toward the cursor.
//!
//! The input subsystem supplies a [`GrabInput`] each frame. While the
//! button is held, the picked point is pulled toward
//! `ray_origin + ray_direction * depth`, where `depth` is fixed at the
//! moment of picking.

use drape_cloth::ClothState;
use drape_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GrabSettings;

/// Grab state reported by the input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrabInput {
    pub is_grabbing: bool,
    pub ray_origin: Vec3,
    /// Unit direction of the pick ray.
    pub ray_direction: Vec3,
}

impl GrabInput {
    pub fn ray(&self) -> Ray {
        Ray::new(self.ray_origin, self.ray_direction)
    }
}

/// Closest unpinned point to `ray`, if any lies strictly within
/// `max_distance` of it. Points behind the ray origin are ignored.
pub fn find_closest_point_to_ray(
    positions: &[Vec3],
    fixed: &[bool],
    ray: &Ray,
    max_distance: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, (&p, &is_fixed)) in positions.iter().zip(fixed).enumerate() {
        if is_fixed {
            continue;
        }
        let Some(d) = ray.distance_to_point(p) else {
            continue;
        };
        if d < max_distance && best.map_or(true, |(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Holds the currently grabbed point, if any.
#[derive(Debug, Clone, Default)]
pub struct Grabber {
    grabbed: Option<usize>,
    depth: f32,
}

impl Grabber {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    /// Distance along the ray at which the grabbed point is held.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Pick on press, release when the button is up.
    ///
    /// Releasing never changes a point's pinned state.
    pub fn update(&mut self, state: &mut ClothState, input: &GrabInput, settings: &GrabSettings) {
        if !input.is_grabbing {
            if let Some(index) = self.grabbed.take() {
                state.set_grabbed(None);
                debug!(index, "grab released");
            }
            return;
        }
        if self.grabbed.is_some() {
            return;
        }

        let ray = input.ray();
        if let Some(index) =
            find_closest_point_to_ray(state.positions(), state.fixed(), &ray, settings.pick_radius)
        {
            self.depth = state.positions()[index].distance(ray.origin);
            self.grabbed = Some(index);
            state.set_grabbed(Some(index));
            debug!(index, depth = self.depth, "point grabbed");
        }
    }

    /// Drop the grab without waiting for input.
    pub fn release(&mut self, state: &mut ClothState) {
        self.grabbed = None;
        state.set_grabbed(None);
    }

    /// World position the grabbed point is pulled toward.
    pub fn target(&self, input: &GrabInput) -> Option<Vec3> {
        self.grabbed
            .map(|_| input.ray_origin + input.ray_direction * self.depth)
    }

    /// Add `(target − p)·k − c·v` to the grabbed point, with `v = p − p_old`.
    pub fn apply_force(&self, state: &mut ClothState, input: &GrabInput, settings: &GrabSettings) {
        if !input.is_grabbing {
            return;
        }
        let (Some(index), Some(target)) = (self.grabbed, self.target(input)) else {
            return;
        };
        let buffers = state.buffers_mut();
        let Some(&p) = buffers.position.get(index) else {
            return;
        };
        let velocity = p - buffers.position_old[index];
        buffers.acceleration[index] += (target - p) * settings.force - settings.damping * velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_wins() {
        let positions = [
            Vec3::new(0.0, 0.3, 5.0),
            Vec3::new(0.0, 0.1, 3.0),
            Vec3::new(0.0, 0.2, 1.0),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(find_closest_point_to_ray(&positions, &[false; 3], &ray, 0.5), Some(1));
    }

    #[test]
    fn fixed_and_behind_points_skipped() {
        let positions = [Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.4, 0.0, 2.0)];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(
            find_closest_point_to_ray(&positions, &[false, true, false], &ray, 0.5),
            Some(2)
        );
    }

    #[test]
    fn max_distance_is_strict() {
        let positions = [Vec3::new(0.5, 0.0, 1.0)];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(find_closest_point_to_ray(&positions, &[false], &ray, 0.5), None);
    }
}
