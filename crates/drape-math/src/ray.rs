//! Rays in world space.

use glam::Vec3;

/// A half-line `origin + t * direction`, `t >= 0`.
///
/// `direction` is expected to be unit length; distances along the ray
/// are measured in units of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Perpendicular distance from `point` to the ray.
    ///
    /// Returns `None` when the point lies behind the origin.
    pub fn distance_to_point(&self, point: Vec3) -> Option<f32> {
        let t = (point - self.origin).dot(self.direction);
        if t < 0.0 {
            return None;
        }
        Some((point - self.at(t)).length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_from_offset_point() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let d = ray.distance_to_point(Vec3::new(5.0, 0.0, 2.0)).unwrap();
        assert!((d - 2.0).abs() < 1e-6);
    }

    #[test]
    fn point_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray.distance_to_point(Vec3::new(-1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn at_walks_along_direction() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z);
        assert_eq!(ray.at(3.0), Vec3::new(1.0, 0.0, 3.0));
    }
}
