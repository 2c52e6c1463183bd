//! Signed distance fields.
//!
//! Negative inside, zero on the surface, positive outside. Surface
//! normals are estimated with a central difference of the field.

use glam::Vec3;

/// Signed distance from `p` to an origin-centred box with half extents `half_size`.
#[inline]
pub fn sdf_box(p: Vec3, half_size: Vec3) -> f32 {
    let d = p.abs() - half_size;
    d.max(Vec3::ZERO).length() + d.max_element().min(0.0)
}

/// Central-difference gradient of `field` at `p` with step `h`.
///
/// The result is not normalized. It vanishes where the field is locally
/// symmetric (e.g. the exact centre of a box), so callers must handle a
/// zero gradient.
pub fn central_gradient<F>(field: F, p: Vec3, h: f32) -> Vec3
where
    F: Fn(Vec3) -> f32,
{
    let dx = Vec3::new(h, 0.0, 0.0);
    let dy = Vec3::new(0.0, h, 0.0);
    let dz = Vec3::new(0.0, 0.0, h);
    Vec3::new(
        field(p + dx) - field(p - dx),
        field(p + dy) - field(p - dy),
        field(p + dz) - field(p - dz),
    )
}
