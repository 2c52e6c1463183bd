//! # drape-math
//!
//! Geometry primitives for the drape cloth simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Quat`, etc.)
//! - Box signed distance field and its finite-difference gradient
//! - Ray queries used by the grab picker

pub mod ray;
pub mod sdf;

// Re-export glam types as the canonical math types for drape.
pub use glam::{IVec3, Quat, Vec2, Vec3};

pub use ray::Ray;

/// Rotation that carries `+Z` onto `axis`.
///
/// Collision proxies are authored Z-up and oriented by this rotation.
/// A zero-length (or non-finite) axis yields the identity.
pub fn rotation_from_z(axis: Vec3) -> Quat {
    match axis.try_normalize() {
        Some(dir) => Quat::from_rotation_arc(Vec3::Z, dir),
        None => Quat::IDENTITY,
    }
}
