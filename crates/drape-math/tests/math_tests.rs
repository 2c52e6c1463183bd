//! Integration tests for drape-math.

use drape_math::sdf::{central_gradient, sdf_box};
use drape_math::{rotation_from_z, Quat, Vec3};

// ─── Rotation Tests ───────────────────────────────────────────

#[test]
fn rotation_from_z_maps_z_onto_axis() {
    let axis = Vec3::new(1.0, 1.0, 0.0);
    let q = rotation_from_z(axis);
    let mapped = q * Vec3::Z;
    assert!((mapped - axis.normalize()).length() < 1e-5);
}

#[test]
fn rotation_from_z_identity_for_z() {
    let q = rotation_from_z(Vec3::Z);
    assert!((q * Vec3::X - Vec3::X).length() < 1e-6);
}

#[test]
fn rotation_from_zero_axis_is_identity() {
    assert_eq!(rotation_from_z(Vec3::ZERO), Quat::IDENTITY);
}

// ─── SDF Tests ────────────────────────────────────────────────

#[test]
fn rotated_box_gradient_in_world_space() {
    // Box tilted so its local +Z points along world +X.
    let q = rotation_from_z(Vec3::X);
    let half = Vec3::new(1.0, 1.0, 0.5);
    let world = Vec3::new(0.4, 0.0, 0.0);
    let local = q.inverse() * world;

    assert!(sdf_box(local, half) < 0.0);
    let n_local = central_gradient(|p| sdf_box(p, half), local, 1e-3).normalize();
    let n_world = q * n_local;
    assert!((n_world - Vec3::X).length() < 1e-3);
}
