//! Integration tests for drape-contact.

use drape_cloth::{ClothSettings, ClothState};
use drape_contact::{
    apply_proxy_collisions, BoxCollider, CollisionProxy, CollisionSettings, ConeCollider,
    CylinderCollider, DiskCollider, PrimitiveFilter, PrimitiveType, SelfCollisionSettings, SelfCollisionSystem,
    SphereCollider,
};
use drape_math::Vec3;
use proptest::prelude::*;
use serde::Deserialize;

/// 3×3 unpinned cloth spanning [0, 2]² at z = 0.5.
fn small_cloth() -> ClothState {
    ClothState::new(ClothSettings {
        size_x: 3.0,
        size_y: 3.0,
        resolution_x: 3,
        resolution_y: 3,
        lock_corners: false,
        ..Default::default()
    })
    .unwrap()
}

/// Two free points placed at `a` and `b`.
fn two_points(a: Vec3, b: Vec3) -> ClothState {
    let mut cloth = ClothState::new(ClothSettings {
        resolution_x: 1,
        resolution_y: 2,
        lock_corners: false,
        ..Default::default()
    })
    .unwrap();
    cloth.positions_mut()[0] = a;
    cloth.positions_mut()[1] = b;
    cloth
}

fn unit_settings() -> CollisionSettings {
    CollisionSettings {
        anti_clipping_gap: 0.0,
        stiffness: 1.0,
        damping: 0.0,
        ..Default::default()
    }
}

// ─── Proxy Dispatch Tests ─────────────────────────────────────

#[test]
fn sphere_under_center_point_pushes_it_up() {
    let mut cloth = small_cloth();
    let sphere = SphereCollider::new(Vec3::new(1.0, 1.0, 0.0), 0.6);
    let applied = apply_proxy_collisions(
        &mut cloth,
        &[sphere.into()],
        &unit_settings(),
        PrimitiveFilter::all(),
    );
    assert_eq!(applied, 1);

    let center = cloth.index(1, 1).unwrap();
    let acc = cloth.accelerations()[center];
    assert!((acc - Vec3::new(0.0, 0.0, 0.1)).length() < 1e-5);
    for (i, a) in cloth.accelerations().iter().enumerate() {
        if i != center {
            assert_eq!(*a, Vec3::ZERO);
        }
    }
}

#[test]
fn point_at_sphere_center_stays_finite() {
    let mut cloth = small_cloth();
    let p = cloth.positions()[4];
    let sphere = SphereCollider::new(p, 0.3);
    apply_proxy_collisions(&mut cloth, &[sphere.into()], &unit_settings(), PrimitiveFilter::all());
    assert!(cloth.accelerations().iter().all(|a| a.is_finite()));
    assert!(cloth.accelerations()[4].z > 0.0);
}

#[test]
fn disabled_primitive_is_skipped() {
    let mut cloth = small_cloth();
    let sphere = SphereCollider::new(Vec3::new(1.0, 1.0, 0.0), 0.6);
    let filter = PrimitiveFilter::all().with(PrimitiveType::Sphere, false);
    let applied = apply_proxy_collisions(&mut cloth, &[sphere.into()], &unit_settings(), filter);
    assert_eq!(applied, 0);
    assert!(cloth.accelerations().iter().all(|a| *a == Vec3::ZERO));
}

#[test]
fn invalid_proxy_skipped_others_applied() {
    let mut cloth = small_cloth();
    let proxies = [
        CollisionProxy::from(ConeCollider::new(Vec3::ZERO, Vec3::Z, 0.0, 1.0)),
        CollisionProxy::from(BoxCollider::new(Vec3::new(1.0, 1.0, 0.0), Vec3::splat(1.2), Vec3::Z)),
    ];
    let applied =
        apply_proxy_collisions(&mut cloth, &proxies, &unit_settings(), PrimitiveFilter::all());
    assert_eq!(applied, 1);
    // Box top face at z = 0.6, point at 0.5.
    let acc = cloth.accelerations()[cloth.index(1, 1).unwrap()];
    assert!((acc - Vec3::new(0.0, 0.0, 0.1)).length() < 1e-3);
}

#[test]
fn contributions_accumulate() {
    let mut cloth = small_cloth();
    let sphere: CollisionProxy = SphereCollider::new(Vec3::new(1.0, 1.0, 0.0), 0.6).into();
    apply_proxy_collisions(&mut cloth, &[sphere, sphere], &unit_settings(), PrimitiveFilter::all());
    let acc = cloth.accelerations()[cloth.index(1, 1).unwrap()];
    assert!((acc.z - 0.2).abs() < 1e-5);
}

#[test]
fn disk_below_cloth_does_not_engage() {
    let mut cloth = small_cloth();
    let disk = DiskCollider::new(Vec3::new(1.0, 1.0, 0.0), 5.0, Vec3::Z);
    apply_proxy_collisions(&mut cloth, &[disk.into()], &unit_settings(), PrimitiveFilter::all());
    assert!(cloth.accelerations().iter().all(|a| *a == Vec3::ZERO));
}

/// One free point at `p` whose Verlet velocity is `velocity`.
fn moving_point(p: Vec3, velocity: Vec3) -> ClothState {
    let mut cloth = ClothState::new(ClothSettings {
        resolution_x: 1,
        resolution_y: 1,
        lock_corners: false,
        ..Default::default()
    })
    .unwrap();
    let buffers = cloth.buffers_mut();
    buffers.position[0] = p;
    buffers.position_old[0] = p - velocity;
    cloth
}

/// Damping only: no penalty, so the result is `-damping * (v·n) * n`.
fn damping_settings() -> CollisionSettings {
    CollisionSettings {
        anti_clipping_gap: 0.0,
        stiffness: 0.0,
        damping: 2.0,
        ..Default::default()
    }
}

fn damped_acceleration(proxy: CollisionProxy, p: Vec3, velocity: Vec3) -> Vec3 {
    let mut cloth = moving_point(p, velocity);
    let applied =
        apply_proxy_collisions(&mut cloth, &[proxy], &damping_settings(), PrimitiveFilter::all());
    assert_eq!(applied, 1);
    cloth.accelerations()[0]
}

#[test]
fn disk_damps_velocity_into_plane() {
    let disk = DiskCollider::new(Vec3::ZERO, 1.0, Vec3::Z);
    let acc = damped_acceleration(
        disk.into(),
        Vec3::new(0.2, 0.0, -0.05),
        Vec3::new(0.3, 0.0, -0.1),
    );
    // Tangential motion is left alone.
    assert!((acc - Vec3::new(0.0, 0.0, 0.2)).length() < 1e-5);
}

#[test]
fn cylinder_damps_radial_velocity() {
    let cylinder = CylinderCollider::new(Vec3::ZERO, 0.5, 2.0, Vec3::X);
    let acc = damped_acceleration(
        cylinder.into(),
        Vec3::new(0.3, 0.0, 0.2),
        Vec3::new(0.4, 0.0, -0.1),
    );
    assert!((acc - Vec3::new(0.0, 0.0, 0.2)).length() < 1e-5);
}

#[test]
fn cone_damps_only_radial_velocity() {
    // Tip at origin, base 2 units below; at z = -1 the reach is 0.5.
    let cone = ConeCollider::new(Vec3::ZERO, -Vec3::Z, 2.0, 1.0);
    let p = Vec3::new(0.3, 0.0, -1.0);

    let axial = damped_acceleration(cone.into(), p, Vec3::new(0.0, 0.0, -0.1));
    assert!(axial.length() < 1e-5);

    let inward = damped_acceleration(cone.into(), p, Vec3::new(-0.05, 0.0, -0.1));
    assert!((inward - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn penalty_and_damping_combine() {
    let settings = CollisionSettings {
        anti_clipping_gap: 0.0,
        stiffness: 10.0,
        damping: 2.0,
        disk_stiffness_scale: 1.0,
        ..Default::default()
    };
    let disk = DiskCollider::new(Vec3::ZERO, 1.0, Vec3::Z);
    let mut cloth = moving_point(Vec3::new(0.0, 0.0, -0.05), Vec3::new(0.0, 0.0, -0.1));
    apply_proxy_collisions(&mut cloth, &[disk.into()], &settings, PrimitiveFilter::all());
    // 0.05 * 10 penalty + 0.1 * 2 damping
    assert!((cloth.accelerations()[0] - Vec3::new(0.0, 0.0, 0.7)).length() < 1e-5);
}

#[test]
fn proxies_parse_from_toml() {
    #[derive(Deserialize)]
    struct Scene {
        proxy: Vec<CollisionProxy>,
    }
    let scene: Scene = toml::from_str(
        r#"
        [[proxy]]
        kind = "sphere"
        center = [0.0, 0.0, 1.0]
        radius = 0.5

        [[proxy]]
        kind = "cone"
        tip = [0.0, 0.0, 2.0]
        axis = [0.0, 0.0, -1.0]
        height = 1.5
        radius = 0.75
        "#,
    )
    .unwrap();
    assert_eq!(scene.proxy.len(), 2);
    assert_eq!(scene.proxy[0], SphereCollider::new(Vec3::new(0.0, 0.0, 1.0), 0.5).into());
    assert_eq!(scene.proxy[1].primitive(), PrimitiveType::Cone);
}

// ─── Self-Collision Tests ─────────────────────────────────────

fn self_settings() -> SelfCollisionSettings {
    SelfCollisionSettings {
        min_distance: 0.04,
        cell_size: 0.08,
    }
}

#[test]
fn close_pair_pushed_to_min_distance() {
    let mut cloth = two_points(Vec3::ZERO, Vec3::new(0.02, 0.0, 0.0));
    let mut system = SelfCollisionSystem::new(self_settings());
    let result = system.solve(&mut cloth);

    assert_eq!(result.proximity_pairs, 1);
    assert_eq!(result.corrections_applied, 2);
    let p = cloth.positions();
    assert!((p[0] - Vec3::new(-0.01, 0.0, 0.0)).length() < 1e-6);
    assert!((p[1] - Vec3::new(0.03, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn distant_pair_untouched() {
    let a = Vec3::new(0.1, 0.2, 0.3);
    let b = Vec3::new(0.2, 0.2, 0.3);
    let mut cloth = two_points(a, b);
    let result = SelfCollisionSystem::new(self_settings()).solve(&mut cloth);
    assert_eq!(result.proximity_pairs, 0);
    assert_eq!(cloth.positions(), &[a, b]);
}

#[test]
fn coincident_points_skipped() {
    let p = Vec3::new(0.5, 0.5, 0.5);
    let mut cloth = two_points(p, p);
    let result = SelfCollisionSystem::new(self_settings()).solve(&mut cloth);
    assert_eq!(result.corrections_applied, 0);
    assert!(cloth.positions().iter().all(|q| *q == p));
}

#[test]
fn fixed_point_never_moves() {
    let mut cloth = two_points(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.01));
    cloth.set_fixed(0, 0, true).unwrap();
    SelfCollisionSystem::new(self_settings()).solve(&mut cloth);
    let p = cloth.positions();
    assert_eq!(p[0], Vec3::ZERO);
    assert!((p[1].z - 0.04).abs() < 1e-6);
}

proptest! {
    #[test]
    fn single_pair_separates_symmetrically(
        x in -1.0f32..1.0,
        y in -1.0f32..1.0,
        z in -1.0f32..1.0,
        dir in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
        dist in 0.002f32..0.038,
    ) {
        let dir = Vec3::new(dir.0, dir.1, dir.2);
        prop_assume!(dir.length() > 0.1);
        let a = Vec3::new(x, y, z);
        let b = a + dir.normalize() * dist;
        let mut cloth = two_points(a, b);

        SelfCollisionSystem::new(self_settings()).solve(&mut cloth);

        let p = cloth.positions();
        prop_assert!((p[0].distance(p[1]) - 0.04).abs() < 1e-4);
        prop_assert!(((p[0] + p[1]) * 0.5 - (a + b) * 0.5).length() < 1e-5);
    }
}
