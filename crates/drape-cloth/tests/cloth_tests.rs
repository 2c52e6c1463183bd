//! Integration tests for drape-cloth.

use drape_cloth::buffers::VERTEX_STRIDE;
use drape_cloth::{ClothSettings, ClothState, RenderBuffers};
use drape_math::Vec3;
use drape_types::DrapeError;

fn free_cloth(rx: usize, ry: usize) -> ClothState {
    ClothState::new(ClothSettings {
        size_x: rx as f32,
        size_y: ry as f32,
        resolution_x: rx,
        resolution_y: ry,
        lock_corners: false,
        ..Default::default()
    })
    .unwrap()
}

// ─── Construction Tests ───────────────────────────────────────

#[test]
fn all_buffers_share_length() {
    let cloth = free_cloth(4, 7);
    assert_eq!(cloth.point_count(), 28);
    assert_eq!(cloth.positions_old().len(), 28);
    assert_eq!(cloth.positions_new().len(), 28);
    assert_eq!(cloth.velocities().len(), 28);
    assert_eq!(cloth.accelerations().len(), 28);
    assert_eq!(cloth.normals().len(), 28);
    assert_eq!(cloth.uvs().len(), 28);
    assert_eq!(cloth.fixed().len(), 28);
    assert!(cloth.validate().is_ok());
}

#[test]
fn starts_at_rest_on_grid() {
    let cloth = free_cloth(3, 3);
    assert_eq!(cloth.positions()[cloth.index(2, 1).unwrap()], Vec3::new(2.0, 1.0, 0.5));
    assert_eq!(cloth.positions(), cloth.positions_old());
    assert_eq!(cloth.positions(), cloth.positions_new());
    assert!(cloth.velocities().iter().all(|v| *v == Vec3::ZERO));
    assert!(cloth.accelerations().iter().all(|a| *a == Vec3::ZERO));
}

#[test]
fn initial_normals_point_up() {
    let cloth = free_cloth(3, 4);
    for n in cloth.normals() {
        assert!((*n - Vec3::Z).length() < 1e-5);
    }
}

#[test]
fn uv_spans_unit_square() {
    let cloth = free_cloth(3, 5);
    let last = cloth.index(2, 4).unwrap();
    assert_eq!(cloth.uvs()[0].to_array(), [0.0, 0.0]);
    assert_eq!(cloth.uvs()[last].to_array(), [1.0, 1.0]);
}

#[test]
fn zero_resolution_is_fatal() {
    let result = ClothState::new(ClothSettings {
        resolution_y: 0,
        ..Default::default()
    });
    assert!(matches!(result, Err(DrapeError::InvalidConfig(_))));
}

#[test]
fn corners_locked_by_default() {
    let cloth = ClothState::new(ClothSettings::default()).unwrap();
    assert!(cloth.corners_locked());
    assert_eq!(cloth.fixed().iter().filter(|f| **f).count(), 4);
}

// ─── Indexing Tests ───────────────────────────────────────────

#[test]
fn index_and_coord_agree() {
    let cloth = free_cloth(4, 3);
    for x in 0..4 {
        for y in 0..3 {
            let i = cloth.index(x, y).unwrap();
            let c = cloth.coord(i);
            assert_eq!((c.x, c.y), (x, y));
        }
    }
}

#[test]
fn index_out_of_range() {
    let cloth = free_cloth(4, 3);
    let err = cloth.index(1, 3).unwrap_err();
    assert!(matches!(err, DrapeError::IndexOutOfRange { x: 1, y: 3, .. }));
}

// ─── Substep Primitive Tests ──────────────────────────────────

#[test]
fn reset_acceleration_zeroes_everything() {
    let mut cloth = free_cloth(3, 3);
    for a in cloth.accelerations_mut() {
        *a = Vec3::new(1.0, -2.0, 3.0);
    }
    cloth.reset_acceleration();
    assert!(cloth.accelerations().iter().all(|a| *a == Vec3::ZERO));
}

#[test]
fn rotate_then_recompute_velocity() {
    let mut cloth = free_cloth(2, 2);
    let start = cloth.positions().to_vec();
    {
        let buffers = cloth.buffers_mut();
        for (new, p) in buffers.position_new.iter_mut().zip(buffers.position.iter()) {
            *new = *p + Vec3::new(0.0, 0.0, -0.25);
        }
    }
    cloth.rotate_buffers();
    cloth.recompute_velocities();

    assert_eq!(cloth.positions_old(), &start[..]);
    assert!(cloth.positions_new().iter().all(|p| *p == Vec3::ZERO));
    for v in cloth.velocities() {
        assert!((*v - Vec3::new(0.0, 0.0, -0.25)).length() < 1e-6);
    }
}

// ─── Pinning Tests ────────────────────────────────────────────

#[test]
fn lock_border_pins_outer_ring_only() {
    let mut cloth = free_cloth(4, 4);
    cloth.lock_border(true);
    assert!(cloth.border_locked());
    assert_eq!(cloth.fixed().iter().filter(|f| **f).count(), 12);
    assert!(!cloth.fixed()[cloth.index(1, 1).unwrap()]);

    cloth.lock_border(false);
    assert!(!cloth.border_locked());
    assert!(cloth.fixed().iter().all(|f| !*f));
}

#[test]
fn set_fixed_checks_bounds() {
    let mut cloth = free_cloth(3, 3);
    cloth.set_fixed(1, 2, true).unwrap();
    assert!(cloth.fixed()[cloth.index(1, 2).unwrap()]);
    assert!(cloth.set_fixed(3, 0, true).is_err());
}

// ─── Reset Tests ──────────────────────────────────────────────

#[test]
fn reset_restores_initial_grid() {
    let settings = ClothSettings {
        origin: Vec3::new(-1.0, 2.5, 0.25),
        size_x: 3.3,
        size_y: 1.7,
        resolution_x: 6,
        resolution_y: 4,
        starting_height: 2.0,
        ..Default::default()
    };
    let mut cloth = ClothState::new(settings).unwrap();
    let initial = cloth.positions().to_vec();

    for p in cloth.positions_mut() {
        *p += Vec3::new(0.3, -0.1, -4.0);
    }
    cloth.set_fixed(2, 2, true).unwrap();
    cloth.lock_border(true);
    cloth.reset_to_rest();

    assert!(!cloth.border_locked());
    assert!(cloth.corners_locked());
    assert_eq!(cloth.positions(), &initial[..]);
    assert_eq!(cloth.positions_old(), &initial[..]);
    assert!(!cloth.fixed()[cloth.index(2, 2).unwrap()]);
    assert!(cloth.fixed()[0]);
    assert!(cloth.velocities().iter().all(|v| *v == Vec3::ZERO));
}

// ─── Render Buffer Tests ──────────────────────────────────────

#[test]
fn render_buffers_interleave_position_normal_uv() {
    let cloth = free_cloth(3, 2);
    let buffers = RenderBuffers::from_state(&cloth);
    assert_eq!(buffers.vertex_count(), 6);
    assert_eq!(buffers.indices.len(), 2 * 2 * 3);

    let i = cloth.index(1, 1).unwrap();
    let rec = &buffers.vertices[i * VERTEX_STRIDE..(i + 1) * VERTEX_STRIDE];
    let p = cloth.positions()[i];
    assert_eq!(&rec[0..3], &[p.x, p.y, p.z]);
    assert!((rec[5] - 1.0).abs() < 1e-5);
    assert_eq!(&rec[6..8], &[0.5, 1.0]);
}

#[test]
fn settings_toml_defaults_fill_missing_fields() {
    let settings: ClothSettings = toml::from_str("resolution_x = 8\nmass = 2.0\n").unwrap();
    assert_eq!(settings.resolution_x, 8);
    assert_eq!(settings.resolution_y, 5);
    assert_eq!(settings.mass, 2.0);
}
