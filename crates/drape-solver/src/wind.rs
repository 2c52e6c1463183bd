//! Wind accumulator.
//!
//! Wind pushes along its direction, scaled by how squarely each point's
//! normal faces it. Surfaces facing away receive nothing.

use std::f32::consts::TAU;

use drape_cloth::ClothState;
use rayon::prelude::*;

use crate::config::WindSettings;

/// Oscillation factor in `[0, 1]` at simulation time `time`.
#[inline]
pub fn oscillation(settings: &WindSettings, time: f32) -> f32 {
    if settings.oscillate {
        0.5 * (TAU * settings.frequency * time).sin() + 0.5
    } else {
        1.0
    }
}

/// Add wind to every point at simulation time `time`.
///
/// Pinned points are included unless `affect_fixed_points` is off; the
/// integrator ignores their acceleration either way.
pub fn apply_wind(state: &mut ClothState, settings: &WindSettings, time: f32) {
    let Some(dir) = settings.direction.try_normalize() else {
        return;
    };
    let gust = dir * settings.amplitude * oscillation(settings, time);
    let include_fixed = settings.affect_fixed_points;

    let buffers = state.buffers_mut();
    let normal = buffers.normal;
    let is_fixed = &*buffers.is_fixed;
    buffers
        .acceleration
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, acc)| {
            if is_fixed[i] && !include_fixed {
                return;
            }
            let facing = normal[i].dot(dir).clamp(0.0, 1.0);
            *acc += gust * facing;
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use drape_cloth::ClothSettings;
    use drape_math::Vec3;

    fn flat_cloth() -> ClothState {
        ClothState::new(ClothSettings {
            resolution_x: 2,
            resolution_y: 2,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn oscillation_range() {
        let s = WindSettings { frequency: 2.0, ..Default::default() };
        assert!((oscillation(&s, 0.0) - 0.5).abs() < 1e-6);
        assert!((oscillation(&s, 0.125) - 1.0).abs() < 1e-5);
        assert!(oscillation(&s, 0.375).abs() < 1e-5);
        let steady = WindSettings { oscillate: false, ..s };
        assert_eq!(oscillation(&steady, 0.375), 1.0);
    }

    #[test]
    fn edge_on_wind_has_no_effect() {
        // Flat cloth normals are +Z, default wind blows along +X.
        let mut cloth = flat_cloth();
        apply_wind(&mut cloth, &WindSettings::default(), 0.25);
        assert!(cloth.accelerations().iter().all(|a| a.length() < 1e-6));
    }

    #[test]
    fn facing_wind_pushes_all_points() {
        let mut cloth = flat_cloth();
        let s = WindSettings {
            direction: Vec3::new(0.0, 0.0, 2.0),
            amplitude: 3.0,
            oscillate: false,
            ..Default::default()
        };
        apply_wind(&mut cloth, &s, 0.0);
        for a in cloth.accelerations() {
            assert!((*a - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        }
    }

    #[test]
    fn fixed_points_can_be_excluded() {
        let mut cloth = flat_cloth();
        let s = WindSettings {
            direction: Vec3::Z,
            oscillate: false,
            affect_fixed_points: false,
            ..Default::default()
        };
        apply_wind(&mut cloth, &s, 0.0);
        // All four points of a 2x2 grid are locked corners.
        assert!(cloth.accelerations().iter().all(|a| *a == Vec3::ZERO));
    }
}
