//! Gravity accumulator.

use drape_cloth::ClothState;
use rayon::prelude::*;

use crate::config::GravitySettings;

/// Add `direction * amplitude / mass` to every free, gravity-affected point
/// at or above the floor.
pub fn apply_gravity(state: &mut ClothState, settings: &GravitySettings) {
    let floor = state.settings().floor_height;
    let accel = settings.direction * settings.amplitude / state.settings().mass;

    let buffers = state.buffers_mut();
    let position = &*buffers.position;
    let is_fixed = &*buffers.is_fixed;
    let affected = buffers.is_affected_gravity;
    buffers
        .acceleration
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, acc)| {
            if !is_fixed[i] && affected[i] && position[i].z >= floor {
                *acc += accel;
            }
        });
}
