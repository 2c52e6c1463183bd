//! Verlet position update with floor pinning.
//!
//! ```text
//! x_new = x + v + a · dt² / substeps      (free, above floor)
//! x_new = (x.x, x.y, floor), pin           (free, at or below floor)
//! x_new = x                                (pinned)
//! ```
//!
//! Landing on the floor is terminal: the point stays pinned until the
//! cloth is reset.

use drape_cloth::ClothState;
use rayon::prelude::*;

/// Write `position_new` for every point. Returns how many points landed on
/// the floor during this call.
///
/// `acceleration_scale` is `dt² / substeps`.
pub fn integrate(state: &mut ClothState, acceleration_scale: f32) -> usize {
    let floor = state.settings().floor_height;
    let buffers = state.buffers_mut();
    let position = &*buffers.position;
    let velocity = &*buffers.velocity;
    let acceleration = &*buffers.acceleration;

    buffers
        .position_new
        .par_iter_mut()
        .zip(buffers.is_fixed.par_iter_mut())
        .enumerate()
        .filter_map(|(i, (new, fixed))| {
            let p = position[i];
            if *fixed {
                *new = p;
                None
            } else if p.z > floor {
                *new = p + velocity[i] + acceleration[i] * acceleration_scale;
                None
            } else {
                *fixed = true;
                *new = p;
                new.z = floor;
                Some(())
            }
        })
        .count()
}
