//! Structural spring accumulator.
//!
//! Each point sums the forces from its own links and writes only its own
//! acceleration, so points are processed in parallel. Every undirected
//! spring is therefore evaluated twice, once from each end.
//!
//! The damping term uses the velocity recomputed at the end of the
//! previous substep, which lags the positions by one substep.

use drape_cloth::ClothState;
use drape_math::Vec3;
use drape_types::constants::DEGENERATE_LENGTH;
use rayon::prelude::*;

use crate::config::TensionSettings;

/// Force on `p` from a spring to `q` with rest length `rest_length`.
///
/// `d = q - p` is used unnormalized:
/// `k·(|d| − l0)·d + c·((vq − vp)·d)·d`, then capped at `max_force`.
/// Returns zero when the endpoints coincide.
pub fn tension_force(
    p: Vec3,
    q: Vec3,
    vp: Vec3,
    vq: Vec3,
    rest_length: f32,
    settings: &TensionSettings,
) -> Vec3 {
    let d = q - p;
    let len = d.length();
    if len < DEGENERATE_LENGTH {
        return Vec3::ZERO;
    }
    let spring = settings.force * (len - rest_length) * d;
    let damping = settings.damping * (vq - vp).dot(d) * d;
    (spring + damping).clamp_length_max(settings.max_force)
}

/// Add the spring forces to every free point.
pub fn apply_tension(state: &mut ClothState, settings: &TensionSettings) {
    let buffers = state.buffers_mut();
    let position = &*buffers.position;
    let velocity = &*buffers.velocity;
    let is_fixed = &*buffers.is_fixed;
    let links = buffers.links;
    buffers
        .acceleration
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, acc)| {
            if is_fixed[i] {
                return;
            }
            for link in &links[i] {
                let j = link.neighbor as usize;
                *acc += tension_force(
                    position[i],
                    position[j],
                    velocity[i],
                    velocity[j],
                    link.rest_length,
                    settings,
                );
            }
        });
}
