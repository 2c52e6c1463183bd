//! Cloth self-collision.
//!
//! Pipeline per call:
//! 1. **Bin**: rebuild the spatial hash from current positions
//! 2. **Detect**: find all pairs closer than the minimum distance, in parallel
//! 3. **Reduce**: accumulate symmetric corrections per point, serially
//! 4. **Apply**: add the accumulated corrections to positions
//!
//! Corrections are computed from one snapshot of the positions and applied
//! afterwards, so the result does not depend on pair order.

use drape_cloth::ClothState;
use drape_math::Vec3;
use tracing::trace;

use crate::settings::SelfCollisionSettings;
use crate::spatial_hash::SpatialHash;

/// Self-collision system: bin → detect → reduce → apply.
pub struct SelfCollisionSystem {
    settings: SelfCollisionSettings,
    hash: SpatialHash,
    corrections: Vec<Vec3>,
}

/// Result of one self-collision pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfCollisionResult {
    /// Occupied hash cells.
    pub occupied_cells: u32,
    /// Pairs closer than the minimum distance.
    pub proximity_pairs: u32,
    /// Points whose position changed.
    pub corrections_applied: u32,
}

impl SelfCollisionSystem {
    pub fn new(settings: SelfCollisionSettings) -> Self {
        Self {
            hash: SpatialHash::new(settings.cell_size),
            settings,
            corrections: Vec::new(),
        }
    }

    pub fn settings(&self) -> &SelfCollisionSettings {
        &self.settings
    }

    /// Push every too-close pair apart to exactly `min_distance`.
    ///
    /// Each point of a pair moves half the overlap. If one point is fixed
    /// the free one takes the whole correction; pairs of fixed points are
    /// left alone. Coincident points have no defined direction and are
    /// skipped.
    pub fn solve(&mut self, state: &mut ClothState) -> SelfCollisionResult {
        let min = self.settings.min_distance;
        let min2 = min * min;

        self.hash.rebuild(state.positions());
        let pairs = self.hash.query_pairs(state.positions(), min);

        let n = state.point_count();
        self.corrections.clear();
        self.corrections.resize(n, Vec3::ZERO);

        let buffers = state.buffers_mut();
        let mut proximity = 0u32;
        for pair in &pairs {
            let (a, b) = (pair.a as usize, pair.b as usize);
            let offset = buffers.position[a] - buffers.position[b];
            let d2 = offset.length_squared();
            if d2 >= min2 || d2 <= f32::EPSILON {
                continue;
            }
            proximity += 1;

            let d = d2.sqrt();
            let half = offset / d * (0.5 * (min - d));
            match (buffers.is_fixed[a], buffers.is_fixed[b]) {
                (false, false) => {
                    self.corrections[a] += half;
                    self.corrections[b] -= half;
                }
                (false, true) => self.corrections[a] += 2.0 * half,
                (true, false) => self.corrections[b] -= 2.0 * half,
                (true, true) => {}
            }
        }

        let mut applied = 0u32;
        for (p, c) in buffers.position.iter_mut().zip(&self.corrections) {
            if *c != Vec3::ZERO {
                *p += *c;
                applied += 1;
            }
        }

        let result = SelfCollisionResult {
            occupied_cells: self.hash.cell_count() as u32,
            proximity_pairs: proximity,
            corrections_applied: applied,
        };
        trace!(?result, "self-collision pass");
        result
    }
}
