//! Uniform-grid spatial hash for point proximity queries.
//!
//! Partitions space into cubic cells and bins points by the cell that
//! contains them. Close pairs are found by scanning each cell against its
//! 26 neighbours and itself.

use std::collections::HashMap;

use drape_math::{IVec3, Vec3};
use rayon::prelude::*;

/// Spatial hash over point indices.
///
/// Cell size should be about twice the proximity threshold.
pub struct SpatialHash {
    cell_size: f32,
    /// Inverse cell size (cached for performance).
    inv_cell_size: f32,
    grid: HashMap<IVec3, Vec<u32>>,
}

/// A pair of point indices with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidatePair {
    pub a: u32,
    pub b: u32,
}

impl SpatialHash {
    /// Create a new spatial hash with the given cell size.
    ///
    /// `cell_size` must be positive and finite; callers validate it with
    /// the rest of the self-collision settings.
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "spatial hash cell_size must be positive, got {cell_size}"
        );
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            grid: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `p`: `floor(p / cell_size)` per axis.
    #[inline]
    pub fn cell_key(&self, p: Vec3) -> IVec3 {
        (p * self.inv_cell_size).floor().as_ivec3()
    }

    /// Re-bin every point. Previous contents are discarded.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        self.grid.clear();
        for (i, &p) in positions.iter().enumerate() {
            let key = self.cell_key(p);
            self.grid.entry(key).or_default().push(i as u32);
        }
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Points binned in cell `key`.
    pub fn cell(&self, key: IVec3) -> &[u32] {
        self.grid.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All pairs closer than `max_distance`, each reported once with `a < b`.
    ///
    /// Cells are scanned in parallel; the output is sorted so results do not
    /// depend on thread scheduling.
    pub fn query_pairs(&self, positions: &[Vec3], max_distance: f32) -> Vec<CandidatePair> {
        let max2 = max_distance * max_distance;
        let mut keys: Vec<IVec3> = self.grid.keys().copied().collect();
        keys.sort_unstable_by_key(|k| k.to_array());

        let mut pairs: Vec<CandidatePair> = keys
            .par_iter()
            .flat_map_iter(|&key| {
                let mut local = Vec::new();
                let here = self.cell(key);
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let there = self.cell(key + IVec3::new(dx, dy, dz));
                            for &a in here {
                                for &b in there {
                                    if a >= b {
                                        continue;
                                    }
                                    let d2 = positions[a as usize]
                                        .distance_squared(positions[b as usize]);
                                    if d2 < max2 {
                                        local.push(CandidatePair { a, b });
                                    }
                                }
                            }
                        }
                    }
                }
                local
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}
