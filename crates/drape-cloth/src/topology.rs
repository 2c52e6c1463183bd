//! Grid topology.
//!
//! Built once from the cloth resolution and never changed afterwards.
//! Points are referenced by flat index (`x * resolution_y + y`), so the
//! neighbour graph is plain data with no shared ownership.

use drape_types::{DrapeError, DrapeResult};

use crate::settings::ClothSettings;

/// A structural spring from the owning point to one grid neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringLink {
    /// Flat index of the neighbour.
    pub neighbor: u32,
    /// Spring length at rest (grid spacing along the link's axis).
    pub rest_length: f32,
}

/// Precomputed topology of a cloth grid.
///
/// Provides:
/// - Structural springs to the 4-connected neighbours (left, right, down, up)
/// - Render triangles, two per grid quad
#[derive(Debug, Clone)]
pub struct GridTopology {
    resolution_x: usize,
    resolution_y: usize,

    /// For each point, its spring links. An undirected edge appears once in
    /// each endpoint's list.
    pub links: Vec<Vec<SpringLink>>,

    /// Triangle indices, flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    /// Wound so the rest-pose normal is +Z.
    pub triangles: Vec<u32>,
}

/// Maps a grid coordinate to its flat index.
#[inline]
pub fn grid_index(
    x: usize,
    y: usize,
    resolution_x: usize,
    resolution_y: usize,
) -> DrapeResult<usize> {
    if x >= resolution_x || y >= resolution_y {
        return Err(DrapeError::IndexOutOfRange {
            x,
            y,
            resolution_x,
            resolution_y,
        });
    }
    Ok(x * resolution_y + y)
}

impl GridTopology {
    /// Build springs and triangles for the grid described by `settings`.
    pub fn build(settings: &ClothSettings) -> Self {
        let rx = settings.resolution_x;
        let ry = settings.resolution_y;
        let gap_x = settings.spacing_x();
        let gap_y = settings.spacing_y();

        // Indices below are always in range; the checked path is for callers.
        let idx = |x: usize, y: usize| (x * ry + y) as u32;

        let mut links: Vec<Vec<SpringLink>> = vec![Vec::with_capacity(4); rx * ry];
        for x in 0..rx {
            for y in 0..ry {
                let list = &mut links[x * ry + y];
                if x > 0 {
                    list.push(SpringLink { neighbor: idx(x - 1, y), rest_length: gap_x });
                }
                if x + 1 < rx {
                    list.push(SpringLink { neighbor: idx(x + 1, y), rest_length: gap_x });
                }
                if y > 0 {
                    list.push(SpringLink { neighbor: idx(x, y - 1), rest_length: gap_y });
                }
                if y + 1 < ry {
                    list.push(SpringLink { neighbor: idx(x, y + 1), rest_length: gap_y });
                }
            }
        }

        let quads = rx.saturating_sub(1) * ry.saturating_sub(1);
        let mut triangles = Vec::with_capacity(quads * 6);
        for x in 0..rx.saturating_sub(1) {
            for y in 0..ry.saturating_sub(1) {
                let i0 = idx(x, y);
                let i1 = idx(x + 1, y);
                let i2 = idx(x + 1, y + 1);
                let i3 = idx(x, y + 1);

                triangles.extend_from_slice(&[i0, i1, i2]);
                triangles.extend_from_slice(&[i0, i2, i3]);
            }
        }

        Self {
            resolution_x: rx,
            resolution_y: ry,
            links,
            triangles,
        }
    }

    /// Flat index of `(x, y)`, or an out-of-range error.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> DrapeResult<usize> {
        grid_index(x, y, self.resolution_x, self.resolution_y)
    }

    /// Number of render triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of undirected structural springs.
    pub fn spring_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum::<usize>() / 2
    }
}
