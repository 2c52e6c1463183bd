//! Strongly-typed grid coordinates.
//!
//! Console and input paths address cloth points by `(x, y)` grid
//! position; the newtype keeps those apart from flat buffer indices.

use serde::{Deserialize, Serialize};

/// A 2D coordinate on the cloth grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: usize,
    pub y: usize,
}

impl GridCoord {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}
