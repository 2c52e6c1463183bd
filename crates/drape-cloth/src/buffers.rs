//! Render buffers regenerated from the cloth state.
//!
//! The layout matches what a GPU vertex buffer expects: one interleaved
//! record per point, in flat index order, plus the triangle index list.

use crate::state::ClothState;

/// Floats per interleaved vertex: position (3), normal (3), uv (2).
pub const VERTEX_STRIDE: usize = 8;

/// Interleaved vertex data and triangle indices for one cloth snapshot.
#[derive(Debug, Clone, Default)]
pub struct RenderBuffers {
    /// `[px, py, pz, nx, ny, nz, u, v]` per point.
    pub vertices: Vec<f32>,
    /// Triangle indices into the vertex records.
    pub indices: Vec<u32>,
}

impl RenderBuffers {
    /// Build buffers for the current state.
    pub fn from_state(state: &ClothState) -> Self {
        let mut buffers = Self {
            vertices: Vec::with_capacity(state.point_count() * VERTEX_STRIDE),
            indices: state.topology().triangles.clone(),
        };
        buffers.refresh(state);
        buffers
    }

    /// Rewrite the vertex records in place. Indices never change.
    pub fn refresh(&mut self, state: &ClothState) {
        self.vertices.clear();
        for ((p, n), uv) in state
            .positions()
            .iter()
            .zip(state.normals())
            .zip(state.uvs())
        {
            self.vertices
                .extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, uv.x, uv.y]);
        }
    }

    /// Number of vertex records.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }
}
