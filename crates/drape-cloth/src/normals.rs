//! Vertex normal computation from the cloth's render triangles.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle.

use drape_math::Vec3;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's face normal (weighted by its area) is accumulated
/// at each vertex, then normalized. Vertices with no surrounding area
/// keep a zero normal.
pub fn compute_vertex_normals(positions: &[Vec3], triangles: &[u32], normals: &mut [Vec3]) {
    normals.fill(Vec3::ZERO);

    for tri in triangles.chunks_exact(3) {
        let a = tri[0] as usize;
        let b = tri[1] as usize;
        let c = tri[2] as usize;

        // Magnitude = 2 × triangle area
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);

        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
}
