//! Mesh topology queries.
//!
//! Builds edge adjacency from the triangle index buffer. The grid
//! detector uses it to confirm that a vertex ordering really follows
//! the mesh's connectivity.

use std::collections::HashMap;

use crate::mesh::TriangleMesh;

/// Precomputed edge information for a triangle mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each canonical edge `(v_min, v_max)`, the adjacent triangles.
    edge_triangles: HashMap<(u32, u32), Vec<u32>>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let mut edge_triangles: HashMap<(u32, u32), Vec<u32>> = HashMap::new();

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_triangles
                    .entry(canonical(v0, v1))
                    .or_default()
                    .push(t as u32);
            }
        }

        Self { edge_triangles }
    }

    /// Number of unique edges.
    pub fn edge_count(&self) -> usize {
        self.edge_triangles.len()
    }

    /// True if `a` and `b` share an edge.
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.edge_triangles.contains_key(&canonical(a, b))
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .values()
            .filter(|tris| tris.len() == 1)
            .count()
    }
}

#[inline]
fn canonical(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
