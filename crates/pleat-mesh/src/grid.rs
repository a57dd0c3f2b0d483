//! Square-grid detection for soft-body patches.
//!
//! A soft-body patch is a `k × k` lattice of nodes. To drive an imported
//! mesh from such a patch we need to know which vertex each node lands
//! on. Rather than trusting buffer order, [`GridLayout::detect`] derives
//! the mapping from the rest geometry and then checks it against the
//! triangle connectivity.
//!
//! Node `(row, col)` has index `row * side + col`. Row 0 is the top edge
//! (largest Y); columns advance along the mesh's wider horizontal axis.

use pleat_types::{NodeId, PleatError, PleatResult};

use crate::mesh::TriangleMesh;
use crate::topology::Topology;

/// Explicit node→vertex correspondence for a square grid mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    side: usize,
    node_to_vertex: Vec<u32>,
}

impl GridLayout {
    /// Detects the grid layout of `mesh`.
    ///
    /// # Errors
    /// - [`PleatError::EmptyGeometry`] if the mesh has no vertices.
    /// - [`PleatError::TopologyMismatch`] if the vertex count is not a
    ///   perfect square of at least 4, or if the inferred ordering does
    ///   not follow the mesh edges.
    pub fn detect(mesh: &TriangleMesh) -> PleatResult<Self> {
        let n = mesh.vertex_count();
        if n == 0 {
            return Err(PleatError::EmptyGeometry(
                "cannot derive a grid from a mesh without vertices".into(),
            ));
        }

        let side = integer_sqrt(n);
        if side * side != n {
            return Err(PleatError::TopologyMismatch {
                vertex_count: n,
                reason: format!(
                    "sqrt(n) - 1 = {:.3} is not a whole segment count",
                    (n as f64).sqrt() - 1.0
                ),
            });
        }
        if side < 2 {
            return Err(PleatError::TopologyMismatch {
                vertex_count: n,
                reason: "a patch needs at least 2×2 vertices".into(),
            });
        }

        let node_to_vertex = order_vertices(mesh, side);
        let layout = Self {
            side,
            node_to_vertex,
        };

        if mesh.triangle_count() > 0 {
            layout.check_connectivity(mesh)?;
        } else {
            tracing::debug!(
                vertex_count = n,
                "mesh has no triangles; grid order inferred from positions only"
            );
        }

        Ok(layout)
    }

    /// Number of nodes along each edge of the grid.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of segments along each edge (`side - 1`).
    #[inline]
    pub fn segments(&self) -> usize {
        self.side - 1
    }

    /// Total node count (`side²`), equal to the mesh vertex count.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_to_vertex.len()
    }

    /// Node index of grid cell `(row, col)`.
    #[inline]
    pub fn node_index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    /// Vertex slot that node `node` writes into.
    #[inline]
    pub fn vertex_for(&self, node: NodeId) -> usize {
        self.node_to_vertex[node.index()] as usize
    }

    /// The full node→vertex map.
    pub fn node_to_vertex(&self) -> &[u32] {
        &self.node_to_vertex
    }

    fn check_connectivity(&self, mesh: &TriangleMesh) -> PleatResult<()> {
        let topology = Topology::build(mesh);
        let n = mesh.vertex_count();
        let at = |row: usize, col: usize| self.node_to_vertex[self.node_index(row, col)];

        for row in 0..self.side {
            for col in 0..self.side {
                let v = at(row, col);
                if col + 1 < self.side && !topology.has_edge(v, at(row, col + 1)) {
                    return Err(PleatError::TopologyMismatch {
                        vertex_count: n,
                        reason: format!(
                            "grid neighbours ({row}, {col}) and ({row}, {}) are not joined by an edge",
                            col + 1
                        ),
                    });
                }
                if row + 1 < self.side && !topology.has_edge(v, at(row + 1, col)) {
                    return Err(PleatError::TopologyMismatch {
                        vertex_count: n,
                        reason: format!(
                            "grid neighbours ({row}, {col}) and ({}, {col}) are not joined by an edge",
                            row + 1
                        ),
                    });
                }
            }
        }

        let expected = 4 * (self.side - 1);
        let boundary = topology.boundary_edge_count();
        if boundary != expected {
            return Err(PleatError::TopologyMismatch {
                vertex_count: n,
                reason: format!("expected {expected} boundary edges, found {boundary}"),
            });
        }

        Ok(())
    }
}

/// Sorts vertices into rows by descending Y, then each row by the wider
/// horizontal axis.
fn order_vertices(mesh: &TriangleMesh, side: usize) -> Vec<u32> {
    let horizontal = match mesh.bounding_box() {
        Some(b) if b.size()[2] > b.size()[0] => &mesh.pos_z,
        _ => &mesh.pos_x,
    };

    let mut order: Vec<u32> = (0..mesh.vertex_count() as u32).collect();
    order.sort_by(|&a, &b| {
        mesh.pos_y[b as usize]
            .total_cmp(&mesh.pos_y[a as usize])
            .then_with(|| horizontal[a as usize].total_cmp(&horizontal[b as usize]))
    });

    for row in order.chunks_mut(side) {
        row.sort_by(|&a, &b| horizontal[a as usize].total_cmp(&horizontal[b as usize]));
    }

    order
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
