//! Curtain snapshot serialization.
//!
//! A snapshot captures the live vertex buffer of one mesh together
//! with the fold state at a given frame.

use std::path::Path;

use pleat_mesh::TriangleMesh;
use pleat_types::{PleatError, PleatResult};
use serde::{Deserialize, Serialize};

/// Vertex buffer and fold state at one frame.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurtainSnapshot {
    /// Frame counter when the snapshot was taken.
    pub frame: u64,
    /// Fold progress in `[0, 1]`.
    pub progress: f32,
    /// True if the fold target was the folded state.
    pub folded: bool,
    /// Name of the driver that produced the buffer.
    pub mode: String,
    /// Vertex positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Vertex normals (flat).
    pub normals: Vec<f32>,
    /// Number of vertices.
    pub vertex_count: usize,
}

impl CurtainSnapshot {
    /// Captures the current buffer of `mesh`.
    pub fn capture(
        frame: u64,
        progress: f32,
        folded: bool,
        mode: &str,
        mesh: &TriangleMesh,
    ) -> Self {
        Self {
            frame,
            progress,
            folded,
            mode: mode.to_string(),
            positions: mesh.to_interleaved(),
            normals: mesh.normals_interleaved(),
            vertex_count: mesh.vertex_count(),
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> PleatResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| PleatError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> PleatResult<Self> {
        let snapshot: Self = bincode::deserialize(data).map_err(|e| {
            PleatError::Serialization(format!("Snapshot deserialization failed: {e}"))
        })?;
        if snapshot.positions.len() != snapshot.vertex_count * 3 {
            return Err(PleatError::Serialization(format!(
                "Snapshot holds {} position values for {} vertices",
                snapshot.positions.len(),
                snapshot.vertex_count
            )));
        }
        Ok(snapshot)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> PleatResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> PleatResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    /// Smallest and largest Y over all vertices.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        let ys = self.positions.iter().skip(1).step_by(3).copied();
        ys.fold(None, |range, y| match range {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }

    /// Largest absolute Z over all vertices (pleat depth in local space).
    pub fn max_depth(&self) -> f32 {
        self.positions
            .iter()
            .skip(2)
            .step_by(3)
            .fold(0.0f32, |acc, z| acc.max(z.abs()))
    }
}
