//! The curtain's vertex buffer.
//!
//! One `TriangleMesh` is the buffer a renderer uploads and the fold
//! kernel or the physics bridge rewrites in place every frame. Positions
//! and normals are kept as separate per-axis channels so the kernel can
//! touch only the Y and Z channels it changes. Loaders hand geometry over
//! interleaved; [`TriangleMesh::from_interleaved`] and
//! [`TriangleMesh::to_interleaved`] convert at the edges.
//!
//! Positions are in mesh-local space. The curtain transform that places
//! the mesh in the scene lives with the curtain, not here.

use pleat_math::Vec3;
use pleat_types::{PleatError, PleatResult};
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// Mutable curtain geometry: per-axis position and normal channels plus
/// a flat triangle index list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    /// Depth channel; the fold kernel offsets this one.
    pub pos_z: Vec<f32>,

    /// Unit vertex normals, zero until first computed.
    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    /// Flat triangle list `[a0, b0, c0, a1, b1, c1, ...]`. Empty for
    /// point-only buffers, which fold fine but cannot be grid-checked.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if there is nothing to fold or drape.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.position(i))
    }

    #[inline]
    pub fn normal_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let tri = &self.indices[t * 3..t * 3 + 3];
        [tri[0], tri[1], tri[2]]
    }

    /// Overwrites one vertex. Used by the physics bridge when copying
    /// simulated nodes back into the buffer.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: f32, y: f32, z: f32) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Bounds of the current positions, `None` for an empty buffer.
    ///
    /// Rest heights are normalized against the Y extent of this box.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_soa(&self.pos_x, &self.pos_y, &self.pos_z)
    }

    /// Empty buffer with room for `vertices` vertices and `triangles`
    /// triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        let channel = || Vec::with_capacity(vertices);
        Self {
            pos_x: channel(),
            pos_y: channel(),
            pos_z: channel(),
            normal_x: channel(),
            normal_y: channel(),
            normal_z: channel(),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Checks that every channel has one entry per vertex and that each
    /// triangle names three distinct, existing vertices.
    pub fn validate(&self) -> PleatResult<()> {
        let n = self.vertex_count();

        let channels = [
            ("pos_y", self.pos_y.len()),
            ("pos_z", self.pos_z.len()),
            ("normal_x", self.normal_x.len()),
            ("normal_y", self.normal_y.len()),
            ("normal_z", self.normal_z.len()),
        ];
        if let Some((name, len)) = channels.iter().find(|(_, len)| *len != n) {
            return Err(PleatError::InvalidMesh(format!(
                "{name} has {len} entries for {n} vertices"
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(PleatError::InvalidMesh(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if let Some(&bad) = [a, b, c].iter().find(|&&v| v as usize >= n) {
                return Err(PleatError::InvalidMesh(format!(
                    "triangle {t} references vertex {bad}, buffer has {n}"
                )));
            }
            if a == b || b == c || a == c {
                return Err(PleatError::InvalidMesh(format!(
                    "triangle {t} repeats a vertex: [{a}, {b}, {c}]"
                )));
            }
        }

        Ok(())
    }

    /// Builds a buffer from interleaved `[x0, y0, z0, x1, ...]` positions,
    /// the layout scene loaders hand over.
    ///
    /// Normals start at zero; preparing the mesh fills them.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> PleatResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(PleatError::InvalidMesh(format!(
                "{} position floats do not form whole vertices",
                positions.len()
            )));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);
        for xyz in positions.chunks_exact(3) {
            mesh.pos_x.push(xyz[0]);
            mesh.pos_y.push(xyz[1]);
            mesh.pos_z.push(xyz[2]);
        }
        mesh.normal_x.resize(n, 0.0);
        mesh.normal_y.resize(n, 0.0);
        mesh.normal_z.resize(n, 0.0);
        mesh.indices.extend_from_slice(indices);

        mesh.validate()?;
        Ok(mesh)
    }

    /// Positions in the interleaved layout a renderer uploads.
    pub fn to_interleaved(&self) -> Vec<f32> {
        (0..self.vertex_count()).flat_map(|i| self.position(i)).collect()
    }

    /// Normals in the interleaved layout a renderer uploads.
    pub fn normals_interleaved(&self) -> Vec<f32> {
        (0..self.vertex_count())
            .flat_map(|i| self.normal_vec3(i).to_array())
            .collect()
    }
}
