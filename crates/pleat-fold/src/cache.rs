//! Mesh arena with per-mesh rest-pose cache.
//!
//! Each mesh lives in a [`MeshRecord`] slot addressed by [`MeshId`].
//! Preparing a record captures its rest pose and the normalized height
//! of every vertex exactly once; the kernel reads both every frame.
//! Slots are never reused, so a disposed id cannot alias a new mesh.

use pleat_mesh::normals::compute_vertex_normals;
use pleat_mesh::TriangleMesh;
use pleat_types::constants::EPSILON;
use pleat_types::{MeshId, PleatError, PleatResult};
use serde::{Deserialize, Serialize};

/// Rest-pose snapshot plus normalized heights.
///
/// Read-only once captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestPose {
    pos_x: Vec<f32>,
    pos_y: Vec<f32>,
    pos_z: Vec<f32>,
    heights: Vec<f32>,
}

impl RestPose {
    /// Copies the mesh positions and computes `(y - min_y) / (max_y - min_y)`
    /// per vertex in a single pass.
    ///
    /// Returns `None` for a mesh without vertices. A flat mesh
    /// (`max_y - min_y <= EPSILON`) gets height `0.0` everywhere.
    pub fn capture(mesh: &TriangleMesh) -> Option<Self> {
        let bounds = mesh.bounding_box()?;
        let min_y = bounds.min[1];
        let range = bounds.height();
        let inv_range = if range > EPSILON { 1.0 / range } else { 0.0 };

        let n = mesh.vertex_count();
        let mut rest = Self {
            pos_x: Vec::with_capacity(n),
            pos_y: Vec::with_capacity(n),
            pos_z: Vec::with_capacity(n),
            heights: Vec::with_capacity(n),
        };
        for i in 0..n {
            let [x, y, z] = mesh.position(i);
            rest.pos_x.push(x);
            rest.pos_y.push(y);
            rest.pos_z.push(z);
            rest.heights.push(((y - min_y) * inv_range).clamp(0.0, 1.0));
        }
        Some(rest)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Normalized rest height of each vertex, in `[0, 1]`.
    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Copies the rest positions back into `mesh`.
    pub fn restore(&self, mesh: &mut TriangleMesh) -> PleatResult<()> {
        if mesh.vertex_count() != self.vertex_count() {
            return Err(PleatError::InvalidMesh(format!(
                "vertex buffer has {} vertices, rest pose has {}",
                mesh.vertex_count(),
                self.vertex_count()
            )));
        }
        mesh.pos_x.copy_from_slice(&self.pos_x);
        mesh.pos_y.copy_from_slice(&self.pos_y);
        mesh.pos_z.copy_from_slice(&self.pos_z);
        Ok(())
    }
}

/// Appearance defaults handed to whatever renders the curtain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadingHints {
    /// sRGB base colour as `0xRRGGBB`.
    pub base_color: u32,
    pub double_sided: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for ShadingHints {
    fn default() -> Self {
        Self {
            base_color: 0xebd8a9,
            double_sided: true,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

impl ShadingHints {
    /// Base colour as sRGB `[r, g, b]` in `[0, 1]`.
    pub fn base_color_rgb(&self) -> [f32; 3] {
        let c = self.base_color;
        [
            ((c >> 16) & 0xff) as f32 / 255.0,
            ((c >> 8) & 0xff) as f32 / 255.0,
            (c & 0xff) as f32 / 255.0,
        ]
    }
}

/// What [`MeshArena::prepare`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// Rest pose captured for the first time.
    Prepared,
    /// Already prepared; nothing changed.
    Cached,
    /// The mesh has no vertices.
    Skipped,
}

/// A mesh and its cached data.
#[derive(Debug, Clone)]
pub struct MeshRecord {
    /// The live vertex buffer.
    pub mesh: TriangleMesh,
    rest: Option<RestPose>,
    shading: Option<ShadingHints>,
}

impl MeshRecord {
    pub fn rest(&self) -> Option<&RestPose> {
        self.rest.as_ref()
    }

    pub fn shading(&self) -> Option<&ShadingHints> {
        self.shading.as_ref()
    }

    pub fn is_prepared(&self) -> bool {
        self.rest.is_some()
    }

    /// Mutable vertex buffer alongside the read-only rest pose.
    pub fn split_mut(&mut self) -> (&mut TriangleMesh, Option<&RestPose>) {
        (&mut self.mesh, self.rest.as_ref())
    }
}

/// Arena of mesh records.
#[derive(Debug, Default)]
pub struct MeshArena {
    slots: Vec<Option<MeshRecord>>,
}

impl MeshArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a mesh and returns its slot.
    pub fn insert(&mut self, mesh: TriangleMesh) -> MeshId {
        let id = MeshId(self.slots.len() as u32);
        self.slots.push(Some(MeshRecord {
            mesh,
            rest: None,
            shading: None,
        }));
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshRecord> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut MeshRecord> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Like [`get_mut`](Self::get_mut), failing with `UnknownMesh`.
    pub fn record_mut(&mut self, id: MeshId) -> PleatResult<&mut MeshRecord> {
        self.get_mut(id).ok_or(PleatError::UnknownMesh(id))
    }

    /// Live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &MeshRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (MeshId(i as u32), r)))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Captures the rest pose and height table of a mesh.
    ///
    /// Idempotent: later calls return [`PrepareOutcome::Cached`] and leave
    /// the record untouched. First preparation also computes vertex
    /// normals and assigns default shading hints if none are set.
    pub fn prepare(&mut self, id: MeshId) -> PleatResult<PrepareOutcome> {
        let record = self.record_mut(id)?;
        if record.rest.is_some() {
            return Ok(PrepareOutcome::Cached);
        }

        let Some(rest) = RestPose::capture(&record.mesh) else {
            tracing::warn!(mesh = id.0, "mesh has no vertices, skipping fold preparation");
            return Ok(PrepareOutcome::Skipped);
        };

        tracing::debug!(mesh = id.0, vertex_count = rest.vertex_count(), "rest pose captured");
        record.rest = Some(rest);
        record.shading.get_or_insert_with(ShadingHints::default);
        compute_vertex_normals(&mut record.mesh);
        Ok(PrepareOutcome::Prepared)
    }

    /// Overrides the shading hints. The rest pose is not touched.
    pub fn set_shading(&mut self, id: MeshId, hints: ShadingHints) -> PleatResult<()> {
        self.record_mut(id)?.shading = Some(hints);
        Ok(())
    }

    /// Releases a record together with its cached data.
    pub fn dispose(&mut self, id: MeshId) -> PleatResult<MeshRecord> {
        let record = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(PleatError::UnknownMesh(id))?;
        tracing::debug!(mesh = id.0, "mesh disposed");
        Ok(record)
    }
}
