//! Fold deformation kernel.
//!
//! ```text
//! eased  = smoothstep(p)
//! phase  = h · 2π · layers + π · eased
//! offset = sin(phase) · amount · eased
//! x' = x
//! y' = y · (1 − eased / 2)
//! z' = z + offset
//! ```
//!
//! `h` is the vertex's normalized rest height. At `p = 0` the output is
//! the rest pose exactly.

use std::f32::consts::{PI, TAU};

use pleat_math::smoothstep;
use pleat_mesh::TriangleMesh;
use pleat_types::{PleatError, PleatResult};

use crate::cache::RestPose;
use crate::params::FoldParams;

/// Deforms one rest position.
#[inline]
pub fn deform_vertex(rest: [f32; 3], height: f32, eased: f32, params: &FoldParams) -> [f32; 3] {
    let phase = height * TAU * params.layers as f32 + PI * eased;
    let offset = phase.sin() * params.amount * eased;
    [rest[0], rest[1] * (1.0 - eased * 0.5), rest[2] + offset]
}

/// Writes the deformed rest pose for `progress` into `mesh`.
pub fn deform_mesh(
    mesh: &mut TriangleMesh,
    rest: &RestPose,
    progress: f32,
    params: &FoldParams,
) -> PleatResult<()> {
    let n = rest.vertex_count();
    if mesh.vertex_count() != n {
        return Err(PleatError::InvalidMesh(format!(
            "vertex buffer has {} vertices, rest pose has {n}",
            mesh.vertex_count()
        )));
    }

    let eased = smoothstep(progress);
    let heights = rest.heights();
    for i in 0..n {
        let [x, y, z] = deform_vertex(rest.position(i), heights[i], eased, params);
        mesh.pos_x[i] = x;
        mesh.pos_y[i] = y;
        mesh.pos_z[i] = z;
    }
    Ok(())
}
