//! Procedural mesh generators for curtains and tests.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! with counter-clockwise winding facing +Z.

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y,
/// centered at the origin at Z=0. Rows run top to bottom, columns left
/// to right, so vertex `(col, row)` has index `row * (cols + 1) + col`.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
/// - `width` — Total width in meters.
/// - `height` — Total height in meters.
///
/// # Example
/// ```
/// use pleat_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_y = rows + 1;

    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;

            mesh.pos_x.push(-half_w + u * width);
            mesh.pos_y.push(half_h - v * height); // Top to bottom
            mesh.pos_z.push(0.0);

            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(1.0);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.indices.extend_from_slice(&[top_left, bot_left, top_right]);
            mesh.indices.extend_from_slice(&[top_right, bot_left, bot_right]);
        }
    }

    mesh
}

/// Generates a square curtain panel hanging from `y = height` down to `y = 0`.
///
/// Same topology as [`quad_grid`] with `segments × segments` quads, shifted
/// so the bottom hem rests on the origin. Vertex count is
/// `(segments + 1)²`, the layout the soft-body patch expects.
///
/// ```
/// use pleat_mesh::generators::curtain_panel;
/// let mesh = curtain_panel(4, 2.0, 3.0);
/// assert_eq!(mesh.vertex_count(), 25);
/// assert_eq!(mesh.bounding_box().unwrap().min[1], 0.0);
/// ```
pub fn curtain_panel(segments: usize, width: f32, height: f32) -> TriangleMesh {
    let mut mesh = quad_grid(segments, segments, width, height);
    let half_h = height / 2.0;
    for y in &mut mesh.pos_y {
        *y += half_h;
    }
    mesh
}
