//! Vertex normal computation from triangle mesh data.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle.

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's face normal (weighted by its area) is accumulated
/// at each vertex and the result is normalized. Vertices that touch no
/// triangle end up with a zero normal.
///
/// This modifies the mesh's `normal_x`, `normal_y`, `normal_z` arrays in place,
/// resizing them first if a loader left them short.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();

    mesh.normal_x.clear();
    mesh.normal_y.clear();
    mesh.normal_z.clear();
    mesh.normal_x.resize(n, 0.0);
    mesh.normal_y.resize(n, 0.0);
    mesh.normal_z.resize(n, 0.0);

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|v| v as usize);

        let pa = mesh.position_vec3(a);
        let e1 = mesh.position_vec3(b) - pa;
        let e2 = mesh.position_vec3(c) - pa;

        // Magnitude = 2 × triangle area
        let face = e1.cross(e2);

        for v in [a, b, c] {
            mesh.normal_x[v] += face.x;
            mesh.normal_y[v] += face.y;
            mesh.normal_z[v] += face.z;
        }
    }

    for i in 0..n {
        let len = mesh.normal_vec3(i).length();
        if len > 1e-10 {
            let inv = 1.0 / len;
            mesh.normal_x[i] *= inv;
            mesh.normal_y[i] *= inv;
            mesh.normal_z[i] *= inv;
        }
    }
}
