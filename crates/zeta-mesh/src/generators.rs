//! Procedural mesh generators for tests and demos.
//!
//! These generators produce deterministic meshes with consistent
//! counter-clockwise winding.

use glam::Vec3;

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y,
/// centered at the origin at Z=0.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Y (vertex count = rows + 1).
/// - `width`: Total width.
/// - `height`: Total height.
///
/// # Example
/// ```
/// use zeta_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols.max(1) as f32;
            let v = j as f32 / rows.max(1) as f32;
            mesh.push_vertex(Vec3::new(-half_w + u * width, half_h - v * height, 0.0));
        }
    }

    // Two triangles per quad, split along the top-right/bottom-left diagonal.
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.push_triangle([top_left, bot_left, top_right]);
            mesh.push_triangle([top_right, bot_left, bot_right]);
        }
    }

    mesh
}

/// Generates a closed regular octahedron centered at the origin.
///
/// 6 vertices, 12 edges, 8 outward-facing triangles; every edge is
/// shared by exactly two triangles.
pub fn octahedron(radius: f32) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(6, 8);
    for axis in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
        mesh.push_vertex(axis * radius);
    }

    // 0:+X 1:-X 2:+Y 3:-Y 4:+Z 5:-Z
    for tri in [
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ] {
        mesh.push_triangle(tri);
    }

    mesh
}

/// Two triangles sharing the edge (1, 2): `(0, 1, 2)` and `(1, 3, 2)`.
pub fn two_triangles() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(4, 2);
    mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0));
    mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0));
    mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0));
    mesh.push_vertex(Vec3::new(1.0, 1.0, 0.0));
    mesh.push_triangle([0, 1, 2]);
    mesh.push_triangle([1, 3, 2]);
    mesh
}
