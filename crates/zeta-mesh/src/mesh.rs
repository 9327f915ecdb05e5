//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! Positions are stored one coordinate channel per array:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Triangles are a flat index buffer, three vertex ids per triangle.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use zeta_types::{ZetaError, ZetaResult};

/// What the topology builder consumes from a mesh.
///
/// Vertex ids returned by [`triangle`](Self::triangle) are 0-based and
/// must lie in `[0, vertex_count())`; this is not checked by consumers.
pub trait TriangleSource {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn triangle_count(&self) -> usize;

    /// The three vertex ids of triangle `t`.
    fn triangle(&self, t: usize) -> [u32; 3];
}

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// Triangle indices, three per triangle: [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// All positions, interleaved into `Vec3`s.
    pub fn positions_vec3(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position_vec3(i)).collect()
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Appends a vertex and returns its id.
    pub fn push_vertex(&mut self, p: Vec3) -> u32 {
        let id = self.vertex_count() as u32;
        self.pos_x.push(p.x);
        self.pos_y.push(p.y);
        self.pos_z.push(p.z);
        id
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All position arrays have the same length
    /// - Index count is a multiple of three
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    ///
    /// The topology builder does not call this; it trusts its input.
    pub fn validate(&self) -> ZetaResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(ZetaError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(ZetaError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(ZetaError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(ZetaError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved position data
    /// `[x0, y0, z0, x1, y1, z1, ...]` and a flat index buffer.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> ZetaResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(ZetaError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);
        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }
        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }

    /// Constructs a mesh from `Vec3` positions and index triples.
    pub fn from_positions(positions: &[Vec3], triangles: &[[u32; 3]]) -> ZetaResult<Self> {
        let mut mesh = Self::with_capacity(positions.len(), triangles.len());
        for &p in positions {
            mesh.push_vertex(p);
        }
        for &tri in triangles {
            mesh.push_triangle(tri);
        }

        mesh.validate()?;
        Ok(mesh)
    }
}

impl TriangleSource for TriangleMesh {
    fn vertex_count(&self) -> usize {
        TriangleMesh::vertex_count(self)
    }

    fn triangle_count(&self) -> usize {
        TriangleMesh::triangle_count(self)
    }

    fn triangle(&self, t: usize) -> [u32; 3] {
        TriangleMesh::triangle(self, t)
    }
}

/// Bare connectivity: a vertex count and index triples, no positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedTriangles {
    /// Number of vertices the triangles index into.
    pub vertex_count: usize,
    /// Three vertex ids per triangle.
    pub triangles: Vec<[u32; 3]>,
}

impl IndexedTriangles {
    pub fn new(vertex_count: usize, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertex_count,
            triangles,
        }
    }
}

impl TriangleSource for IndexedTriangles {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn triangle(&self, t: usize) -> [u32; 3] {
        self.triangles[t]
    }
}
