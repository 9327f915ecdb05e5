//! Mesh connectivity derived from the triangle index buffer.
//!
//! Every relation is computed on first request and cached until
//! [`TriMeshConnectionInfo::reset`]. Relations are built from each other:
//!
//! ```text
//! v2v ──▶ v2e (+ edge endpoints) ──▶ e2v ──▶ t2e
//!                                        └──▶ e2t
//! t2v ──▶ t2t
//! ```
//!
//! The relation names are historical and do not follow a single
//! "from-to" rule; the table is authoritative.
//!
//! | relation | indexed by | holds                                        |
//! |----------|------------|----------------------------------------------|
//! | `v2v`    | vertex     | adjacent vertices                            |
//! | `v2e`    | vertex     | edges whose lower endpoint is this vertex    |
//! | `e2v`    | vertex     | every incident edge                          |
//! | `t2v`    | vertex     | incident triangles                           |
//! | `t2e`    | edge       | up to two incident triangles                 |
//! | `e2t`    | triangle   | its three edges, local order 0-1, 1-2, 2-0   |
//! | `t2t`    | triangle   | neighbour across each local edge             |
//!
//! Input is trusted: out-of-range vertex ids panic on indexing, and
//! degenerate or non-manifold triangles give unspecified adjacency.

use zeta_containers::SetArray;
use zeta_types::{EdgeId, TriangleId, VertexId};

use crate::mesh::TriangleSource;

/// Stored in [`TriMeshConnectionInfo::e2t`] when a triangle side has no
/// edge (only possible for degenerate triangles).
pub const NO_EDGE: u32 = u32::MAX;

/// Which relations are currently cached.
#[derive(Debug, Clone, Copy, Default)]
struct Computed {
    v2v: bool,
    v2e: bool,
    e2v: bool,
    t2v: bool,
    t2e: bool,
    e2t: bool,
    t2t: bool,
}

/// Memoized adjacency relations of a triangle mesh.
///
/// Mutation and memoization both go through `&mut self`, so concurrent
/// first-time computation of a relation cannot race.
#[derive(Debug, Clone, Default)]
pub struct TriMeshConnectionInfo {
    num_vertices: usize,
    /// Triangle → vertex ids. Ground truth, never derived.
    triangles: Vec<[u32; 3]>,

    v2v: SetArray<u32>,
    v2e: SetArray<u32>,
    e2v: SetArray<u32>,
    t2v: SetArray<u32>,
    /// Edge → `[lo, hi]` endpoints, filled with `v2e`.
    edges: Vec<[u32; 2]>,
    t2e: Vec<[Option<u32>; 2]>,
    e2t: Vec<[u32; 3]>,
    t2t: Vec<[Option<u32>; 3]>,

    computed: Computed,
}

#[inline]
fn push_unique(list: &mut Vec<u32>, value: u32) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[inline]
fn directed_edges([a, b, c]: [u32; 3]) -> [(u32, u32); 3] {
    [(a, b), (b, c), (c, a)]
}

impl TriMeshConnectionInfo {
    /// Seeds from `mesh`. Nothing is computed yet.
    pub fn new<M: TriangleSource + ?Sized>(mesh: &M) -> Self {
        let mut info = Self::default();
        info.set(mesh);
        info
    }

    /// Re-seeds from `mesh` and drops every cached relation.
    pub fn set<M: TriangleSource + ?Sized>(&mut self, mesh: &M) {
        self.reset();
        self.num_vertices = mesh.vertex_count();
        self.triangles.clear();
        self.triangles
            .extend((0..mesh.triangle_count()).map(|t| mesh.triangle(t)));
    }

    /// Drops every cached relation. The next request recomputes from scratch.
    pub fn reset(&mut self) {
        self.v2v.reset();
        self.v2e.reset();
        self.e2v.reset();
        self.t2v.reset();
        self.edges.clear();
        self.t2e.clear();
        self.e2t.clear();
        self.t2t.clear();
        self.computed = Computed::default();
    }

    /// Number of vertices of the seeding mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of triangles of the seeding mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex ids of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        self.triangles[t]
    }

    /// Number of undirected edges. Computes `v2e` if needed.
    pub fn num_edges(&mut self) -> usize {
        self.calculate_v2e();
        self.edges.len()
    }

    /// Computes every relation.
    pub fn calculate_all(&mut self) {
        self.calculate_t2e();
        self.calculate_e2t();
        self.calculate_t2t();
    }

    // ─── Vertex-indexed relations ─────────────────────────────

    /// Adjacent vertices of each vertex, in first-seen order.
    pub fn calculate_v2v(&mut self) -> &SetArray<u32> {
        if !self.computed.v2v {
            let mut lists: Vec<Vec<u32>> = vec![Vec::new(); self.num_vertices];
            for &tri in &self.triangles {
                for (p, q) in directed_edges(tri) {
                    push_unique(&mut lists[p as usize], q);
                    push_unique(&mut lists[q as usize], p);
                }
            }
            self.v2v = SetArray::from_lists(&lists);
            self.computed.v2v = true;
            tracing::debug!(
                relation = "v2v",
                sets = self.v2v.num_sets(),
                entries = self.v2v.num_total_elements(),
                "computed mesh relation"
            );
        }
        &self.v2v
    }

    /// Edges owned by each vertex, i.e. those where it is the lower endpoint.
    ///
    /// Edge ids are handed out vertex by vertex, then in `v2v` order, so
    /// they depend on triangle order rather than on a canonical sort.
    pub fn calculate_v2e(&mut self) -> &SetArray<u32> {
        if !self.computed.v2e {
            self.calculate_v2v();

            let mut edges = Vec::new();
            let mut lists: Vec<Vec<u32>> = vec![Vec::new(); self.num_vertices];
            for (i, list) in lists.iter_mut().enumerate() {
                let i = i as u32;
                for &j in self.v2v.set_slice(i as usize) {
                    if i < j {
                        list.push(edges.len() as u32);
                        edges.push([i, j]);
                    }
                }
            }
            self.v2e = SetArray::from_lists(&lists);
            self.edges = edges;
            self.computed.v2e = true;
            tracing::debug!(relation = "v2e", edges = self.edges.len(), "computed mesh relation");
        }
        &self.v2e
    }

    /// Every edge incident to each vertex, ascending edge id.
    pub fn calculate_e2v(&mut self) -> &SetArray<u32> {
        if !self.computed.e2v {
            self.calculate_v2e();

            let mut lists: Vec<Vec<u32>> = vec![Vec::new(); self.num_vertices];
            for (e, &[a, b]) in self.edges.iter().enumerate() {
                lists[a as usize].push(e as u32);
                lists[b as usize].push(e as u32);
            }
            self.e2v = SetArray::from_lists(&lists);
            self.computed.e2v = true;
            tracing::debug!(
                relation = "e2v",
                entries = self.e2v.num_total_elements(),
                "computed mesh relation"
            );
        }
        &self.e2v
    }

    /// Triangles incident to each vertex, ascending triangle id.
    pub fn calculate_t2v(&mut self) -> &SetArray<u32> {
        if !self.computed.t2v {
            let mut lists: Vec<Vec<u32>> = vec![Vec::new(); self.num_vertices];
            for (t, &tri) in self.triangles.iter().enumerate() {
                for v in tri {
                    push_unique(&mut lists[v as usize], t as u32);
                }
            }
            self.t2v = SetArray::from_lists(&lists);
            self.computed.t2v = true;
            tracing::debug!(
                relation = "t2v",
                entries = self.t2v.num_total_elements(),
                "computed mesh relation"
            );
        }
        &self.t2v
    }

    // ─── Edge- and triangle-indexed relations ─────────────────

    /// Triangles on each side of each edge.
    ///
    /// Slot 0 is the first triangle seen, slot 1 the second. Boundary
    /// edges leave slot 1 empty. A third incident triangle overwrites
    /// slot 1 (non-manifold input is not detected).
    pub fn calculate_t2e(&mut self) -> &[[Option<u32>; 2]] {
        if !self.computed.t2e {
            self.calculate_e2v();

            let mut t2e = vec![[None; 2]; self.edges.len()];
            for (t, &tri) in self.triangles.iter().enumerate() {
                for (a, b) in directed_edges(tri) {
                    if let Some(e) = self.find_edge(a, b) {
                        let slots = &mut t2e[e as usize];
                        if slots[0].is_none() {
                            slots[0] = Some(t as u32);
                        } else {
                            slots[1] = Some(t as u32);
                        }
                    }
                }
            }
            self.t2e = t2e;
            self.computed.t2e = true;
            tracing::debug!(relation = "t2e", edges = self.t2e.len(), "computed mesh relation");
        }
        &self.t2e
    }

    /// The three edges of each triangle, local order (v0,v1), (v1,v2), (v2,v0).
    pub fn calculate_e2t(&mut self) -> &[[u32; 3]] {
        if !self.computed.e2t {
            self.calculate_e2v();

            let e2t: Vec<[u32; 3]> = self
                .triangles
                .iter()
                .map(|&tri| {
                    directed_edges(tri).map(|(a, b)| self.find_edge(a, b).unwrap_or(NO_EDGE))
                })
                .collect();
            self.e2t = e2t;
            self.computed.e2t = true;
            tracing::debug!(relation = "e2t", triangles = self.e2t.len(), "computed mesh relation");
        }
        &self.e2t
    }

    /// Neighbour triangle across each local edge, `None` on the boundary.
    ///
    /// For local edge (a, b) of triangle t, the first triangle in `t2v[a]`
    /// other than t that also contains b.
    pub fn calculate_t2t(&mut self) -> &[[Option<u32>; 3]] {
        if !self.computed.t2t {
            self.calculate_t2v();

            let t2t: Vec<[Option<u32>; 3]> = self
                .triangles
                .iter()
                .enumerate()
                .map(|(t, &tri)| {
                    directed_edges(tri).map(|(a, b)| {
                        self.t2v
                            .set_slice(a as usize)
                            .iter()
                            .copied()
                            .find(|&other| {
                                other as usize != t && self.triangles[other as usize].contains(&b)
                            })
                    })
                })
                .collect();
            self.t2t = t2t;
            self.computed.t2t = true;
            tracing::debug!(relation = "t2t", triangles = self.t2t.len(), "computed mesh relation");
        }
        &self.t2t
    }

    /// `t2e` with absent triangles written as `-1`.
    pub fn t2e_raw(&mut self) -> Vec<[i32; 2]> {
        self.calculate_t2e()
            .iter()
            .map(|slots| slots.map(to_raw))
            .collect()
    }

    /// `t2t` with absent neighbours written as `-1`.
    pub fn t2t_raw(&mut self) -> Vec<[i32; 3]> {
        self.calculate_t2t()
            .iter()
            .map(|slots| slots.map(to_raw))
            .collect()
    }

    // ─── Cached views ─────────────────────────────────────────

    /// Cached `v2v`, if computed.
    pub fn v2v(&self) -> Option<&SetArray<u32>> {
        self.computed.v2v.then_some(&self.v2v)
    }

    /// Cached `v2e`, if computed.
    pub fn v2e(&self) -> Option<&SetArray<u32>> {
        self.computed.v2e.then_some(&self.v2e)
    }

    /// Cached `e2v`, if computed.
    pub fn e2v(&self) -> Option<&SetArray<u32>> {
        self.computed.e2v.then_some(&self.e2v)
    }

    /// Cached `t2v`, if computed.
    pub fn t2v(&self) -> Option<&SetArray<u32>> {
        self.computed.t2v.then_some(&self.t2v)
    }

    /// Cached `t2e`, if computed.
    pub fn t2e(&self) -> Option<&[[Option<u32>; 2]]> {
        self.computed.t2e.then_some(self.t2e.as_slice())
    }

    /// Cached `e2t`, if computed.
    pub fn e2t(&self) -> Option<&[[u32; 3]]> {
        self.computed.e2t.then_some(self.e2t.as_slice())
    }

    /// Cached `t2t`, if computed.
    pub fn t2t(&self) -> Option<&[[Option<u32>; 3]]> {
        self.computed.t2t.then_some(self.t2t.as_slice())
    }

    /// Cached edge endpoints `[lo, hi]`, if `v2e` has been computed.
    pub fn edges(&self) -> Option<&[[u32; 2]]> {
        self.computed.v2e.then_some(self.edges.as_slice())
    }

    // ─── Queries ──────────────────────────────────────────────

    /// Endpoints of edge `e`, lower id first.
    pub fn edge_vertices(&mut self, e: EdgeId) -> Option<[VertexId; 2]> {
        self.calculate_v2e();
        self.edges
            .get(e.index())
            .map(|&[a, b]| [VertexId(a), VertexId(b)])
    }

    /// The edge joining `a` and `b`, in either direction.
    pub fn edge_between(&mut self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.calculate_e2v();
        if a.index() >= self.num_vertices {
            return None;
        }
        self.find_edge(a.0, b.0).map(EdgeId)
    }

    /// Edges with exactly one incident triangle.
    pub fn boundary_edges(&mut self) -> Vec<EdgeId> {
        self.calculate_t2e()
            .iter()
            .enumerate()
            .filter(|(_, slots)| slots[0].is_some() && slots[1].is_none())
            .map(|(e, _)| EdgeId(e as u32))
            .collect()
    }

    /// Number of edges with exactly one incident triangle.
    pub fn boundary_edge_count(&mut self) -> usize {
        self.boundary_edges().len()
    }

    /// Returns true if the mesh has no boundary edges.
    pub fn is_closed(&mut self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Returns true if no edge is shared by more than two triangles.
    ///
    /// `t2e` cannot answer this since it silently keeps only two
    /// triangles per edge, so incidences are counted from `e2t`.
    pub fn is_manifold(&mut self) -> bool {
        let num_edges = self.num_edges();
        let mut incidences = vec![0u32; num_edges];
        for tri_edges in self.calculate_e2t() {
            for &e in tri_edges {
                if e != NO_EDGE {
                    incidences[e as usize] += 1;
                }
            }
        }
        incidences.iter().all(|&n| n <= 2)
    }

    /// Triangles sharing an edge with `t`.
    pub fn triangle_neighbors(&mut self, t: TriangleId) -> Vec<TriangleId> {
        self.calculate_t2t()
            .get(t.index())
            .map(|slots| slots.iter().flatten().map(|&n| TriangleId(n)).collect())
            .unwrap_or_default()
    }

    /// Edge id of (a, b) looked up through `e2v[a]`. Requires `e2v`.
    fn find_edge(&self, a: u32, b: u32) -> Option<u32> {
        self.e2v
            .set_slice(a as usize)
            .iter()
            .copied()
            .find(|&e| {
                let [lo, hi] = self.edges[e as usize];
                (lo == a && hi == b) || (lo == b && hi == a)
            })
    }
}

#[inline]
fn to_raw(slot: Option<u32>) -> i32 {
    slot.map_or(zeta_types::constants::NO_TRIANGLE, |t| t as i32)
}
