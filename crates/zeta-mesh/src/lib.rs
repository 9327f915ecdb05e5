//! # zeta-mesh
//!
//! Triangle mesh storage and adjacency derivation.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: vertex positions in SoA layout plus a flat
//!   triangle index buffer.
//! - [`TriangleSource`]: what the topology builder needs from a mesh.
//! - [`TriMeshConnectionInfo`]: lazily derived, memoized adjacency
//!   relations (vertex/edge/triangle) stored in packed set arrays.
//! - Procedural generators for tests and demos.

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::{IndexedTriangles, TriangleMesh, TriangleSource};
pub use topology::TriMeshConnectionInfo;
