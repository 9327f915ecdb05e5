//! # zeta-types
//!
//! Shared identifiers, error types, and constants for the zeta
//! geometry core.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that the container, spatial, and mesh crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{ZetaError, ZetaResult};
pub use ids::{EdgeId, TriangleId, VertexId};
