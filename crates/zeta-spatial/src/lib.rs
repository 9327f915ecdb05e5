//! # zeta-spatial
//!
//! Uniform spatial hashing for approximate-radius point queries.
//!
//! Points are binned into voxels of edge length `h`; each voxel is hashed
//! into one of a fixed number of buckets. A radius query scans every voxel
//! overlapping the query cube and distance-tests the items found there.

pub mod config;
pub mod hash_grid;

pub use config::HashGridConfig;
pub use hash_grid::{Item, PointsHashGrid};
