//! # zeta-containers
//!
//! Packed ragged arrays: `N` variable-length sets stored back to back in
//! one flat buffer, with a prefix-sum offset table for O(1) access.
//!
//! ## Key Types
//!
//! - [`SetArray`]: the generic container.
//! - [`IntSetArray`], [`FloatSetArray`], [`DoubleSetArray`], [`VectorSetArray`]
//!   for the element types the geometry code actually stores.
//!
//! Element types that are [`bytemuck::Pod`] can be saved to and loaded from
//! the raw binary layout in [`io`].

pub mod io;
pub mod set_array;

pub use set_array::SetArray;

/// Sets of `i32` (vertex, edge, and triangle ids).
pub type IntSetArray = SetArray<i32>;

/// Sets of `f32` scalars.
pub type FloatSetArray = SetArray<f32>;

/// Sets of `f64` scalars.
pub type DoubleSetArray = SetArray<f64>;

/// Sets of 3D vectors.
pub type VectorSetArray = SetArray<glam::Vec3>;
