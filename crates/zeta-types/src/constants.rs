//! Defaults and coercion limits shared across crates.

/// Smallest voxel edge length a hash grid accepts. Smaller values are clamped.
pub const MIN_VOXEL_SIZE: f32 = 1.0e-3;

/// Smallest bucket count a hash grid accepts.
pub const MIN_NUM_BUCKETS: usize = 1;

/// Default number of hash grid buckets.
pub const DEFAULT_NUM_BUCKETS: usize = 4096;

/// Default hash grid voxel edge length.
pub const DEFAULT_VOXEL_SIZE: f32 = 0.1;

/// Large primes folded together by the voxel hash (one per axis).
pub const HASH_PRIMES: [i64; 3] = [73_856_093, 19_349_663, 83_492_791];

/// Sentinel written in place of a missing triangle in packed `i32` tables.
pub const NO_TRIANGLE: i32 = -1;
