//! Uniform voxel hash for radius point queries.
//!
//! Space is partitioned into cubic voxels of edge `h`. The voxel
//! `(floor(x/h), floor(y/h), floor(z/h))` is folded into one of a fixed
//! number of buckets, and each bucket holds the items whose voxel hashed
//! there. Buckets are unordered and never rebalanced: if the voxel size
//! or the points change, rebuild with [`PointsHashGrid::reset`] and
//! re-insert.

use glam::{IVec3, Vec3};
use zeta_types::constants::{HASH_PRIMES, MIN_NUM_BUCKETS, MIN_VOXEL_SIZE};

use crate::config::HashGridConfig;

/// A point stored in the grid, tagged with a caller-chosen id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    /// Position at insertion time.
    pub point: Vec3,
    /// Caller-supplied identifier (typically a vertex index).
    pub id: u32,
}

/// Spatial hash grid over a set of points.
///
/// Queries never miss a point inside the radius: the scanned voxel cube
/// always covers every voxel that could hold one. Voxels of the cube that
/// hash to the same bucket share one walk of it, so each stored item is
/// reported at most once per query. Repeated ids in a result can only come
/// from inserting the same id more than once, or from appending to earlier
/// results; the `remove_redundancy` flag of
/// [`find_points`](Self::find_points) cleans those up.
#[derive(Debug, Clone)]
pub struct PointsHashGrid {
    /// Voxel edge length.
    voxel_size: f32,
    /// Inverse voxel size (cached for performance).
    inv_voxel_size: f32,
    /// One unordered item list per bucket.
    buckets: Vec<Vec<Item>>,
    /// Number of items across all buckets.
    total_items: usize,
}

impl Default for PointsHashGrid {
    fn default() -> Self {
        Self::from_config(&HashGridConfig::default())
    }
}

impl PointsHashGrid {
    /// Creates an empty grid.
    ///
    /// `num_buckets` is raised to at least 1 and `voxel_size` to at least
    /// `1e-3` (a NaN voxel size also becomes `1e-3`).
    pub fn new(num_buckets: usize, voxel_size: f32) -> Self {
        let num_buckets = num_buckets.max(MIN_NUM_BUCKETS);
        let voxel_size = if voxel_size.is_nan() {
            MIN_VOXEL_SIZE
        } else {
            voxel_size.max(MIN_VOXEL_SIZE)
        };
        Self {
            voxel_size,
            inv_voxel_size: 1.0 / voxel_size,
            buckets: vec![Vec::new(); num_buckets],
            total_items: 0,
        }
    }

    /// Creates an empty grid from a configuration.
    pub fn from_config(config: &HashGridConfig) -> Self {
        Self::new(config.num_buckets, config.voxel_size)
    }

    /// Builds a grid holding `points`, each tagged with its slice index.
    pub fn from_points(points: &[Vec3], config: &HashGridConfig) -> Self {
        let mut grid = Self::from_config(config);
        grid.add_points(points);
        tracing::debug!(
            points = points.len(),
            buckets = grid.num_buckets(),
            voxel_size = grid.voxel_size,
            "built points hash grid"
        );
        grid
    }

    /// Removes every item, keeping bucket count and voxel size.
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.total_items = 0;
    }

    /// Removes every item and changes bucket count and voxel size.
    pub fn reset_with(&mut self, num_buckets: usize, voxel_size: f32) {
        *self = Self::new(num_buckets, voxel_size);
    }

    /// Number of buckets.
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Voxel edge length.
    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Number of items in bucket `bucket`.
    #[inline]
    pub fn num_items(&self, bucket: usize) -> usize {
        self.buckets[bucket].len()
    }

    /// Number of items in the grid.
    #[inline]
    pub fn num_total_items(&self) -> usize {
        self.total_items
    }

    /// Items in bucket `bucket`, in insertion order.
    #[inline]
    pub fn bucket(&self, bucket: usize) -> &[Item] {
        &self.buckets[bucket]
    }

    /// Integer voxel coordinates of `point`.
    #[inline]
    pub fn voxel_coords(&self, point: Vec3) -> IVec3 {
        (point * self.inv_voxel_size).floor().as_ivec3()
    }

    /// Bucket for voxel `(i, j, k)`, in `[0, num_buckets)`.
    #[inline]
    pub fn bucket_index(&self, i: i32, j: i32, k: i32) -> usize {
        let [pi, pj, pk] = HASH_PRIMES;
        let hash = i64::from(i).wrapping_mul(pi)
            ^ i64::from(j).wrapping_mul(pj)
            ^ i64::from(k).wrapping_mul(pk);
        hash.rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Bucket the given point falls into.
    #[inline]
    pub fn bucket_of(&self, point: Vec3) -> usize {
        let v = self.voxel_coords(point);
        self.bucket_index(v.x, v.y, v.z)
    }

    /// Inserts one point.
    pub fn add_point(&mut self, point: Vec3, id: u32) {
        let bucket = self.bucket_of(point);
        self.buckets[bucket].push(Item { point, id });
        self.total_items += 1;
    }

    /// Inserts `points`, using each point's slice index as its id.
    pub fn add_points(&mut self, points: &[Vec3]) {
        for (id, &point) in points.iter().enumerate() {
            self.add_point(point, id as u32);
        }
    }

    /// Collects ids of items strictly closer than `max_distance` to `query`.
    ///
    /// When `append` is false `out` is cleared first. When
    /// `remove_redundancy` is set the ids in `out` are sorted and
    /// deduplicated. Returns `out.len()`.
    pub fn find_points(
        &self,
        out: &mut Vec<u32>,
        query: Vec3,
        max_distance: f32,
        remove_redundancy: bool,
        append: bool,
    ) -> usize {
        if !append {
            out.clear();
        }

        let before = out.len();
        let max_dist2 = max_distance * max_distance;
        self.for_each_candidate(query, max_distance, |item| {
            if item.point.distance_squared(query) < max_dist2 {
                out.push(item.id);
            }
        });

        if remove_redundancy {
            out.sort_unstable();
            out.dedup();
        }

        tracing::trace!(
            found = out.len().saturating_sub(before),
            total = out.len(),
            max_distance,
            "hash grid radius query"
        );
        out.len()
    }

    /// Nearest item strictly closer than `max_distance`, as `(id, distance)`.
    ///
    /// Equidistant items resolve to the lower id.
    pub fn find_closest(&self, query: Vec3, max_distance: f32) -> Option<(u32, f32)> {
        let mut best: Option<(u32, f32)> = None;
        let max_dist2 = max_distance * max_distance;
        self.for_each_candidate(query, max_distance, |item| {
            let d2 = item.point.distance_squared(query);
            if d2 >= max_dist2 {
                return;
            }
            let better = match best {
                None => true,
                Some((id, best_d2)) => d2 < best_d2 || (d2 == best_d2 && item.id < id),
            };
            if better {
                best = Some((item.id, d2));
            }
        });
        best.map(|(id, d2)| (id, d2.sqrt()))
    }

    /// Buckets touched by the voxel cube of half-width `radius` around
    /// `center`, ascending and without repeats.
    fn candidate_buckets(&self, center: Vec3, radius: f32) -> Vec<usize> {
        let lo = self.voxel_coords(center - Vec3::splat(radius));
        let hi = self.voxel_coords(center + Vec3::splat(radius));

        let mut buckets = Vec::new();
        for i in lo.x..hi.x.saturating_add(1) {
            for j in lo.y..hi.y.saturating_add(1) {
                for k in lo.z..hi.z.saturating_add(1) {
                    let b = self.bucket_index(i, j, k);
                    if let Err(at) = buckets.binary_search(&b) {
                        buckets.insert(at, b);
                    }
                }
            }
            if buckets.len() == self.buckets.len() {
                break;
            }
        }
        buckets
    }

    /// Visits every item in the buckets touched by the voxel cube of
    /// half-width `radius` around `center`, each bucket once.
    fn for_each_candidate<F: FnMut(&Item)>(&self, center: Vec3, radius: f32, mut f: F) {
        // Nothing lies strictly inside a non-positive (or NaN) radius.
        if self.total_items == 0 || radius.is_nan() || radius <= 0.0 {
            return;
        }

        for b in self.candidate_buckets(center, radius) {
            for item in &self.buckets[b] {
                f(item);
            }
        }
    }
}
