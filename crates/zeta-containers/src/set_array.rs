//! Packed ragged array (compressed sparse row layout).
//!
//! Three flat arrays describe `N` sets:
//! - `counts:  [n0, n1, n2, ...]` length of each set
//! - `offsets: [0, n0, n0+n1, ...]` start of each set in `values`
//! - `values:  [set0..., set1..., set2..., ...]`
//!
//! Sets are fixed-length once allocated. There is no per-element
//! insertion or removal; build a new array instead (see
//! [`SetArray::from_lists`] and [`SetArray::assign_masked`]).

use std::ops::Index;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeta_types::{ZetaError, ZetaResult};

/// `N` variable-length sets of `T` packed into one contiguous buffer.
///
/// Indexed accessors ([`count`](Self::count), [`element`](Self::element))
/// follow the hot-path contract: indices are the caller's responsibility and
/// are only checked by debug assertions. Use [`get`](Self::get) for a
/// checked lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SetArray<T> {
    /// Length of each set.
    counts: Vec<usize>,
    /// Start of each set in `values`. Always the prefix sum of `counts`.
    offsets: Vec<usize>,
    /// All elements, concatenated in set order.
    values: Vec<T>,
}

impl<T> Default for SetArray<T> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            offsets: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> SetArray<T> {
    /// Creates an empty array with no sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an array from per-set lengths and the matching flat values.
    ///
    /// Fails if `values.len()` is not the sum of `counts`.
    pub fn from_parts(counts: Vec<usize>, values: Vec<T>) -> ZetaResult<Self> {
        let total: usize = counts.iter().sum();
        if total != values.len() {
            return Err(ZetaError::Serialization(format!(
                "set lengths sum to {} but {} values were supplied",
                total,
                values.len()
            )));
        }
        let mut array = Self {
            counts,
            offsets: Vec::new(),
            values,
        };
        array.allocate();
        Ok(array)
    }

    /// Recomputes `offsets` from `counts`.
    pub(crate) fn allocate(&mut self) {
        self.offsets.clear();
        self.offsets.reserve(self.counts.len());
        let mut start = 0;
        for &n in &self.counts {
            self.offsets.push(start);
            start += n;
        }
    }

    /// Drops every set and element.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.offsets.clear();
        self.values.clear();
    }

    /// Number of sets `N`.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.counts.len()
    }

    /// Total number of elements across all sets.
    #[inline]
    pub fn num_total_elements(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of elements in set `set`.
    #[inline]
    pub fn count(&self, set: usize) -> usize {
        self.counts[set]
    }

    /// Offset of the first element of set `set` in the flat buffer.
    #[inline]
    pub fn start_index(&self, set: usize) -> usize {
        self.offsets[set]
    }

    /// Element `k` of set `set`.
    ///
    /// `k` is only checked against the set length in debug builds; an
    /// out-of-range `k` silently reads into the next set in release.
    #[inline]
    pub fn element(&self, set: usize, k: usize) -> &T {
        debug_assert!(k < self.counts[set], "element {k} out of range for set {set}");
        &self.values[self.offsets[set] + k]
    }

    /// Mutable element `k` of set `set`. Same contract as [`element`](Self::element).
    #[inline]
    pub fn element_mut(&mut self, set: usize, k: usize) -> &mut T {
        debug_assert!(k < self.counts[set], "element {k} out of range for set {set}");
        let start = self.offsets[set];
        &mut self.values[start + k]
    }

    /// Element `k` of set `set` without any bounds checks.
    ///
    /// # Safety
    /// `set < self.num_sets()` and `k < self.count(set)` must hold.
    #[inline]
    pub unsafe fn element_unchecked(&self, set: usize, k: usize) -> &T {
        let start = *self.offsets.get_unchecked(set);
        self.values.get_unchecked(start + k)
    }

    /// Checked lookup of element `k` of set `set`.
    pub fn get(&self, set: usize, k: usize) -> Option<&T> {
        let n = *self.counts.get(set)?;
        if k >= n {
            return None;
        }
        self.values.get(self.offsets[set] + k)
    }

    /// The elements of set `set` as a slice.
    #[inline]
    pub fn set_slice(&self, set: usize) -> &[T] {
        let start = self.offsets[set];
        &self.values[start..start + self.counts[set]]
    }

    /// The elements of set `set` as a mutable slice.
    #[inline]
    pub fn set_slice_mut(&mut self, set: usize) -> &mut [T] {
        let start = self.offsets[set];
        let end = start + self.counts[set];
        &mut self.values[start..end]
    }

    /// Iterates over the sets in order.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.offsets
            .iter()
            .zip(&self.counts)
            .map(move |(&start, &n)| &self.values[start..start + n])
    }

    /// Per-set lengths.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Per-set start offsets.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// The flat value buffer.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The flat value buffer, mutably. Set boundaries cannot change through it.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Length of the longest set, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl<T: Clone> SetArray<T> {
    /// Packs a list of lists.
    pub fn from_lists<L: AsRef<[T]>>(lists: &[L]) -> Self {
        let counts: Vec<usize> = lists.iter().map(|l| l.as_ref().len()).collect();
        let mut values = Vec::with_capacity(counts.iter().sum());
        for list in lists {
            values.extend_from_slice(list.as_ref());
        }
        let mut array = Self {
            counts,
            offsets: Vec::new(),
            values,
        };
        array.allocate();
        array
    }

    /// Unpacks into one `Vec` per set.
    pub fn to_lists(&self) -> Vec<Vec<T>> {
        self.iter().map(<[T]>::to_vec).collect()
    }

    /// Sets every element to `value`. Set lengths are untouched.
    pub fn fill(&mut self, value: T) {
        self.values.fill(value);
    }

    /// Concatenates `other`'s sets after this array's sets.
    ///
    /// `other`'s offsets are re-based by this array's previous element
    /// total, so offsets stay monotonic across the joined structure.
    pub fn append(&mut self, other: &Self) {
        let base = self.values.len();
        self.counts.extend_from_slice(&other.counts);
        self.offsets.extend(other.offsets.iter().map(|&o| o + base));
        self.values.extend_from_slice(&other.values);
    }

    /// Rebuilds this array from the sets of `other` whose `mask` entry is true.
    ///
    /// Relative set order is preserved. On a mask length mismatch the array
    /// is left empty and `InvalidMask` is returned.
    pub fn assign_masked(&mut self, other: &Self, mask: &[bool]) -> ZetaResult<()> {
        self.reset();
        if mask.len() != other.num_sets() {
            tracing::warn!(
                expected = other.num_sets(),
                found = mask.len(),
                "set array mask length mismatch"
            );
            return Err(ZetaError::InvalidMask {
                expected: other.num_sets(),
                found: mask.len(),
            });
        }

        for (set, &keep) in mask.iter().enumerate() {
            if keep {
                self.counts.push(other.counts[set]);
                self.values.extend_from_slice(other.set_slice(set));
            }
        }
        self.allocate();
        Ok(())
    }

    /// Returns a new array holding the sets of `other` selected by `mask`.
    pub fn masked(other: &Self, mask: &[bool]) -> ZetaResult<Self> {
        let mut array = Self::new();
        array.assign_masked(other, mask)?;
        Ok(array)
    }
}

impl<T: Clone + Default> SetArray<T> {
    /// Creates an array with the given set lengths, all elements defaulted.
    pub fn with_lengths(lengths: &[usize]) -> Self {
        let mut array = Self::new();
        array.set(lengths);
        array
    }

    /// Reinitializes from scratch with the given set lengths.
    ///
    /// Any previous contents are discarded and every element is
    /// `T::default()`.
    pub fn set(&mut self, lengths: &[usize]) {
        self.counts.clear();
        self.counts.extend_from_slice(lengths);
        self.allocate();
        let total = self.counts.iter().sum();
        self.values.clear();
        self.values.resize(total, T::default());
    }

    /// Sets every element to zero (`T::default()`).
    pub fn zeroize(&mut self) {
        self.values.fill(T::default());
    }

    /// Writes the first element of each set into `out`.
    ///
    /// `out` is cleared first and ends up with one entry per set;
    /// empty sets contribute `T::default()`.
    pub fn start_elements(&self, out: &mut Vec<T>) {
        out.clear();
        out.extend(
            self.iter()
                .map(|set| set.first().cloned().unwrap_or_default()),
        );
    }

    /// Writes the last element of each set into `out`.
    ///
    /// `out` is cleared first and ends up with one entry per set;
    /// empty sets contribute `T::default()`.
    pub fn end_elements(&self, out: &mut Vec<T>) {
        out.clear();
        out.extend(self.iter().map(|set| set.last().cloned().unwrap_or_default()));
    }
}

impl<T> Index<usize> for SetArray<T> {
    type Output = [T];

    #[inline]
    fn index(&self, set: usize) -> &[T] {
        self.set_slice(set)
    }
}

// Serialized as `{ counts, values }`; offsets are re-derived on load.

#[derive(Serialize)]
struct SetArrayRef<'a, T> {
    counts: &'a [usize],
    values: &'a [T],
}

#[derive(Deserialize)]
struct SetArrayParts<T> {
    counts: Vec<usize>,
    values: Vec<T>,
}

impl<T: Serialize> Serialize for SetArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SetArrayRef {
            counts: &self.counts,
            values: &self.values,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SetArray<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = SetArrayParts::<T>::deserialize(deserializer)?;
        SetArray::from_parts(parts.counts, parts.values).map_err(serde::de::Error::custom)
    }
}
