//! Integration tests for zeta-containers.

use std::path::PathBuf;

use glam::Vec3;
use zeta_containers::{DoubleSetArray, FloatSetArray, IntSetArray, SetArray, VectorSetArray};
use zeta_types::ZetaError;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("zeta_containers_{}_{}", std::process::id(), name))
}

fn abc_sets() -> SetArray<char> {
    SetArray::from_lists(&[vec!['a', 'b'], vec!['c', 'd', 'e'], vec!['f']])
}

// ─── Allocation Tests ─────────────────────────────────────────

#[test]
fn set_computes_offsets_and_total() {
    let lengths = [3, 0, 2, 5, 1];
    let array = IntSetArray::with_lengths(&lengths);

    assert_eq!(array.num_sets(), 5);
    assert_eq!(array.num_total_elements(), lengths.iter().sum::<usize>());
    let mut running = 0;
    for (k, &n) in lengths.iter().enumerate() {
        assert_eq!(array.start_index(k), running);
        assert_eq!(array.count(k), n);
        running += n;
    }
    assert!(array.values().iter().all(|&v| v == 0));
}

#[test]
fn set_replaces_previous_state() {
    let mut array = IntSetArray::with_lengths(&[4, 4]);
    array.fill(9);
    array.set(&[1, 2]);
    assert_eq!(array.counts(), &[1, 2]);
    assert_eq!(array.offsets(), &[0, 1]);
    assert_eq!(array.values(), &[0, 0, 0]);
}

#[test]
fn empty_array() {
    let array = FloatSetArray::new();
    assert!(array.is_empty());
    assert_eq!(array.num_total_elements(), 0);
    assert_eq!(array.max_count(), 0);
    assert_eq!(array.iter().count(), 0);
}

#[test]
fn zero_length_sets() {
    let array = IntSetArray::with_lengths(&[0, 0, 0]);
    assert_eq!(array.num_sets(), 3);
    assert_eq!(array.num_total_elements(), 0);
    assert!(array.set_slice(1).is_empty());
}

// ─── Access Tests ─────────────────────────────────────────────

#[test]
fn element_access() {
    let array = abc_sets();
    assert_eq!(*array.element(0, 1), 'b');
    assert_eq!(*array.element(1, 2), 'e');
    assert_eq!(*array.element(2, 0), 'f');
    assert_eq!(&array[1], &['c', 'd', 'e']);
}

#[test]
fn element_mut_writes_in_place() {
    let mut array = IntSetArray::with_lengths(&[2, 2]);
    *array.element_mut(1, 0) = 7;
    array.set_slice_mut(0)[1] = 3;
    assert_eq!(array.values(), &[0, 3, 7, 0]);
}

#[test]
fn unchecked_matches_checked() {
    let array = abc_sets();
    for set in 0..array.num_sets() {
        for k in 0..array.count(set) {
            let fast = unsafe { *array.element_unchecked(set, k) };
            assert_eq!(Some(&fast), array.get(set, k));
        }
    }
}

#[test]
fn checked_get_rejects_out_of_range() {
    let array = abc_sets();
    assert_eq!(array.get(0, 2), None);
    assert_eq!(array.get(3, 0), None);
    assert_eq!(array.get(2, 0), Some(&'f'));
}

#[test]
fn fill_and_zeroize_leave_layout_alone() {
    let mut array = DoubleSetArray::with_lengths(&[1, 3]);
    array.fill(2.5);
    assert!(array.values().iter().all(|&v| v == 2.5));
    array.zeroize();
    assert!(array.values().iter().all(|&v| v == 0.0));
    assert_eq!(array.counts(), &[1, 3]);
    assert_eq!(array.offsets(), &[0, 1]);
}

#[test]
fn start_and_end_elements() {
    let array = abc_sets();
    let mut out = vec!['z'; 10];
    array.start_elements(&mut out);
    assert_eq!(out, vec!['a', 'c', 'f']);
    array.end_elements(&mut out);
    assert_eq!(out, vec!['b', 'e', 'f']);
}

#[test]
fn end_elements_of_empty_set_is_default() {
    let array = SetArray::from_lists(&[vec![4], vec![], vec![5, 6]]);
    let mut out = Vec::new();
    array.end_elements(&mut out);
    assert_eq!(out, vec![4, 0, 6]);
}

#[test]
fn lists_round_trip() {
    let lists = vec![vec![1, 2, 3], vec![], vec![4]];
    let array = IntSetArray::from_lists(&lists);
    assert_eq!(array.to_lists(), lists);
    assert_eq!(array.max_count(), 3);
}

// ─── Append Tests ─────────────────────────────────────────────

#[test]
fn append_keeps_offsets_monotonic() {
    let mut a = IntSetArray::from_lists(&[vec![1, 2], vec![3]]);
    let b = IntSetArray::from_lists(&[vec![], vec![4, 5, 6]]);
    a.append(&b);

    assert_eq!(a.counts(), &[2, 1, 0, 3]);
    assert_eq!(a.offsets(), &[0, 2, 3, 3]);
    assert_eq!(&a[3], &[4, 5, 6]);
    assert!(a.offsets().windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn append_to_empty() {
    let mut a = IntSetArray::new();
    let b = IntSetArray::from_lists(&[vec![1], vec![2, 3]]);
    a.append(&b);
    assert_eq!(a, b);
}

#[test]
fn append_is_associative() {
    let a = IntSetArray::from_lists(&[vec![1, 2], vec![3]]);
    let b = IntSetArray::from_lists(&[vec![4], vec![]]);
    let c = IntSetArray::from_lists(&[vec![5, 6, 7]]);

    let mut left = a.clone();
    left.append(&b);
    left.append(&c);

    let mut bc = b.clone();
    bc.append(&c);
    let mut right = a.clone();
    right.append(&bc);

    assert_eq!(left, right);
}

// ─── Mask Tests ───────────────────────────────────────────────

#[test]
fn assign_masked_selects_sets() {
    let array = abc_sets();
    let selected = SetArray::masked(&array, &[true, false, true]).unwrap();
    assert_eq!(selected.counts(), &[2, 1]);
    assert_eq!(selected.values(), &['a', 'b', 'f']);
    assert_eq!(selected.offsets(), &[0, 2]);
}

#[test]
fn assign_masked_length_mismatch_resets() {
    let array = abc_sets();
    let mut target = abc_sets();
    let err = target.assign_masked(&array, &[true, false]).unwrap_err();
    assert!(matches!(
        err,
        ZetaError::InvalidMask {
            expected: 3,
            found: 2
        }
    ));
    assert!(target.is_empty());
    assert_eq!(target.num_total_elements(), 0);
}

#[test]
fn assign_masked_replaces_previous_contents() {
    let array = abc_sets();
    let mut target = SetArray::from_lists(&[vec!['x'; 4]]);
    target.assign_masked(&array, &[false, true, false]).unwrap();
    assert_eq!(target.to_lists(), vec![vec!['c', 'd', 'e']]);
    assert_eq!(target.offsets(), &[0]);
}

#[test]
fn assign_masked_all_false() {
    let array = abc_sets();
    let selected = SetArray::masked(&array, &[false, false, false]).unwrap();
    assert!(selected.is_empty());
}

// ─── Binary I/O Tests ─────────────────────────────────────────

#[test]
fn save_load_round_trip() {
    let mut array = FloatSetArray::with_lengths(&[3, 0, 2]);
    for (i, v) in array.values_mut().iter_mut().enumerate() {
        *v = i as f32 * 0.5;
    }

    let path = temp_path("round_trip.bin");
    array.save(&path).unwrap();
    let loaded = FloatSetArray::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.counts(), array.counts());
    assert_eq!(loaded.values(), array.values());
    assert_eq!(loaded.offsets(), array.offsets());
}

#[test]
fn vector_sets_round_trip_through_stream() {
    let array = VectorSetArray::from_lists(&[
        vec![Vec3::new(1.0, 2.0, 3.0)],
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
    ]);
    let mut bytes = Vec::new();
    array.write_to(&mut bytes).unwrap();
    assert_eq!(bytes.len(), 4 + 2 * 4 + 4 + 4 * 12);

    let mut loaded = VectorSetArray::new();
    loaded.read_from(&mut bytes.as_slice()).unwrap();
    assert_eq!(loaded, array);
}

#[test]
fn load_missing_file_resets() {
    let mut array = IntSetArray::from_lists(&[vec![1, 2]]);
    let err = array.load(temp_path("does_not_exist.bin")).unwrap_err();
    assert!(matches!(err, ZetaError::Io(_)));
    assert!(array.is_empty());
}

#[test]
fn load_truncated_stream_resets() {
    let array = IntSetArray::from_lists(&[vec![1, 2], vec![3]]);
    let mut bytes = Vec::new();
    array.write_to(&mut bytes).unwrap();
    bytes.truncate(bytes.len() - 2);

    let mut loaded = abc_sets_as_ints();
    assert!(loaded.read_from(&mut bytes.as_slice()).is_err());
    assert!(loaded.is_empty());
}

#[test]
fn load_as_narrower_type_is_type_mismatch() {
    let array = DoubleSetArray::from_lists(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    let path = temp_path("wrong_type.bin");
    array.save(&path).unwrap();

    let mut loaded = FloatSetArray::with_lengths(&[1]);
    let err = loaded.load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ZetaError::TypeMismatch { .. }));
    assert!(loaded.is_empty());
}

#[test]
fn load_vectors_as_floats_is_type_mismatch() {
    let array = VectorSetArray::from_lists(&[vec![Vec3::ONE, Vec3::Z]]);
    let path = temp_path("vectors_as_floats.bin");
    array.save(&path).unwrap();

    let err = FloatSetArray::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ZetaError::TypeMismatch { .. }));
}

#[test]
fn load_file_missing_last_element_is_io_error() {
    let array = FloatSetArray::from_lists(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    let path = temp_path("missing_last.bin");
    array.save(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

    let mut loaded = FloatSetArray::with_lengths(&[2]);
    let err = loaded.load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ZetaError::Io(_)), "got {err:?}");
    assert!(loaded.is_empty());
}

#[test]
fn load_doubles_missing_last_element_is_io_error() {
    // The remaining 8 value bytes would fit two `f32`s.
    let array = DoubleSetArray::from_lists(&[vec![1.0], vec![2.0]]);
    let path = temp_path("doubles_missing_last.bin");
    array.save(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 8]).unwrap();

    let err = DoubleSetArray::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ZetaError::Io(_)), "got {err:?}");
}

#[test]
fn read_from_unaligned_buffer() {
    let array = DoubleSetArray::from_lists(&[vec![1.5, -2.0], vec![], vec![8.25]]);
    let mut bytes = vec![0u8];
    array.write_to(&mut bytes).unwrap();

    let mut loaded = DoubleSetArray::new();
    loaded.read_from(&mut &bytes[1..]).unwrap();
    assert_eq!(loaded, array);
}

fn abc_sets_as_ints() -> IntSetArray {
    IntSetArray::from_lists(&[vec![7, 8], vec![9]])
}

// ─── Serde Tests ──────────────────────────────────────────────

#[test]
fn json_round_trip_rebuilds_offsets() {
    let array = IntSetArray::from_lists(&[vec![1], vec![2, 3], vec![]]);
    let json = serde_json::to_string(&array).unwrap();
    assert!(!json.contains("offsets"));
    let recovered: IntSetArray = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, array);
}

#[test]
fn json_rejects_inconsistent_counts() {
    let json = r#"{"counts":[2,2],"values":[1,2,3]}"#;
    let result: Result<IntSetArray, _> = serde_json::from_str(json);
    assert!(result.is_err());
}
