//! Tests for frame-level and dataset-level metadata
//!
//! These tests verify:
//! - Metadata round trips for every attribute value class
//! - The shared overwrite-guarded attribute-set algorithm (all-or-nothing)
//! - Update-requires-existence for dataset metadata
//! - Independence of attribute maps across frames and scopes

use std::path::PathBuf;

use num_complex::Complex;
use tempfile::TempDir;

use framestore::{
    Array, AttrMap, AttrValue, FrameStore, OpenMode, StoreError, WriteOptions,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn temp_container_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("measurements.fst");
    (temp_dir, path)
}

fn open_store(path: &PathBuf) -> FrameStore {
    FrameStore::open(path, OpenMode::OpenOrCreate).unwrap()
}

fn sample_metadata() -> AttrMap {
    let mut md = AttrMap::new();
    md.insert("int".to_string(), AttrValue::I64(1));
    md.insert("float".to_string(), AttrValue::F64(1.0));
    md.insert(
        "complex".to_string(),
        AttrValue::Complex(Complex::new(1.0, 1.0)),
    );
    md.insert("string".to_string(), AttrValue::Str("abc".to_string()));
    md.insert(
        "array".to_string(),
        AttrValue::Array(Array::from_i64(vec![0, 1, 2, 3, 4])),
    );
    md.insert("flag".to_string(), AttrValue::Bool(true));
    md
}

// =============================================================================
// Frame Metadata Tests
// =============================================================================

#[test]
fn test_frame_metadata_round_trip() {
    let (_temp, path) = temp_container_path();
    let md = sample_metadata();
    {
        let mut store = open_store(&path);
        store.set_frame_metadata(0, &md, false).unwrap();
        store.close().unwrap();
    }

    let store = FrameStore::open(&path, OpenMode::Read).unwrap();
    assert_eq!(store.get_frame_metadata(0).unwrap(), md);
}

#[test]
fn test_set_frame_metadata_creates_the_frame_group() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut md = AttrMap::new();
    md.insert("temperature_k".to_string(), AttrValue::F64(293.15));
    store.set_frame_metadata(12, &md, false).unwrap();

    assert_eq!(store.frames().unwrap(), vec![12]);
}

#[test]
fn test_get_frame_metadata_requires_existing_frame() {
    let (_temp, path) = temp_container_path();
    let store = open_store(&path);

    assert!(matches!(
        store.get_frame_metadata(0),
        Err(StoreError::NotFound { .. })
    ));
}

// =============================================================================
// Overwrite Guard Tests
// =============================================================================

#[test]
fn test_conflicting_key_without_overwrite_is_rejected() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut first = AttrMap::new();
    first.insert("a".to_string(), AttrValue::I64(1));
    store.set_frame_metadata(0, &first, false).unwrap();

    let mut second = AttrMap::new();
    second.insert("a".to_string(), AttrValue::I64(2));
    let err = store.set_frame_metadata(0, &second, false).unwrap_err();
    assert!(matches!(err, StoreError::AttrConflict { ref keys, .. } if keys == &["a"]));

    // Guarded failure leaves the old value in place.
    assert_eq!(
        store.get_frame_metadata(0).unwrap().get("a"),
        Some(&AttrValue::I64(1))
    );

    // The same call with overwrite succeeds and replaces the value.
    store.set_frame_metadata(0, &second, true).unwrap();
    assert_eq!(
        store.get_frame_metadata(0).unwrap().get("a"),
        Some(&AttrValue::I64(2))
    );
}

#[test]
fn test_conflict_aborts_the_entire_batch() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut first = AttrMap::new();
    first.insert("a".to_string(), AttrValue::I64(1));
    store.set_frame_metadata(0, &first, false).unwrap();

    // One clashing key poisons the whole map: "b" must NOT be written.
    let mut second = AttrMap::new();
    second.insert("a".to_string(), AttrValue::I64(2));
    second.insert("b".to_string(), AttrValue::I64(3));
    assert!(store.set_frame_metadata(0, &second, false).is_err());

    let md = store.get_frame_metadata(0).unwrap();
    assert_eq!(md.get("a"), Some(&AttrValue::I64(1)));
    assert!(!md.contains_key("b"));
}

#[test]
fn test_disjoint_keys_merge_without_overwrite() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut first = AttrMap::new();
    first.insert("a".to_string(), AttrValue::I64(1));
    store.set_frame_metadata(0, &first, false).unwrap();

    let mut second = AttrMap::new();
    second.insert("b".to_string(), AttrValue::I64(2));
    store.set_frame_metadata(0, &second, false).unwrap();

    let md = store.get_frame_metadata(0).unwrap();
    assert_eq!(md.len(), 2);
}

#[test]
fn test_empty_metadata_set_is_a_no_op() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    store.set_frame_metadata(0, &AttrMap::new(), false).unwrap();
    assert!(store.get_frame_metadata(0).unwrap().is_empty());
}

// =============================================================================
// Dataset Metadata Tests
// =============================================================================

#[test]
fn test_metadata_attached_at_write_time() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let md = sample_metadata();
    store
        .write_with(
            0,
            "img",
            Array::from_u16(vec![1, 2, 3]),
            WriteOptions::new().metadata(md.clone()),
        )
        .unwrap();

    assert_eq!(store.get_dataset_metadata(0, "img").unwrap(), md);
}

#[test]
fn test_update_dataset_metadata_requires_existing_dataset() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut md = AttrMap::new();
    md.insert("k".to_string(), AttrValue::I64(1));

    // Missing frame.
    assert!(matches!(
        store.update_dataset_metadata(0, "never_written", &md, false),
        Err(StoreError::NotFound { .. })
    ));

    // Frame exists, dataset does not. Update must not create it.
    store.write(0, "img", Array::from_u8(vec![1])).unwrap();
    assert!(matches!(
        store.update_dataset_metadata(0, "never_written", &md, false),
        Err(StoreError::NotFound { .. })
    ));
    assert_eq!(store.list_datasets(0).unwrap(), vec!["/img"]);
}

#[test]
fn test_update_dataset_metadata_guard_and_merge() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    let mut initial = AttrMap::new();
    initial.insert("gain".to_string(), AttrValue::F64(2.0));
    store
        .write_with(
            0,
            "img",
            Array::from_u16(vec![1]),
            WriteOptions::new().metadata(initial),
        )
        .unwrap();

    // Disjoint update merges.
    let mut extra = AttrMap::new();
    extra.insert("offset".to_string(), AttrValue::F64(0.5));
    store
        .update_dataset_metadata(0, "img", &extra, false)
        .unwrap();
    assert_eq!(store.get_dataset_metadata(0, "img").unwrap().len(), 2);

    // Clashing update without overwrite is rejected.
    let mut clash = AttrMap::new();
    clash.insert("gain".to_string(), AttrValue::F64(4.0));
    assert!(matches!(
        store.update_dataset_metadata(0, "img", &clash, false),
        Err(StoreError::AttrConflict { .. })
    ));
    assert_eq!(
        store.get_dataset_metadata(0, "img").unwrap().get("gain"),
        Some(&AttrValue::F64(2.0))
    );

    // With overwrite it wins.
    store
        .update_dataset_metadata(0, "img", &clash, true)
        .unwrap();
    assert_eq!(
        store.get_dataset_metadata(0, "img").unwrap().get("gain"),
        Some(&AttrValue::F64(4.0))
    );
}

#[test]
fn test_update_metadata_on_nested_dataset() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    store
        .write(0, "analysis/centers", Array::from_f64(vec![0.5]))
        .unwrap();

    let mut md = AttrMap::new();
    md.insert("pass".to_string(), AttrValue::I64(1));
    store
        .update_dataset_metadata(0, "analysis/centers", &md, false)
        .unwrap();
    assert_eq!(
        store.get_dataset_metadata(0, "analysis/centers").unwrap(),
        md
    );
}

// =============================================================================
// Independence Tests
// =============================================================================

#[test]
fn test_same_key_is_independent_across_scopes() {
    let (_temp, path) = temp_container_path();
    let mut store = open_store(&path);

    store.write(0, "img", Array::from_u8(vec![1])).unwrap();
    store.write(1, "img", Array::from_u8(vec![2])).unwrap();

    let mut frame_md = AttrMap::new();
    frame_md.insert("label".to_string(), AttrValue::Str("frame".to_string()));
    let mut dset_md = AttrMap::new();
    dset_md.insert("label".to_string(), AttrValue::Str("dataset".to_string()));
    let mut other_md = AttrMap::new();
    other_md.insert("label".to_string(), AttrValue::Str("other".to_string()));

    store.set_frame_metadata(0, &frame_md, false).unwrap();
    store
        .update_dataset_metadata(0, "img", &dset_md, false)
        .unwrap();
    store.set_frame_metadata(1, &other_md, false).unwrap();

    assert_eq!(
        store.get_frame_metadata(0).unwrap().get("label"),
        Some(&AttrValue::Str("frame".to_string()))
    );
    assert_eq!(
        store.get_dataset_metadata(0, "img").unwrap().get("label"),
        Some(&AttrValue::Str("dataset".to_string()))
    );
    assert_eq!(
        store.get_frame_metadata(1).unwrap().get("label"),
        Some(&AttrValue::Str("other".to_string()))
    );
    assert!(store.get_dataset_metadata(1, "img").unwrap().is_empty());
}
