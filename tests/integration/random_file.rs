//! Random file generation integration tests.

#[path = "../common/mod.rs"]
mod common;

use common::TestFixture;
use fskit::{
    DEFAULT_BUFFER_SIZE, Error, FileSizeUnit, RandomFileOptions, create_random_file,
    create_random_file_in_units,
};
use rstest::rstest;
use std::fs;

const B: u64 = 256;

#[rstest]
#[case::empty(0)]
#[case::one_byte(1)]
#[case::just_under_buffer(B - 1)]
#[case::exact_buffer(B)]
#[case::just_over_buffer(B + 1)]
#[case::many_buffers_and_remainder(10 * B + 37)]
fn test_exact_sizes(#[case] size: u64) {
    let fixture = TestFixture::new();
    let target = fixture.dst.path().join("random.bin");
    let options = RandomFileOptions::default().with_buffer_size(B as usize);

    let path = create_random_file(size, Some(&target), &options).unwrap();

    assert_eq!(path, target);
    assert_eq!(fs::metadata(&target).unwrap().len(), size);
}

#[test]
fn test_default_buffer_size_boundary() {
    let fixture = TestFixture::new();
    let target = fixture.dst.path().join("one_mb_plus.bin");
    let size = DEFAULT_BUFFER_SIZE as u64 + 1;

    create_random_file(size, Some(&target), &RandomFileOptions::default()).unwrap();

    assert_eq!(fs::metadata(&target).unwrap().len(), size);
}

#[test]
fn test_content_is_not_constant() {
    let fixture = TestFixture::new();
    let target = fixture.dst.path().join("noise.bin");
    let options = RandomFileOptions::default().with_buffer_size(64);

    create_random_file(4096, Some(&target), &options).unwrap();

    let data = fs::read(&target).unwrap();
    assert!(data.iter().any(|&b| b != data[0]));
    assert_ne!(&data[..64], &data[64..128]);
}

#[test]
fn test_generated_name_in_current_dir() {
    let options = RandomFileOptions::default().with_extension("fskit-it");

    let path = create_random_file(100, None, &options).unwrap();
    let guard = remove_on_drop(path.clone());

    assert_eq!(path.parent(), Some(std::env::current_dir().unwrap().as_path()));
    assert_eq!(
        path.extension().and_then(|e| e.to_str()),
        Some("fskit-it")
    );
    assert_eq!(fs::metadata(&path).unwrap().len(), 100);
    drop(guard);
    assert!(!path.exists());
}

#[test]
fn test_empty_target_means_generated_name() {
    let options = RandomFileOptions::default().with_extension("fskit-empty");

    let path = create_random_file(1, Some(std::path::Path::new("")), &options).unwrap();
    let _guard = remove_on_drop(path.clone());

    assert_eq!(
        path.extension().and_then(|e| e.to_str()),
        Some("fskit-empty")
    );
}

#[test]
fn test_unit_overload() {
    let fixture = TestFixture::new();
    let target = fixture.dst.path().join("three_kb.bin");

    create_random_file_in_units(3, FileSizeUnit::KB, Some(&target), &RandomFileOptions::default())
        .unwrap();

    assert_eq!(fs::metadata(&target).unwrap().len(), 3 * 1024);
}

#[test]
fn test_unit_overload_overflow_creates_nothing() {
    let fixture = TestFixture::new();
    let target = fixture.dst.path().join("huge.bin");

    let result = create_random_file_in_units(
        u64::MAX,
        FileSizeUnit::GB,
        Some(&target),
        &RandomFileOptions::default(),
    );

    assert!(matches!(result, Err(Error::SizeOverflow { .. })));
    assert!(!target.exists());
}

/// Removes the file when dropped.
struct RemoveOnDrop(std::path::PathBuf);

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn remove_on_drop(path: std::path::PathBuf) -> RemoveOnDrop {
    RemoveOnDrop(path)
}
