//! Directory size integration tests.

#[path = "../common/mod.rs"]
mod common;

use common::TestFixture;
use fskit::{DirSize, dir_size, format_bytes};
use std::fs;

#[test]
fn test_recursive_size_matches_written_bytes() {
    let fixture = TestFixture::new();
    fixture.write_src("a.bin", vec![1u8; 1000]);
    fixture.write_src("x/b.bin", vec![2u8; 2000]);
    fixture.write_src("x/y/c.bin", vec![3u8; 3000]);
    fs::create_dir(fixture.src.path().join("empty")).unwrap();

    let size = dir_size(fixture.src.path(), true).unwrap();

    assert_eq!(
        size,
        DirSize {
            total_bytes: 6000,
            file_count: 3
        }
    );
    assert_eq!(format_bytes(size.total_bytes), "5.86 KB");
}

#[test]
fn test_top_level_only() {
    let fixture = TestFixture::new();
    fixture.write_src("a.bin", vec![0u8; 10]);
    fixture.write_src("deep/b.bin", vec![0u8; 99]);

    let size = dir_size(fixture.src.path(), false).unwrap();

    assert_eq!(size.total_bytes, 10);
    assert_eq!(size.file_count, 1);
}

#[test]
fn test_size_of_copy_equals_source() {
    let fixture = TestFixture::new();
    fixture.create_nested_structure(3, 4);

    let dest = fixture.dst.path().join("copy");
    fskit::copy_dir(fixture.src.path(), &dest, &fskit::CopyOptions::default()).unwrap();

    assert_eq!(
        dir_size(fixture.src.path(), true).unwrap(),
        dir_size(&dest, true).unwrap()
    );
}

#[test]
fn test_missing_directory_is_zero() {
    let fixture = TestFixture::new();
    let size = dir_size(&fixture.src.path().join("nope"), true).unwrap();
    assert_eq!(size, DirSize::default());
}
