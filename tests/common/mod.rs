//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fresh source and destination directories, removed on drop.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let make = || TempDir::new().expect("temp dir");
        Self {
            src: make(),
            dst: make(),
        }
    }

    /// Write `content` at `rel` inside the source tree and return its path.
    pub fn write_src(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.src.path().join(rel);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("create parents");
        fs::write(&path, content).expect("write source file");
        path
    }

    /// Build `level0/level1/...` `depth` deep under the source, with
    /// `files_per_level` files named `fileN.txt` in each level.
    pub fn create_nested_structure(&self, depth: usize, files_per_level: usize) {
        let mut rel = PathBuf::new();
        for level in 0..depth {
            rel.push(format!("level{level}"));
            for n in 0..files_per_level {
                let file = rel.join(format!("file{n}.txt"));
                self.write_src(
                    file.to_str().expect("utf-8 path"),
                    format!("content at level {level}"),
                );
            }
            fs::create_dir_all(self.src.path().join(&rel)).expect("create level");
        }
    }

    /// Number of non-directory entries anywhere under `dir`.
    pub fn count_files_recursive(&self, dir: &Path) -> usize {
        let mut pending = vec![dir.to_path_buf()];
        let mut files = 0;
        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current).expect("read dir") {
                let path = entry.expect("dir entry").path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    files += 1;
                }
            }
        }
        files
    }

    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        match fs::read_to_string(path) {
            Ok(actual) => assert_eq!(actual, expected, "unexpected content in {}", path.display()),
            Err(e) => panic!("cannot read {}: {e}", path.display()),
        }
    }
}

/// `len` bytes cycling through 0..251, so chunk boundaries never line up
/// with the pattern.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
