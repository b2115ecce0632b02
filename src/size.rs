//! Directory disk usage.

use crate::error::Result;
use crate::tree::list_files;
use crate::units::format_bytes;
use std::fmt;
use std::fs;
use std::path::Path;

/// Total length and number of files under a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirSize {
    /// Sum of the lengths of every counted file
    pub total_bytes: u64,
    /// Number of counted files
    pub file_count: u64,
}

impl fmt::Display for DirSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} files",
            format_bytes(self.total_bytes),
            self.file_count
        )
    }
}

/// Sum the file lengths under `dir`.
///
/// With `include_subdirs` every subdirectory is included at any depth;
/// otherwise only the files directly inside `dir` count. A missing
/// directory, or a path to a file, yields `DirSize::default()`.
///
/// Symlinked files count with the length of their target, and symlinked
/// directories are descended into, with the same loop detection as
/// [`map_tree`](crate::map_tree).
///
/// # Errors
///
/// Returns an error if a directory or file cannot be read, or a symlink loops.
pub fn dir_size(dir: &Path, include_subdirs: bool) -> Result<DirSize> {
    let mut size = DirSize::default();
    for file in list_files(dir, include_subdirs)? {
        size.total_bytes += fs::metadata(&file)?.len();
        size.file_count += 1;
    }
    Ok(size)
}
