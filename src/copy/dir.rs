//! Directory copy operations.
//!
//! [`copy_dir`] maps the source tree, builds the destination skeleton, then
//! copies files one at a time in traversal order.

use crate::error::Result;
use crate::options::CopyOptions;
use crate::tree::map_tree;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use super::file::copy_file_internal;

/// Counters reported by [`copy_dir`] and [`CopyBuilder`](crate::CopyBuilder).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyStats {
    pub files_copied: u64,
    /// Files left alone under [`OnConflict::Skip`](crate::OnConflict::Skip)
    pub files_skipped: u64,
    /// Directories this copy had to create, `dst` itself included
    pub dirs_created: u64,
    pub bytes_copied: u64,
    pub duration: Duration,
}

/// Copy a directory tree into `dst`.
///
/// # Steps
///
/// 1. Map every directory and file under `src` with [`map_tree`]
/// 2. Create `dst` and every mapped directory (existing ones are reused)
/// 3. Copy every mapped file in sequence, honoring `options.on_conflict`
///
/// The first failing file stops the copy. Files copied before it are left in
/// place and the source tree is never modified.
///
/// # Errors
///
/// Fails with whatever [`map_tree`] reports for the source, then with the
/// first per-file error from the copy phase.
pub fn copy_dir(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();

    let map = map_tree(src, dst, options)?;
    let mut stats = CopyStats::default();

    if !dst.is_dir() {
        fs::create_dir_all(dst)?;
        stats.dirs_created += 1;
    }

    // map.dirs lists every parent before its children
    for dir in &map.dirs {
        if !dir.dst.is_dir() {
            fs::create_dir_all(&dir.dst)?;
            stats.dirs_created += 1;
        }
    }

    for file in &map.files {
        let result = match copy_file_internal(&file.src, &file.dst, options) {
            Ok(result) => result,
            Err(e) => {
                options.warn(&format!("Failed to copy {}: {}", file.src.display(), e));
                return Err(e);
            }
        };

        if result.copied {
            stats.files_copied += 1;
            stats.bytes_copied += result.bytes;
            options.verbose(&format!(
                "{} -> {}",
                file.src.display(),
                file.dst.display()
            ));
        } else {
            stats.files_skipped += 1;
            options.verbose(&format!("Skipped {} (exists)", file.dst.display()));
        }
    }

    stats.duration = start_time.elapsed();
    Ok(stats)
}
