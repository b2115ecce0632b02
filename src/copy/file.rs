//! Single file copy used by the directory copier.
//!
//! Unlike the streamed copy in [`crate::stream`], this path honors
//! [`OnConflict`] and preserves permissions and timestamps.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use super::utils::{copy_file_contents, preserve_timestamps, remove_existing};

/// Outcome of one file copy: whether it happened and how much was written.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FileCopyResult {
    pub copied: bool,
    pub bytes: u64,
}

impl FileCopyResult {
    const SKIPPED: Self = Self {
        copied: false,
        bytes: 0,
    };

    fn written(bytes: u64) -> Self {
        Self {
            copied: true,
            bytes,
        }
    }
}

/// Copy a single file according to `options`.
///
/// # Returns
///
/// Returns `Ok(true)` if the file was copied, `Ok(false)` if it was skipped
/// under [`OnConflict::Skip`].
///
/// # Errors
///
/// [`Error::SourceNotFound`] or [`Error::IsADirectory`] for a bad source,
/// [`Error::AlreadyExists`] when `dst` exists under [`OnConflict::Error`],
/// and [`Error::Io`] for anything the filesystem rejects.
#[must_use = "a skipped copy returns Ok(false)"]
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<bool> {
    copy_file_internal(src, dst, options).map(|r| r.copied)
}

/// Internal file copy that also reports the byte count.
pub(crate) fn copy_file_internal(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<FileCopyResult> {
    let src_meta = match fs::metadata(src) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound(src.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }

    match fs::symlink_metadata(dst) {
        Ok(dst_meta) => match options.on_conflict {
            OnConflict::Skip => return Ok(FileCopyResult::SKIPPED),
            OnConflict::Error => return Err(Error::AlreadyExists(dst.to_path_buf())),
            OnConflict::Overwrite if dst_meta.is_dir() => {
                return Err(Error::IsADirectory(dst.to_path_buf()));
            }
            OnConflict::Overwrite => remove_existing(dst, &dst_meta)?,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let src_file = File::open(src)?;

    // create_new turns a destination that appeared since the check into a conflict
    let dst_file = match OpenOptions::new().write(true).create_new(true).open(dst) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return match options.on_conflict {
                OnConflict::Skip => Ok(FileCopyResult::SKIPPED),
                _ => Err(Error::AlreadyExists(dst.to_path_buf())),
            };
        }
        Err(e) => return Err(e.into()),
    };

    let bytes_copied = copy_file_contents(&src_file, &dst_file, src_meta.len())?;

    if options.fsync {
        dst_file.sync_all()?;
    }

    if options.preserve_permissions {
        fs::set_permissions(dst, src_meta.permissions())?;
    }
    drop(dst_file);

    if options.preserve_timestamps {
        if let Err(e) = preserve_timestamps(&src_meta, dst) {
            options.warn(&format!(
                "Failed to preserve timestamps on {}: {}",
                dst.display(),
                e
            ));
        }
    }

    Ok(FileCopyResult::written(bytes_copied))
}
