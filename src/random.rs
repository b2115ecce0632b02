//! Random-content file generation.
//!
//! Files are written from one reusable buffer of
//! [`RandomFileOptions::buffer_size`] bytes, re-randomized before every
//! write, so memory use stays bounded whatever the requested size.

use crate::error::{Error, Result, is_no_space_error};
use crate::options::RandomFileOptions;
use crate::units::FileSizeUnit;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Random alphanumeric characters in a generated file name.
const GENERATED_NAME_LEN: usize = 32;

/// Create a file of exactly `size` random bytes.
///
/// With a `target`, the file is created there (an existing file is
/// truncated). Without one, or with an empty path, a unique name of random
/// characters with [`RandomFileOptions::extension`] is created in the
/// current working directory.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written. The
/// partial file is removed first; a failed removal is reported as a warning.
///
/// # Example
///
/// ```no_run
/// use fskit::{create_random_file, RandomFileOptions};
/// use std::path::Path;
///
/// let path = create_random_file(
///     10 * 1024 * 1024,
///     Some(Path::new("fixtures/blob.bin")),
///     &RandomFileOptions::default(),
/// )?;
/// # Ok::<(), fskit::Error>(())
/// ```
pub fn create_random_file(
    size: u64,
    target: Option<&Path>,
    options: &RandomFileOptions,
) -> Result<PathBuf> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match target.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => write_to_target(path, size, options, &mut rng),
        None => write_to_generated(size, options, &mut rng),
    };

    if let Err(Error::Io(e)) = &result {
        if is_no_space_error(e) {
            options.warn(&format!(
                "Out of disk space generating a {} byte file",
                size
            ));
        }
    }
    result
}

/// Create a file of `magnitude` units of random bytes.
///
/// See [`create_random_file`].
///
/// # Errors
///
/// Returns [`Error::SizeOverflow`] if the size does not fit in a `u64`,
/// otherwise the errors of [`create_random_file`].
pub fn create_random_file_in_units(
    magnitude: u64,
    unit: FileSizeUnit,
    target: Option<&Path>,
    options: &RandomFileOptions,
) -> Result<PathBuf> {
    let size = unit.to_bytes(magnitude)?;
    create_random_file(size, target, options)
}

fn write_to_target(
    path: &Path,
    size: u64,
    options: &RandomFileOptions,
    rng: &mut StdRng,
) -> Result<PathBuf> {
    let mut file = File::create(path)?;

    let written = write_random(&mut file, size, options.buffer_size, rng).and_then(|()| {
        if options.fsync {
            file.sync_all()
        } else {
            Ok(())
        }
    });
    drop(file);

    keep_or_discard(path, written, options)?;
    Ok(path.to_path_buf())
}

/// Pass a successful write through; after a failed one, remove `path`
/// and return the write error.
fn keep_or_discard(
    path: &Path,
    written: io::Result<()>,
    options: &RandomFileOptions,
) -> Result<()> {
    let Err(e) = written else {
        return Ok(());
    };
    if let Err(cleanup) = fs::remove_file(path) {
        options.warn(&format!(
            "Failed to remove partial file {}: {}",
            path.display(),
            cleanup
        ));
    }
    Err(e.into())
}

fn write_to_generated(size: u64, options: &RandomFileOptions, rng: &mut StdRng) -> Result<PathBuf> {
    let suffix = if options.extension.is_empty() {
        String::new()
    } else {
        format!(".{}", options.extension)
    };

    // Dropping the temp file on any error path removes it.
    let mut file = tempfile::Builder::new()
        .prefix("")
        .suffix(&suffix)
        .rand_bytes(GENERATED_NAME_LEN)
        .tempfile_in(std::env::current_dir()?)?;

    write_random(file.as_file_mut(), size, options.buffer_size, rng)?;
    if options.fsync {
        file.as_file().sync_all()?;
    }

    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// Write exactly `size` random bytes to `out`, at most `buffer_size` per write.
fn write_random<W, R>(out: &mut W, size: u64, buffer_size: usize, rng: &mut R) -> io::Result<()>
where
    W: Write,
    R: RngCore,
{
    let capacity = size.min(buffer_size.max(1) as u64) as usize;
    let mut buffer = vec![0u8; capacity];
    let mut remaining = size;

    while remaining > 0 {
        let n = remaining.min(capacity as u64) as usize;
        rng.fill_bytes(&mut buffer[..n]);
        out.write_all(&buffer[..n])?;
        remaining -= n as u64;
    }

    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
