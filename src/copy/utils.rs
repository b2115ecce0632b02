//! Low-level helpers for the synchronous copiers.

use filetime::{FileTime, set_file_times};
use std::fs::{self, File, Metadata};
use std::io::{self, BufReader};
use std::path::Path;

/// Upper bound on a single `copy_file_range` request.
#[cfg(target_os = "linux")]
const MAX_RANGE_CHUNK: u64 = 128 * 1024 * 1024;

/// Move `len` bytes from `src` to `dst`, returning the count actually moved.
///
/// Linux lets the kernel do the transfer with `copy_file_range(2)`; every
/// other target copies through a buffered reader.
pub(crate) fn copy_file_contents(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        kernel_copy(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = len;
        buffered_copy(src, dst)
    }
}

fn buffered_copy(src: &File, dst: &File) -> io::Result<u64> {
    io::copy(&mut BufReader::new(src), &mut &*dst)
}

#[cfg(target_os = "linux")]
fn kernel_copy(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    let mut moved: u64 = 0;

    while moved < len {
        let request = (len - moved).min(MAX_RANGE_CHUNK) as usize;

        // SAFETY: both descriptors stay open across the call; null offsets
        // use and advance each file's own position.
        let n = unsafe {
            libc::copy_file_range(
                src.as_raw_fd(),
                std::ptr::null_mut(),
                dst.as_raw_fd(),
                std::ptr::null_mut(),
                request,
                0,
            )
        };

        if n < 0 {
            let err = io::Error::last_os_error();
            let refused = matches!(
                err.raw_os_error(),
                Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EOPNOTSUPP)
            );
            // positions are untouched until the first byte moves
            if refused && moved == 0 {
                return buffered_copy(src, dst);
            }
            return Err(err);
        }
        if n == 0 {
            // source was truncated after the stat
            break;
        }
        moved += n as u64;
    }

    Ok(moved)
}

/// Stamp `dst` with the access and modification times in `src_meta`.
pub(crate) fn preserve_timestamps(src_meta: &Metadata, dst: &Path) -> io::Result<()> {
    set_file_times(
        dst,
        FileTime::from_last_access_time(src_meta),
        FileTime::from_last_modification_time(src_meta),
    )
}

/// Remove the file or symlink at `path` so a fresh file can be created there.
///
/// Directories are left alone; callers reject them before getting here.
pub(crate) fn remove_existing(path: &Path, meta: &Metadata) -> io::Result<()> {
    let kind = meta.file_type();
    if kind.is_file() || kind.is_symlink() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}
