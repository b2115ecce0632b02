//! Free space of the volume holding a path.

use crate::error::{Error, Result};
use std::io;
use std::path::Path;

/// Bytes available to the calling user on the volume that holds `path`.
///
/// `path` may be a file or a directory.
///
/// # Errors
///
/// - `path` is neither an existing file nor an existing directory
///   ([`Error::InvalidPath`])
/// - The platform query fails ([`Error::Io`])
///
/// # Example
///
/// ```no_run
/// use fskit::{free_space, format_bytes};
/// use std::path::Path;
///
/// let free = free_space(Path::new("."))?;
/// println!("{} free", format_bytes(free));
/// # Ok::<(), fskit::Error>(())
/// ```
pub fn free_space(path: &Path) -> Result<u64> {
    if !path.is_file() && !path.is_dir() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }
    available_space(path)
}

#[cfg(unix)]
fn available_space(path: &Path) -> Result<u64> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::InvalidPath(path.to_path_buf()))?;

    // SAFETY: c_path is a valid NUL-terminated string and stat is only read
    // after statvfs reports success.
    let stat = unsafe {
        let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();
        if libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error().into());
        }
        stat.assume_init()
    };

    // Cast needed on macOS, not on Linux
    #[allow(clippy::unnecessary_cast)]
    let available = (stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64);
    Ok(available)
}

#[cfg(windows)]
fn available_space(path: &Path) -> Result<u64> {
    use windows::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;
    use windows::core::HSTRING;

    // GetDiskFreeSpaceExW wants a directory
    let dir = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };

    let mut available: u64 = 0;
    // SAFETY: the out pointer refers to a live local for the whole call.
    unsafe {
        GetDiskFreeSpaceExW(
            &HSTRING::from(dir.as_os_str()),
            Some(&mut available as *mut u64),
            None,
            None,
        )
    }
    .map_err(io::Error::other)?;

    Ok(available)
}

#[cfg(not(any(unix, windows)))]
fn available_space(_path: &Path) -> Result<u64> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "free space query is not supported on this platform",
    )
    .into())
}
