//! The crate-wide [`Error`] type.
//!
//! Every fallible operation returns [`Result`]. Variants carry the path they
//! concern; plain filesystem failures arrive as [`Error::Io`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Whether `error` means the target volume is full.
///
/// Matches [`io::ErrorKind::StorageFull`] plus the raw codes some platforms
/// report instead: `ENOSPC` on Unix and `ERROR_DISK_FULL` on Windows.
///
/// ```
/// use std::io;
/// use fskit::is_no_space_error;
///
/// assert!(is_no_space_error(&io::Error::new(io::ErrorKind::StorageFull, "full")));
/// assert!(!is_no_space_error(&io::Error::new(io::ErrorKind::NotFound, "gone")));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    let full = Some(libc::ENOSPC);
    #[cfg(windows)]
    let full = Some(112); // ERROR_DISK_FULL
    #[cfg(not(any(unix, windows)))]
    let full: Option<i32> = None;

    full.is_some() && error.raw_os_error() == full
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Raised under [`OnConflict::Error`](crate::OnConflict::Error) and by
    /// streamed copies, which never replace a destination.
    #[error("Destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The path exists but is neither a regular file nor a directory, or
    /// does not exist at all.
    #[error("Not a file or directory: {0}")]
    InvalidPath(PathBuf),

    #[error("Expected a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Expected a file, found a directory: {0}")]
    IsADirectory(PathBuf),

    /// A move wrote `dst` completely but `src` could not be deleted.
    ///
    /// The data now lives at both paths; nothing is rolled back.
    #[error("Moved {src} to {dst} but could not delete the source: {source}")]
    SourceNotRemoved {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },

    /// A followed link leads back into one of its own ancestors.
    #[error("Symlink loop at {0}")]
    SymlinkLoop(PathBuf),

    #[error("{magnitude} {unit} does not fit in a 64-bit byte count")]
    SizeOverflow { magnitude: u64, unit: &'static str },
}

impl Error {
    /// The wrapped [`io::Error`], for [`Error::Io`] and
    /// [`Error::SourceNotRemoved`].
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            Error::Io(e) | Error::SourceNotRemoved { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
