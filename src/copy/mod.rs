//! Directory and single-file copy.
//!
//! The synchronous counterpart of [`crate::stream`]: files are copied with
//! the kernel fast path where available, and conflicts follow
//! [`OnConflict`](crate::OnConflict).

mod dir;
mod file;
mod utils;

pub use dir::{CopyStats, copy_dir};
pub use file::copy_file;

pub(crate) use file::copy_file_internal;
