//! Builder API for directory and file copies.
//!
//! A fluent alternative to constructing [`CopyOptions`] by hand.
//!
//! # Examples
//!
//! ```no_run
//! use fskit::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst")
//!     .skip_existing()
//!     .no_timestamps()
//!     .run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), fskit::Error>(())
//! ```

use crate::copy::{CopyStats, copy_dir, copy_file_internal};
use crate::error::Result;
use crate::options::{CopyOptions, OnConflict};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A builder for configuring and executing copy operations.
///
/// [`run`](Self::run) picks [`copy_dir`] or a single-file copy depending on
/// what the source is.
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a builder with default [`CopyOptions`] (fail on conflicts,
    /// preserve permissions and timestamps, fsync).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Replace existing files at the destination.
    #[must_use]
    pub fn overwrite(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Overwrite);
        self
    }

    /// Leave existing destination files alone and count them as skipped.
    ///
    /// Re-running an interrupted copy this way only copies what is missing.
    #[must_use]
    pub fn skip_existing(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Skip);
        self
    }

    /// Fail on the first existing destination file (the default).
    #[must_use]
    pub fn error_on_conflict(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Error);
        self
    }

    /// Skip the per-file fsync.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Don't preserve modification and access times.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Don't preserve file permissions.
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Route warnings to `handler` instead of the default logger.
    ///
    /// ```no_run
    /// use fskit::CopyBuilder;
    ///
    /// let stats = CopyBuilder::new("src", "dst")
    ///     .on_warning(|msg| eprintln!("warning: {}", msg))
    ///     .run()?;
    /// # Ok::<(), fskit::Error>(())
    /// ```
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Receive one line per copied or skipped file.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// A directory source goes through [`copy_dir`]; anything else is
    /// copied as a single file.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying copy returns.
    pub fn run(self) -> Result<CopyStats> {
        if self.src.is_dir() {
            self.run_dir()
        } else {
            self.run_file()
        }
    }

    /// Execute the copy for a directory only.
    ///
    /// Fails with [`Error::NotADirectory`](crate::Error::NotADirectory) for a
    /// file source.
    pub fn run_dir(self) -> Result<CopyStats> {
        copy_dir(&self.src, &self.dst, &self.options)
    }

    /// Execute the copy for a single file only.
    ///
    /// Fails with [`Error::IsADirectory`](crate::Error::IsADirectory) for a
    /// directory source.
    pub fn run_file(self) -> Result<CopyStats> {
        let start = Instant::now();
        let result = copy_file_internal(&self.src, &self.dst, &self.options)?;

        Ok(CopyStats {
            files_copied: u64::from(result.copied),
            files_skipped: u64::from(!result.copied),
            dirs_created: 0,
            bytes_copied: result.bytes,
            duration: start.elapsed(),
        })
    }
}
