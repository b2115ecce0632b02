//! Configuration options for toolkit operations.
//!
//! Each component takes its own options struct instead of reading
//! process-wide constants, so tests can shrink buffers and chunks:
//!
//! - [`CopyOptions`] for tree mapping and directory copies
//! - [`StreamOptions`] for streamed copy/move
//! - [`RandomFileOptions`] for random file generation
//!
//! # Example
//!
//! ```
//! use fskit::{CopyOptions, OnConflict, StreamOptions};
//!
//! let copy = CopyOptions::default()
//!     .with_on_conflict(OnConflict::Overwrite)
//!     .without_fsync();
//!
//! let stream = StreamOptions::default().with_chunk_size(64 * 1024);
//! ```

/// Default transfer chunk for [`StreamOptions`] (1 KB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default generation buffer for [`RandomFileOptions`] (1 MB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Extension given to generated files that have no explicit target.
pub const DEFAULT_RANDOM_EXTENSION: &str = "temp";

/// Behavior when a destination file already exists.
///
/// # Default
///
/// The default is [`OnConflict::Error`]: a directory copy never replaces
/// data unless asked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnConflict {
    /// Fail with [`Error::AlreadyExists`](crate::Error::AlreadyExists).
    ///
    /// The failure stops the directory copy; files copied before it stay.
    #[default]
    Error,
    /// Replace an existing file or symlink.
    ///
    /// A directory in the way is never removed; the copy fails with
    /// [`Error::IsADirectory`](crate::Error::IsADirectory).
    Overwrite,
    /// Leave the existing file alone and continue.
    Skip,
}

impl OnConflict {
    /// Map the classic `overwrite: bool` flag onto a policy.
    #[must_use]
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            OnConflict::Overwrite
        } else {
            OnConflict::Error
        }
    }
}

/// Options for tree mapping and directory copies.
///
/// Defaults fail on conflicts and keep permissions, timestamps and a
/// per-file fsync.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    pub on_conflict: OnConflict,
    pub preserve_permissions: bool,
    /// Access and modification times
    pub preserve_timestamps: bool,
    /// `sync_all` every destination file before moving on
    pub fsync: bool,

    /// Receives skipped-entry and cleanup warnings.
    ///
    /// Unset, warnings go to `tracing::warn!` when the `tracing` feature is
    /// on and are dropped otherwise.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Receives one line per copied or skipped file, `tracing::debug!` if unset.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            on_conflict: OnConflict::Error,
            preserve_permissions: true,
            preserve_timestamps: true,
            fsync: true,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl CopyOptions {
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Trade durability for speed.
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Leave destination permissions to the process umask.
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        emit_warning(self.warn_handler, msg);
    }

    pub(crate) fn verbose(&self, msg: &str) {
        match self.verbose_handler {
            Some(handler) => handler(msg),
            #[cfg(feature = "tracing")]
            None => tracing::debug!("{}", msg),
            #[cfg(not(feature = "tracing"))]
            None => {}
        }
    }
}

/// Options for streamed copy and move.
///
/// `chunk_size` is the unit of both I/O and progress reporting: one
/// [`CopyProgress`](crate::CopyProgress) snapshot is delivered per chunk.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamOptions {
    pub chunk_size: usize,
    /// `sync_all` the destination after the final flush
    pub fsync: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fsync: false,
            warn_handler: None,
        }
    }
}

impl StreamOptions {
    /// Zero is raised to one byte.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }

    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        emit_warning(self.warn_handler, msg);
    }
}

/// Options for random file generation.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `buffer_size` | 1,048,576 | Bytes randomized and written per pass |
/// | `extension` | `"temp"` | Extension of generated names |
/// | `seed` | `None` | Seed from OS entropy |
/// | `fsync` | `false` | Sync to disk before returning |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomFileOptions {
    pub buffer_size: usize,
    /// Used only for generated names, without the dot
    pub extension: String,
    pub seed: Option<u64>,
    pub fsync: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for RandomFileOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            extension: DEFAULT_RANDOM_EXTENSION.to_string(),
            seed: None,
            fsync: false,
            warn_handler: None,
        }
    }
}

impl RandomFileOptions {
    /// Zero is raised to one byte.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a fixed seed so the same size yields the same bytes
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }

    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        emit_warning(self.warn_handler, msg);
    }
}

fn emit_warning(handler: Option<fn(&str)>, msg: &str) {
    match handler {
        Some(handler) => handler(msg),
        #[cfg(feature = "tracing")]
        None => tracing::warn!("{}", msg),
        #[cfg(not(feature = "tracing"))]
        None => {}
    }
}
