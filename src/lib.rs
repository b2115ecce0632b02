//! # fskit
//!
//! Filesystem utilities: tree mapping and directory copies, streamed
//! copy/move with progress, random file generation, and directory sizes.
//!
//! ## Core Features
//!
//! - **Tree mapping**: Pair every directory and file of a source tree with its destination path
//! - **Directory copy**: Build the destination skeleton, then copy files in sequence
//! - **Streamed copy/move**: Chunked async transfer over `tokio::fs` with per-chunk progress
//! - **Random files**: Exact-size random content from one bounded buffer
//! - **Directory size**: Total bytes and file count, top level or recursive
//! - **Helpers**: Byte formatting, file name sanitation, unique output names, free space
//!
//! ## Quick Start
//!
//! ```no_run
//! use fskit::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst").skip_existing().run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), fskit::Error>(())
//! ```
//!
//! ## Streamed Copy with Progress
//!
//! Progress snapshots go to any [`ProgressSink`]: a closure, a tokio mpsc
//! or watch sender, or an indicatif bar with the `progress` feature.
//!
//! ```no_run
//! use fskit::{stream, CopyProgress, StreamOptions};
//! use std::path::Path;
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> fskit::Result<()> {
//! let (tx, mut rx) = mpsc::unbounded_channel::<CopyProgress>();
//! tokio::spawn(async move {
//!     while let Some(p) = rx.recv().await {
//!         println!("{}/{}", p.bytes_copied, p.total_bytes);
//!     }
//! });
//!
//! stream::move_file_with_progress(
//!     Path::new("in.bin"),
//!     Path::new("out.bin"),
//!     &StreamOptions::default(),
//!     tx,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use fskit::{copy_dir, dir_size, format_bytes, CopyOptions, OnConflict};
//! use std::path::Path;
//!
//! let options = CopyOptions::default()
//!     .with_on_conflict(OnConflict::Overwrite)
//!     .without_fsync();
//!
//! copy_dir(Path::new("photos"), Path::new("backup"), &options)?;
//! let size = dir_size(Path::new("backup"), true)?;
//! println!("{} in {} files", format_bytes(size.total_bytes), size.file_count);
//! # Ok::<(), fskit::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | [`ProgressSink`] for indicatif progress bars |
//! | `tracing` | Warnings and per-file activity through the tracing crate (default) |
//! | `serde` | Serialize/Deserialize for options and reported values |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod names;
mod options;
mod progress;
mod random;
mod size;
mod space;
pub mod stream;
mod tree;
mod units;

pub use builder::CopyBuilder;
pub use copy::{CopyStats, copy_dir, copy_file};
pub use error::{Error, Result, is_no_space_error};
pub use names::{
    FileNameCheck, check_file_name, is_invalid_file_name_char, remove_file_extension,
    sanitize_file_name, unique_output_path,
};
pub use options::{
    CopyOptions, DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_RANDOM_EXTENSION, OnConflict,
    RandomFileOptions, StreamOptions,
};
pub use progress::{CopyProgress, ProgressSink};
pub use random::{create_random_file, create_random_file_in_units};
pub use size::{DirSize, dir_size};
pub use space::free_space;
pub use tree::{PathPair, TreeMap, list_files, map_tree};
pub use units::{BYTES_PER_GB, BYTES_PER_KB, BYTES_PER_MB, FileSizeUnit, format_bytes};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
