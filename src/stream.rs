//! Streamed single-file copy and move.
//!
//! Files are transferred in fixed-size chunks over `tokio::fs`, with one
//! [`CopyProgress`] snapshot delivered to a [`ProgressSink`] after every
//! chunk. The destination must not exist beforehand.
//!
//! # Example
//!
//! ```no_run
//! use fskit::{stream, CopyProgress, StreamOptions};
//! use std::path::Path;
//!
//! # async fn run() -> fskit::Result<()> {
//! let options = StreamOptions::default();
//! let bytes = stream::copy_file_with_progress(
//!     Path::new("video.mp4"),
//!     Path::new("backup/video.mp4"),
//!     &options,
//!     |p: CopyProgress| println!("{:.0}%", p.fraction() * 100.0),
//! )
//! .await?;
//! println!("{} bytes", bytes);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::options::StreamOptions;
use crate::progress::{CopyProgress, ProgressSink};
use std::io;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// Copy `src` to a new file at `dst`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is a directory ([`Error::IsADirectory`])
/// - Destination already exists ([`Error::AlreadyExists`])
/// - Reading or writing fails ([`Error::Io`]); the partial destination is removed
pub async fn copy_file(src: &Path, dst: &Path, options: &StreamOptions) -> Result<u64> {
    copy_file_with_progress(src, dst, options, |_: CopyProgress| {}).await
}

/// Copy `src` to a new file at `dst`, reporting progress to `sink`.
///
/// `sink` receives one snapshot per non-empty chunk, in order, with
/// strictly increasing `bytes_copied`. An empty source produces no snapshot.
///
/// # Errors
///
/// Same as [`copy_file`].
pub async fn copy_file_with_progress<S>(
    src: &Path,
    dst: &Path,
    options: &StreamOptions,
    mut sink: S,
) -> Result<u64>
where
    S: ProgressSink,
{
    let src_meta = match fs::metadata(src).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound(src.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }

    let mut reader = File::open(src).await?;
    let bytes = write_new(&mut reader, dst, src_meta.len(), options, &mut sink).await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Streamed {} -> {} ({} bytes)",
        src.display(),
        dst.display(),
        bytes
    );
    Ok(bytes)
}

/// Create `dst` and stream `reader` into it.
///
/// On a failed transfer the destination handle is closed and `dst` removed
/// before the error is returned.
async fn write_new<R, S>(
    reader: &mut R,
    dst: &Path,
    total_bytes: u64,
    options: &StreamOptions,
    sink: &mut S,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
    S: ProgressSink,
{
    let mut writer = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::AlreadyExists(dst.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let result = transfer(reader, &mut writer, total_bytes, options, sink).await;
    drop(writer);

    if result.is_err() {
        remove_partial(dst, options).await;
    }
    result
}

/// Move `src` to `dst` by streaming a copy and deleting the source.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Everything [`copy_file`] returns, plus [`Error::SourceNotRemoved`] when
/// the copy completed but the source could not be deleted. In that case the
/// file exists in both places.
pub async fn move_file(src: &Path, dst: &Path, options: &StreamOptions) -> Result<u64> {
    move_file_with_progress(src, dst, options, |_: CopyProgress| {}).await
}

/// Move `src` to `dst`, reporting progress of the copy phase to `sink`.
///
/// # Errors
///
/// Same as [`move_file`].
pub async fn move_file_with_progress<S>(
    src: &Path,
    dst: &Path,
    options: &StreamOptions,
    sink: S,
) -> Result<u64>
where
    S: ProgressSink,
{
    let bytes = copy_file_with_progress(src, dst, options, sink).await?;

    if let Err(source) = fs::remove_file(src).await {
        return Err(Error::SourceNotRemoved {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        });
    }

    Ok(bytes)
}

async fn transfer<R, S>(
    reader: &mut R,
    writer: &mut File,
    total_bytes: u64,
    options: &StreamOptions,
    sink: &mut S,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
    S: ProgressSink,
{
    let mut buffer = vec![0u8; options.chunk_size.max(1)];
    let mut progress = CopyProgress::new(total_bytes);

    loop {
        let n = read_chunk(reader, &mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await?;
        sink.report(progress.advance(n as u64));
    }

    writer.flush().await?;
    if options.fsync {
        writer.sync_all().await?;
    }

    Ok(progress.bytes_copied)
}

/// Read until `buf` is full or the stream ends.
///
/// Returns 0 only at end of stream.
async fn read_chunk<R>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

async fn remove_partial(dst: &Path, options: &StreamOptions) {
    match fs::remove_file(dst).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => options.warn(&format!(
            "Failed to remove partial file {}: {}",
            dst.display(),
            e
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
