//! Progress reporting for streamed transfers.
//!
//! A transfer owns its [`CopyProgress`] accumulator and hands out copies of
//! it through a [`ProgressSink`]. The sink decides where snapshots go: a
//! closure, an mpsc channel drained by another task, a watch channel holding
//! only the latest value, or (with the `progress` feature) an indicatif bar.

use tokio::sync::{mpsc, watch};

/// Snapshot of a single-file transfer.
///
/// `bytes_copied <= total_bytes` holds for every snapshot delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyProgress {
    /// Bytes written to the destination so far
    pub bytes_copied: u64,
    /// Length of the source file
    pub total_bytes: u64,
}

impl CopyProgress {
    pub(crate) fn new(total_bytes: u64) -> Self {
        Self {
            bytes_copied: 0,
            total_bytes,
        }
    }

    /// Add a chunk and return the snapshot to publish.
    ///
    /// A source that grew after its length was read raises `total_bytes`
    /// with it.
    pub(crate) fn advance(&mut self, chunk: u64) -> CopyProgress {
        self.bytes_copied += chunk;
        self.total_bytes = self.total_bytes.max(self.bytes_copied);
        *self
    }

    /// Fraction done in `0.0..=1.0`; an empty source counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.bytes_copied as f64 / self.total_bytes as f64
        }
    }

    /// Whether every byte of the source has been written.
    pub fn is_complete(&self) -> bool {
        self.bytes_copied >= self.total_bytes
    }
}

/// Receiver of progress snapshots.
///
/// Called once per transferred chunk, in transfer order, on the task running
/// the transfer. Implementations should return quickly; anything slow belongs
/// on the other side of a channel.
pub trait ProgressSink {
    /// Deliver one snapshot.
    fn report(&mut self, progress: CopyProgress);
}

impl<F> ProgressSink for F
where
    F: FnMut(CopyProgress),
{
    fn report(&mut self, progress: CopyProgress) {
        (*self)(progress);
    }
}

/// Every snapshot is queued; a dropped receiver is ignored.
impl ProgressSink for mpsc::UnboundedSender<CopyProgress> {
    fn report(&mut self, progress: CopyProgress) {
        let _ = self.send(progress);
    }
}

/// Only the latest snapshot is kept, even with no receiver subscribed.
impl ProgressSink for watch::Sender<CopyProgress> {
    fn report(&mut self, progress: CopyProgress) {
        self.send_replace(progress);
    }
}

#[cfg(feature = "progress")]
impl ProgressSink for indicatif::ProgressBar {
    fn report(&mut self, progress: CopyProgress) {
        self.set_length(progress.total_bytes);
        self.set_position(progress.bytes_copied);
    }
}

/// Create a default byte progress bar for a single transfer
#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
#[must_use]
pub fn create_progress_bar(total_bytes: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
