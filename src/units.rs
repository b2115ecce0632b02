//! Byte units and human-readable sizes.
//!
//! All units are binary (1 KB = 1024 bytes).

use crate::error::{Error, Result};
use std::fmt;

/// Canonical KB→bytes multiplier.
pub const BYTES_PER_KB: u64 = 1024;

/// Canonical MB→bytes multiplier (1024 * KB).
pub const BYTES_PER_MB: u64 = 1024 * BYTES_PER_KB;

/// Canonical GB→bytes multiplier (1024 * MB).
pub const BYTES_PER_GB: u64 = 1024 * BYTES_PER_MB;

/// Unit of a caller-supplied file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileSizeUnit {
    /// Kilobytes (1024 bytes)
    KB,
    /// Megabytes (1024 KB)
    MB,
    /// Gigabytes (1024 MB)
    GB,
}

impl FileSizeUnit {
    /// Bytes in one unit.
    pub const fn bytes(self) -> u64 {
        match self {
            FileSizeUnit::KB => BYTES_PER_KB,
            FileSizeUnit::MB => BYTES_PER_MB,
            FileSizeUnit::GB => BYTES_PER_GB,
        }
    }

    /// Short name of the unit ("KB", "MB", "GB").
    pub const fn as_str(self) -> &'static str {
        match self {
            FileSizeUnit::KB => "KB",
            FileSizeUnit::MB => "MB",
            FileSizeUnit::GB => "GB",
        }
    }

    /// Convert `magnitude` units to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if the result does not fit in a `u64`.
    ///
    /// ```
    /// use fskit::FileSizeUnit;
    ///
    /// assert_eq!(FileSizeUnit::MB.to_bytes(3)?, 3 * 1024 * 1024);
    /// assert!(FileSizeUnit::GB.to_bytes(u64::MAX).is_err());
    /// # Ok::<(), fskit::Error>(())
    /// ```
    pub fn to_bytes(self, magnitude: u64) -> Result<u64> {
        magnitude
            .checked_mul(self.bytes())
            .ok_or(Error::SizeOverflow {
                magnitude,
                unit: self.as_str(),
            })
    }
}

impl fmt::Display for FileSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a byte count for display.
///
/// Counts below 1 KB print as `"{n} Byte/s"`. Larger counts use the
/// largest of KB, MB or GB that keeps the value at or above 1, rounded to
/// two decimals (halves to even) with trailing zeros dropped.
///
/// ```
/// use fskit::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 Byte/s");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let (divisor, unit) = if bytes < BYTES_PER_KB {
        return format!("{} Byte/s", bytes);
    } else if bytes < BYTES_PER_MB {
        (BYTES_PER_KB, FileSizeUnit::KB)
    } else if bytes < BYTES_PER_GB {
        (BYTES_PER_MB, FileSizeUnit::MB)
    } else {
        (BYTES_PER_GB, FileSizeUnit::GB)
    };

    let value = bytes as f64 / divisor as f64;
    // two decimals, ties to even
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    format!("{} {}", rounded, unit)
}
