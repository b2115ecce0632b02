//! File name helpers.
//!
//! Validity checks against the platform's forbidden characters, extension
//! stripping, and non-colliding output paths.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Characters that may not appear in a file name on Windows, besides the
/// control characters.
#[cfg(windows)]
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Characters that may not appear in a file name on Unix.
#[cfg(not(windows))]
const RESERVED_CHARS: &[char] = &['/', '\0'];

/// Outcome of [`check_file_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameCheck {
    /// The name contains no forbidden character.
    Valid,
    /// The name contains forbidden characters; `sanitized` has them removed.
    Invalid {
        /// The name with every forbidden character removed
        sanitized: String,
    },
}

impl FileNameCheck {
    /// Whether the checked name was usable as-is.
    pub fn is_valid(&self) -> bool {
        matches!(self, FileNameCheck::Valid)
    }
}

/// Whether `c` is forbidden in a file name on this platform.
pub fn is_invalid_file_name_char(c: char) -> bool {
    #[cfg(windows)]
    if c.is_control() {
        return true;
    }
    RESERVED_CHARS.contains(&c)
}

/// Check `name` against the platform's forbidden characters.
///
/// ```
/// use fskit::{check_file_name, FileNameCheck};
///
/// assert!(check_file_name("report.txt").is_valid());
/// assert_eq!(
///     check_file_name("a/b.txt"),
///     FileNameCheck::Invalid { sanitized: "ab.txt".to_string() }
/// );
/// ```
pub fn check_file_name(name: &str) -> FileNameCheck {
    if name.chars().any(is_invalid_file_name_char) {
        FileNameCheck::Invalid {
            sanitized: sanitize_file_name(name, None),
        }
    } else {
        FileNameCheck::Valid
    }
}

/// Remove forbidden characters from `name`, or replace each one with
/// `replacement`.
///
/// A `replacement` that is itself forbidden is dropped like the rest.
pub fn sanitize_file_name(name: &str, replacement: Option<char>) -> String {
    let replacement = replacement.filter(|c| !is_invalid_file_name_char(*c));
    name.chars()
        .filter_map(|c| {
            if is_invalid_file_name_char(c) {
                replacement
            } else {
                Some(c)
            }
        })
        .collect()
}

/// Strip the extension from the last component of `path`.
///
/// Returns `None` for an empty path. A path without an extension, or a
/// dotfile such as `.bashrc`, comes back unchanged.
pub fn remove_file_extension(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    Some(path.with_extension(""))
}

/// Find a free sibling path of the form `dir/stem-N.ext`.
///
/// `N` starts at `start` (1 when `None`) and increases until nothing exists
/// at the candidate path. The check is not atomic: a file created between
/// this call and the caller's own create is not detected.
///
/// ```no_run
/// use fskit::unique_output_path;
/// use std::path::Path;
///
/// // "out/photo-1.jpg", or "out/photo-2.jpg" if that one is taken, ...
/// let path = unique_output_path(Path::new("out/photo.jpg"), None);
/// ```
pub fn unique_output_path(path: &Path, start: Option<u32>) -> PathBuf {
    let mut index = start.unwrap_or(1);
    loop {
        let candidate = numbered_path(path, index);
        if !candidate.exists() {
            return candidate;
        }
        match index.checked_add(1) {
            Some(next) => index = next,
            None => return candidate,
        }
    }
}

fn numbered_path(path: &Path, index: u32) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push(format!("-{}", index));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
