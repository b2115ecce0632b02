//! Source-to-destination tree mapping.
//!
//! [`map_tree`] walks a source directory and pairs every subdirectory and
//! every file with the path it would have under a destination directory.
//! Nothing is created; [`copy_dir`](crate::copy_dir) consumes the result.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A source path and the destination path it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPair {
    /// Path inside the source tree
    pub src: PathBuf,
    /// Corresponding path inside the destination tree
    pub dst: PathBuf,
}

/// Every directory and file of a source tree, mapped onto a destination.
///
/// The source root itself is not part of `dirs`. Entry order follows the
/// traversal and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMap {
    /// Subdirectories at every depth
    pub dirs: Vec<PathPair>,
    /// Files at every depth
    pub files: Vec<PathPair>,
}

impl TreeMap {
    /// True when the source tree holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

/// Map every subdirectory and file under `source_dir` onto `dest_dir`.
///
/// Each destination is `dest_dir` joined with the entry's path relative to
/// `source_dir`. Symlinks are followed; a link back to one of its own
/// ancestors is reported as [`Error::SymlinkLoop`]. Broken links and special
/// files are skipped with a warning.
///
/// # Errors
///
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is not a directory ([`Error::NotADirectory`])
/// - A followed symlink loops ([`Error::SymlinkLoop`])
/// - Reading a directory fails ([`Error::Io`])
///
/// # Example
///
/// ```no_run
/// use fskit::{map_tree, CopyOptions};
/// use std::path::Path;
///
/// let map = map_tree(Path::new("photos"), Path::new("backup/photos"), &CopyOptions::default())?;
/// for pair in &map.files {
///     println!("{} -> {}", pair.src.display(), pair.dst.display());
/// }
/// # Ok::<(), fskit::Error>(())
/// ```
pub fn map_tree(source_dir: &Path, dest_dir: &Path, options: &CopyOptions) -> Result<TreeMap> {
    if !source_dir.exists() {
        return Err(Error::SourceNotFound(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(Error::NotADirectory(source_dir.to_path_buf()));
    }
    walk(source_dir, dest_dir, options, true)
}

/// List the files of `dir`, optionally descending into every subdirectory.
///
/// A missing directory (or a file path) yields an empty list.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a symlink loops.
pub fn list_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let map = walk(dir, dir, &CopyOptions::default(), recursive)?;
    Ok(map.files.into_iter().map(|pair| pair.src).collect())
}

/// A directory waiting to be read, with the identity of every directory
/// on the path from the root down to it.
struct PendingDir {
    src: PathBuf,
    dst: PathBuf,
    ancestors: Vec<DirKey>,
}

fn walk(root: &Path, dest_root: &Path, options: &CopyOptions, recursive: bool) -> Result<TreeMap> {
    let mut map = TreeMap::default();
    let mut pending = vec![PendingDir {
        src: root.to_path_buf(),
        dst: dest_root.to_path_buf(),
        ancestors: vec![get_dir_key(root)?],
    }];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir.src)? {
            let entry = entry?;
            let src_path = entry.path();
            let dst_path = dir.dst.join(entry.file_name());

            let Some(is_dir) = classify(&entry, &src_path, options)? else {
                continue;
            };

            if !is_dir {
                map.files.push(PathPair {
                    src: src_path,
                    dst: dst_path,
                });
                continue;
            }
            if !recursive {
                continue;
            }

            let key = get_dir_key(&src_path)?;
            if dir.ancestors.contains(&key) {
                return Err(Error::SymlinkLoop(src_path));
            }
            let mut ancestors = dir.ancestors.clone();
            ancestors.push(key);

            map.dirs.push(PathPair {
                src: src_path.clone(),
                dst: dst_path.clone(),
            });
            pending.push(PendingDir {
                src: src_path,
                dst: dst_path,
                ancestors,
            });
        }
    }

    Ok(map)
}

/// `Some(true)` for a directory, `Some(false)` for a regular file, `None`
/// for anything to skip. Symlinks are judged by their target.
fn classify(entry: &fs::DirEntry, path: &Path, options: &CopyOptions) -> Result<Option<bool>> {
    let file_type = entry.file_type()?;

    if file_type.is_symlink() {
        return match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Some(true)),
            Ok(meta) if meta.is_file() => Ok(Some(false)),
            Ok(_) => {
                options.warn(&format!("Skipping special file: {}", path.display()));
                Ok(None)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                options.warn(&format!(
                    "Skipping broken symlink {}: {}",
                    path.display(),
                    e
                ));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        };
    }

    if file_type.is_dir() {
        Ok(Some(true))
    } else if file_type.is_file() {
        Ok(Some(false))
    } else {
        options.warn(&format!("Skipping special file: {}", path.display()));
        Ok(None)
    }
}

type DirKey = (u64, u64);

/// Identity of a directory: (device, inode) on Unix.
#[cfg(unix)]
fn get_dir_key(path: &Path) -> io::Result<DirKey> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

/// Identity of a directory: a hash of its canonical path elsewhere.
#[cfg(not(unix))]
fn get_dir_key(path: &Path) -> io::Result<DirKey> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}
