//! Filesystem access used by the walker
//!
//! The walker only needs three capabilities: resolve a path, ask whether it
//! is a directory, and list a directory. Keeping them behind a trait lets
//! tests drive the walker with an in-memory tree.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
#[cfg(windows)]
use std::os::windows::fs::MetadataExt;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// Path as reached through the listed directory (not canonicalized).
    pub path: PathBuf,
    /// True for directories and for symlinks that resolve to one.
    pub is_dir: bool,
    /// Platform hidden attribute. Dotfiles are handled by the filter.
    pub is_hidden: bool,
    pub is_executable: bool,
}

/// Capability interface over the filesystem.
pub trait FileSystem {
    /// Fully resolve `path`, following every symlink.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether `path` resolves to a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the direct children of `path`. No handle outlives the call.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for item in fs::read_dir(path)? {
            // Entries can disappear between readdir and stat
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    log::debug!("skipping entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let entry_path = item.path();
            let name = item.file_name().to_string_lossy().into_owned();

            // Follow symlinks first; a dangling link falls back to the link itself
            let metadata = fs::metadata(&entry_path).or_else(|_| fs::symlink_metadata(&entry_path));
            let (is_dir, is_hidden, is_executable) = match metadata {
                Ok(m) => (m.is_dir(), has_hidden_attribute(&m), has_execute_bit(&m)),
                Err(e) => {
                    log::debug!("skipping {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            entries.push(DirEntry {
                name,
                path: entry_path,
                is_dir,
                is_hidden,
                is_executable,
            });
        }

        Ok(entries)
    }
}

#[cfg(unix)]
fn has_execute_bit(meta: &Metadata) -> bool {
    meta.is_file() && meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_execute_bit(_meta: &Metadata) -> bool {
    false
}

#[cfg(windows)]
fn has_hidden_attribute(meta: &Metadata) -> bool {
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn has_hidden_attribute(_meta: &Metadata) -> bool {
    false
}
