//! Test utilities: an in-memory filesystem and temporary directory fixtures.
//!
//! This module is only compiled for tests, benchmarks, and the `test-utils`
//! feature.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::tree::{DirEntry, FileSystem};

/// Symlink resolution gives up after this many hops, like ELOOP.
const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum NodeKind {
    Dir { readable: bool },
    File,
    Symlink(PathBuf),
}

#[derive(Debug, Clone)]
struct Node {
    path: PathBuf,
    kind: NodeKind,
    hidden: bool,
    executable: bool,
}

/// In-memory `FileSystem` for driving the walker without touching disk.
///
/// Paths are absolute and use `/` separators. Parents are created on demand,
/// and listings come back in insertion order so tests can check that the
/// walker sorts on its own.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    nodes: Vec<Node>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable directory.
    pub fn dir(self, path: &str) -> Self {
        self.insert(path, NodeKind::Dir { readable: true }, false, false)
    }

    /// Add a directory that exists but cannot be listed.
    pub fn unreadable_dir(self, path: &str) -> Self {
        self.insert(path, NodeKind::Dir { readable: false }, false, false)
    }

    /// Add a regular file.
    pub fn file(self, path: &str) -> Self {
        self.insert(path, NodeKind::File, false, false)
    }

    /// Add a file with an execute bit.
    pub fn executable(self, path: &str) -> Self {
        self.insert(path, NodeKind::File, false, true)
    }

    /// Add a file carrying the platform hidden attribute.
    pub fn hidden_file(self, path: &str) -> Self {
        self.insert(path, NodeKind::File, true, false)
    }

    /// Add a symlink. Relative targets resolve against the link's parent.
    pub fn symlink(self, path: &str, target: &str) -> Self {
        self.insert(path, NodeKind::Symlink(PathBuf::from(target)), false, false)
    }

    fn insert(mut self, path: &str, kind: NodeKind, hidden: bool, executable: bool) -> Self {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.ensure_dirs(parent);
        }
        self.nodes.retain(|n| n.path != path);
        self.nodes.push(Node {
            path,
            kind,
            hidden,
            executable,
        });
        self
    }

    fn ensure_dirs(&mut self, path: &Path) {
        if path.parent().is_none() || self.node(path).is_some() {
            return;
        }
        if let Some(parent) = path.parent() {
            self.ensure_dirs(parent);
        }
        self.nodes.push(Node {
            path: path.to_path_buf(),
            kind: NodeKind::Dir { readable: true },
            hidden: false,
            executable: false,
        });
    }

    fn node(&self, path: &Path) -> Option<&Node> {
        self.nodes.iter().find(|n| n.path == path)
    }

    fn resolve(&self, path: &Path, hops: usize) -> io::Result<PathBuf> {
        if hops > MAX_LINK_HOPS {
            return Err(io::Error::other("too many levels of symbolic links"));
        }

        let mut resolved = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    match self.node(&resolved).map(|n| &n.kind) {
                        Some(NodeKind::Symlink(target)) => {
                            let target = match resolved.parent() {
                                Some(parent) if target.is_relative() => parent.join(target),
                                _ => target.clone(),
                            };
                            resolved = self.resolve(&target, hops + 1)?;
                        }
                        Some(_) => {}
                        None => {
                            return Err(io::Error::new(
                                io::ErrorKind::NotFound,
                                "No such file or directory",
                            ));
                        }
                    }
                }
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        Ok(resolved)
    }
}

impl FileSystem for MemoryFileSystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.resolve(path, 0)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path, 0)
            .ok()
            .and_then(|p| self.node(&p).map(|n| matches!(n.kind, NodeKind::Dir { .. })))
            .unwrap_or(path == Path::new("/"))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let canonical = self.resolve(path, 0)?;
        match self.node(&canonical).map(|n| &n.kind) {
            Some(NodeKind::Dir { readable: true }) => {}
            Some(NodeKind::Dir { readable: false }) => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "Permission denied",
                ));
            }
            _ => return Err(io::Error::other("Not a directory")),
        }

        let entries = self
            .nodes
            .iter()
            .filter(|n| n.path.parent() == Some(canonical.as_path()))
            .filter_map(|n| {
                let name = n.path.file_name()?.to_string_lossy().to_string();
                let entry_path = path.join(&name);
                Some(DirEntry {
                    is_dir: self.is_dir(&entry_path),
                    name,
                    path: entry_path,
                    is_hidden: n.hidden,
                    is_executable: n.executable,
                })
            })
            .collect();
        Ok(entries)
    }
}

/// A temporary directory populated with files for tests.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and any missing parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_creates_parents() {
        let fs = MemoryFileSystem::new().file("/a/b/c.txt");
        assert!(fs.is_dir(Path::new("/a")));
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(!fs.is_dir(Path::new("/a/b/c.txt")));
    }

    #[test]
    fn test_memory_fs_resolves_relative_symlinks() {
        let fs = MemoryFileSystem::new()
            .dir("/a/real")
            .symlink("/a/link", "real");
        assert_eq!(
            fs.canonicalize(Path::new("/a/link")).unwrap(),
            PathBuf::from("/a/real")
        );
    }

    #[test]
    fn test_memory_fs_self_loop_errors() {
        let fs = MemoryFileSystem::new().symlink("/a/loop", "/a/loop");
        assert!(fs.canonicalize(Path::new("/a/loop")).is_err());
        assert!(!fs.is_dir(Path::new("/a/loop")));
    }

    #[test]
    fn test_memory_fs_lists_in_insertion_order() {
        let fs = MemoryFileSystem::new().file("/r/z").file("/r/a");
        let names: Vec<String> = fs
            .read_dir(Path::new("/r"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_test_dir_add_file() {
        let dir = TestDir::new();
        let file_path = dir.add_file("nested/test.rs", "fn main() {}");
        assert!(file_path.exists());
    }
}
