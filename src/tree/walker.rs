//! TreeWalker - depth-first traversal that streams entries to an output

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

use super::config::TreeConfig;
use super::filter::filter_entries;
use super::fs::{DirEntry, FileSystem};

/// Connector drawn before a sibling that has more siblings below it.
pub const BRANCH: &str = "├── ";
/// Connector drawn before the final sibling.
pub const LAST_BRANCH: &str = "└── ";
/// Prefix segment under an ancestor that still has siblings below.
pub const VERTICAL: &str = "│   ";
/// Prefix segment under an ancestor that was the last sibling.
pub const BLANK: &str = "    ";

/// Pick the connector glyph for an entry.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

/// Extend `prefix` for the children of an entry.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", prefix, BLANK)
    } else {
        format!("{}{}", prefix, VERTICAL)
    }
}

/// How a directory entry's line should be annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Rendered normally (files, expanded directories, depth-limited directories).
    Plain,
    /// Resolves to a directory that was already visited; not expanded.
    SymbolicLink,
    /// The directory could not be resolved or listed.
    AccessError,
}

/// Everything a sink needs to render one entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryLine<'a> {
    pub name: &'a str,
    pub prefix: &'a str,
    pub is_last: bool,
    /// Number of directories between the root and this entry.
    pub depth: usize,
    pub is_dir: bool,
    pub is_executable: bool,
    pub status: EntryStatus,
}

/// The validated root of a walk.
#[derive(Debug, Clone, Copy)]
pub struct RootInfo<'a> {
    /// Canonical absolute path.
    pub path: &'a Path,
    pub name: &'a str,
    pub config: &'a TreeConfig,
}

/// Counts of rendered entries, root excluded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
}

/// Receives walk events in tree order.
pub trait TreeOutput {
    fn root(&mut self, root: &RootInfo<'_>) -> io::Result<()>;

    fn entry(&mut self, line: &EntryLine<'_>) -> io::Result<()>;

    fn finish(&mut self, stats: &TreeStats) -> io::Result<()>;
}

/// Canonical paths already entered during one walk. Paths are never removed.
#[derive(Debug, Default)]
struct VisitedSet(HashSet<PathBuf>);

impl VisitedSet {
    /// Returns false if the path was already present.
    fn insert(&mut self, canonical: PathBuf) -> bool {
        self.0.insert(canonical)
    }
}

/// Outcome of trying to enter a directory entry.
enum DirVisit {
    Expand(Vec<DirEntry>),
    DepthLimit,
    Revisit,
    Failed(io::Error),
}

/// Depth-first walker over a `FileSystem`.
pub struct TreeWalker<'a, F: FileSystem> {
    fs: &'a F,
    config: &'a TreeConfig,
}

impl<'a, F: FileSystem> TreeWalker<'a, F> {
    pub fn new(fs: &'a F, config: &'a TreeConfig) -> Self {
        Self { fs, config }
    }

    /// Validate the root, then stream the whole tree to `output`.
    ///
    /// Nothing is written when the root is invalid.
    pub fn walk<O: TreeOutput>(&self, output: &mut O) -> Result<TreeStats, TreeError> {
        let root = &self.config.root;

        let canonical = self
            .fs
            .canonicalize(root)
            .map_err(|e| TreeError::invalid_root(root, e))?;
        if !self.fs.is_dir(&canonical) {
            return Err(TreeError::invalid_root(root, "Not a directory"));
        }
        let children = self
            .fs
            .read_dir(&canonical)
            .map_err(|e| TreeError::invalid_root(root, e))?;

        let name = display_name(&canonical);
        output.root(&RootInfo {
            path: &canonical,
            name: &name,
            config: self.config,
        })?;

        let mut visited = VisitedSet::default();
        visited.insert(canonical.clone());
        let mut stats = TreeStats::default();

        self.traverse(children, "", &mut visited, 0, output, &mut stats)?;
        output.finish(&stats)?;

        log::debug!(
            "walked {}: {} directories, {} files",
            canonical.display(),
            stats.directories,
            stats.files
        );
        Ok(stats)
    }

    fn traverse<O: TreeOutput>(
        &self,
        entries: Vec<DirEntry>,
        prefix: &str,
        visited: &mut VisitedSet,
        depth: usize,
        output: &mut O,
        stats: &mut TreeStats,
    ) -> io::Result<()> {
        let visible = filter_entries(entries, self.config);
        let total = visible.len();

        for (i, entry) in visible.into_iter().enumerate() {
            let is_last = i + 1 == total;
            let line = |status| EntryLine {
                name: &entry.name,
                prefix,
                is_last,
                depth,
                is_dir: entry.is_dir,
                is_executable: entry.is_executable,
                status,
            };

            if !entry.is_dir {
                stats.files += 1;
                output.entry(&line(EntryStatus::Plain))?;
                continue;
            }

            stats.directories += 1;
            match self.enter(&entry, visited, depth + 1) {
                DirVisit::Expand(children) => {
                    output.entry(&line(EntryStatus::Plain))?;
                    let new_prefix = child_prefix(prefix, is_last);
                    self.traverse(children, &new_prefix, visited, depth + 1, output, stats)?;
                }
                DirVisit::DepthLimit => output.entry(&line(EntryStatus::Plain))?,
                DirVisit::Revisit => output.entry(&line(EntryStatus::SymbolicLink))?,
                DirVisit::Failed(e) => {
                    log::debug!("cannot list {}: {}", entry.path.display(), e);
                    output.entry(&line(EntryStatus::AccessError))?;
                }
            }
        }

        Ok(())
    }

    /// Decide whether a directory at `depth` is expanded, and list it if so.
    fn enter(&self, entry: &DirEntry, visited: &mut VisitedSet, depth: usize) -> DirVisit {
        if self.config.max_depth.is_some_and(|max| depth > max) {
            return DirVisit::DepthLimit;
        }

        let canonical = match self.fs.canonicalize(&entry.path) {
            Ok(p) => p,
            Err(e) => return DirVisit::Failed(e),
        };
        if !visited.insert(canonical) {
            return DirVisit::Revisit;
        }

        match self.fs.read_dir(&entry.path) {
            Ok(children) => DirVisit::Expand(children),
            Err(e) => DirVisit::Failed(e),
        }
    }
}

/// Last path component, or the whole path for filesystem roots.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
