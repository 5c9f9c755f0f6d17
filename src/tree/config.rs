//! Resolved configuration for a tree walk

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Directory names excluded by default. User exclusions extend this set.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "target", ".git", "build", "dist"];

/// Configuration for tree walking behavior.
///
/// Built once before traversal begins and only read afterwards.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub root: PathBuf,
    /// Deepest level whose directories are still expanded (`None` = unlimited).
    pub max_depth: Option<usize>,
    pub use_color: bool,
    pub show_hidden: bool,
    /// Directory names to skip. Sorted so the header is stable.
    pub excluded: BTreeSet<String>,
}

impl TreeConfig {
    /// Merge extra names into the exclusion set. Blank names are ignored.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.excluded.insert(name.to_string());
            }
        }
        self
    }

    /// Whether a directory with this name is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Human-readable max depth for the header line.
    pub fn depth_label(&self) -> String {
        match self.max_depth {
            Some(depth) => depth.to_string(),
            None => "unlimited".to_string(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_depth: None,
            use_color: true,
            show_hidden: false,
            excluded: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
