//! Directory tree walking logic
//!
//! - `config` - resolved options for one walk
//! - `fs` - filesystem capability trait and the `std::fs` implementation
//! - `filter` - visibility and sort order of directory entries
//! - `walker` - depth-first traversal streaming to a `TreeOutput`

mod config;
mod filter;
mod fs;
mod walker;

pub use config::{DEFAULT_EXCLUDES, TreeConfig};
pub use filter::{compare_entries, filter_entries, is_visible};
pub use fs::{DirEntry, FileSystem, OsFileSystem};
pub use walker::{
    BLANK, BRANCH, EntryLine, EntryStatus, LAST_BRANCH, RootInfo, TreeOutput, TreeStats,
    TreeWalker, VERTICAL, child_prefix, connector,
};
