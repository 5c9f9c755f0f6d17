//! dirtree - print a directory hierarchy as an indented, colorized tree

pub mod cli;
pub mod error;
pub mod output;
pub mod prompt;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cli::Args;
pub use error::TreeError;
pub use output::{JsonFormatter, StreamingFormatter};
pub use prompt::prompt_config;
pub use tree::{OsFileSystem, TreeConfig, TreeOutput, TreeStats, TreeWalker};
