//! JSON output

use std::io::{self, Write};

use serde::Serialize;

use crate::tree::{EntryLine, EntryStatus, RootInfo, TreeOutput, TreeStats};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node in the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    Directory {
        name: String,
        #[serde(skip_serializing_if = "is_false")]
        symlink: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        contents: Vec<JsonNode>,
    },
    File {
        name: String,
    },
    Report {
        directories: usize,
        files: usize,
    },
}

impl JsonNode {
    fn directory(name: &str) -> Self {
        Self::Directory {
            name: name.to_string(),
            symlink: false,
            error: None,
            contents: Vec::new(),
        }
    }

    fn push(&mut self, child: JsonNode) {
        if let Self::Directory { contents, .. } = self {
            contents.push(child);
        }
    }
}

/// Collects walk events into a nested document, written out on `finish`.
///
/// Entries arrive in depth-first order, so open directories are kept on a
/// stack indexed by depth.
pub struct JsonFormatter<W: Write> {
    out: W,
    stack: Vec<JsonNode>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Close open directories until the one at `len - 1` is the innermost.
    fn unwind_to(&mut self, len: usize) {
        while self.stack.len() > len.max(1) {
            if let Some(node) = self.stack.pop() {
                if let Some(parent) = self.stack.last_mut() {
                    parent.push(node);
                }
            }
        }
    }
}

impl<W: Write> TreeOutput for JsonFormatter<W> {
    fn root(&mut self, root: &RootInfo<'_>) -> io::Result<()> {
        self.stack.clear();
        self.stack.push(JsonNode::directory(root.name));
        Ok(())
    }

    fn entry(&mut self, line: &EntryLine<'_>) -> io::Result<()> {
        // Parent of an entry at depth d sits at stack index d
        self.unwind_to(line.depth + 1);

        if !line.is_dir {
            if let Some(parent) = self.stack.last_mut() {
                parent.push(JsonNode::File {
                    name: line.name.to_string(),
                });
            }
            return Ok(());
        }

        let node = match line.status {
            EntryStatus::Plain => JsonNode::directory(line.name),
            EntryStatus::SymbolicLink => JsonNode::Directory {
                name: line.name.to_string(),
                symlink: true,
                error: None,
                contents: Vec::new(),
            },
            EntryStatus::AccessError => JsonNode::Directory {
                name: line.name.to_string(),
                symlink: false,
                error: Some("error accessing directory".to_string()),
                contents: Vec::new(),
            },
        };
        self.stack.push(node);
        Ok(())
    }

    fn finish(&mut self, stats: &TreeStats) -> io::Result<()> {
        self.unwind_to(1);
        let mut document: Vec<JsonNode> = self.stack.drain(..).collect();
        document.push(JsonNode::Report {
            directories: stats.directories,
            files: stats.files,
        });

        serde_json::to_writer_pretty(&mut self.out, &document).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
