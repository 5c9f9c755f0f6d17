//! Streaming output formatter
//!
//! This module provides `StreamingFormatter`, which writes each entry as
//! soon as the walker reports it.

use std::io;

use termcolor::{BufferedStandardStream, ColorChoice, ColorSpec, WriteColor};

use crate::tree::{EntryLine, EntryStatus, RootInfo, TreeOutput, TreeStats, connector};

use super::style::{EntryStyle, error_spec};

/// Text formatter over any `WriteColor` sink.
///
/// Only the name token is ever styled; prefix and connector are written
/// plain. Whether escapes are emitted is decided by the sink.
pub struct StreamingFormatter<W: WriteColor> {
    out: W,
}

impl StreamingFormatter<BufferedStandardStream> {
    /// Formatter on stdout. With color on, `NO_COLOR` and `TERM=dumb` still
    /// disable escapes.
    pub fn stdout(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(BufferedStandardStream::stdout(choice))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, text: &str, spec: Option<&ColorSpec>) -> io::Result<()> {
        match spec {
            Some(spec) => {
                self.out.set_color(spec)?;
                write!(self.out, "{}", text)?;
                self.out.reset()
            }
            None => write!(self.out, "{}", text),
        }
    }
}

impl<W: WriteColor> TreeOutput for StreamingFormatter<W> {
    fn root(&mut self, root: &RootInfo<'_>) -> io::Result<()> {
        let excluded: Vec<&str> = root.config.excluded.iter().map(String::as_str).collect();
        writeln!(
            self.out,
            "Directory tree for: {} (max depth: {}, excluding: {})",
            root.path.display(),
            root.config.depth_label(),
            excluded.join(", ")
        )?;
        writeln!(self.out)?;

        let spec = EntryStyle::Directory.color_spec();
        self.write_styled(root.name, spec.as_ref())?;
        writeln!(self.out)
    }

    fn entry(&mut self, line: &EntryLine<'_>) -> io::Result<()> {
        write!(self.out, "{}{}", line.prefix, connector(line.is_last))?;

        match line.status {
            EntryStatus::AccessError => {
                let text = format!("Error accessing: {}", line.name);
                self.write_styled(&text, Some(&error_spec()))?;
            }
            EntryStatus::Plain | EntryStatus::SymbolicLink => {
                let spec =
                    EntryStyle::classify(line.name, line.is_dir, line.is_executable).color_spec();
                self.write_styled(line.name, spec.as_ref())?;
                if line.status == EntryStatus::SymbolicLink {
                    write!(self.out, " (symbolic link)")?;
                }
            }
        }

        writeln!(self.out)
    }

    fn finish(&mut self, _stats: &TreeStats) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use termcolor::{Ansi, NoColor};

    use super::*;
    use crate::test_utils::MemoryFileSystem;
    use crate::tree::{TreeConfig, TreeWalker};

    fn sample_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .file("/proj/README.md")
            .executable("/proj/bin/run")
            .file("/proj/assets/logo.png")
            .file("/proj/Cargo.lock")
            .symlink("/proj/assets/again", "/proj")
    }

    fn config(use_color: bool) -> TreeConfig {
        TreeConfig {
            root: PathBuf::from("/proj"),
            use_color,
            ..Default::default()
        }
    }

    fn render_plain(fs: &MemoryFileSystem, config: &TreeConfig) -> String {
        let mut formatter = StreamingFormatter::new(NoColor::new(Vec::new()));
        TreeWalker::new(fs, config).walk(&mut formatter).unwrap();
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    fn render_ansi(fs: &MemoryFileSystem, config: &TreeConfig) -> String {
        let mut formatter = StreamingFormatter::new(Ansi::new(Vec::new()));
        TreeWalker::new(fs, config).walk(&mut formatter).unwrap();
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output_layout() {
        let output = render_plain(&sample_fs(), &config(false));
        let expected = "\
Directory tree for: /proj (max depth: unlimited, excluding: .git, build, dist, node_modules, target)

proj
├── assets
│   ├── again (symbolic link)
│   └── logo.png
├── bin
│   └── run
├── Cargo.lock
└── README.md
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_header_reports_depth_and_extra_exclusions() {
        let mut cfg = config(false).exclude(["vendor"]);
        cfg.max_depth = Some(2);
        let output = render_plain(&sample_fs(), &cfg);
        let header = output.lines().next().unwrap();
        assert!(header.contains("max depth: 2"), "header: {}", header);
        assert!(header.contains("vendor"), "header: {}", header);
        assert!(header.contains("node_modules"), "header: {}", header);
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let output = render_plain(&sample_fs(), &config(false));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_color_applies_to_names_only() {
        let output = render_ansi(&sample_fs(), &config(true));

        // Directory name is colored, connector precedes the escape
        assert!(output.contains("├── \x1b[0m\x1b[1m\x1b[34massets\x1b[0m"), "{:?}", output);
        // Image and text colors
        assert!(output.contains("\x1b[35mlogo.png\x1b[0m"), "{:?}", output);
        assert!(output.contains("\x1b[36mREADME.md\x1b[0m"), "{:?}", output);
        // Executable
        assert!(output.contains("\x1b[32mrun\x1b[0m"), "{:?}", output);
        // Plain names stay unstyled
        assert!(output.contains("├── Cargo.lock\n"), "{:?}", output);
        // Annotation follows the reset
        assert!(output.contains("again\x1b[0m (symbolic link)"), "{:?}", output);
    }

    #[test]
    fn test_access_error_line() {
        let fs = MemoryFileSystem::new().unreadable_dir("/proj/secret");
        let output = render_plain(&fs, &config(false));
        assert!(output.ends_with("proj\n└── Error accessing: secret\n"), "{}", output);

        let output = render_ansi(&fs, &config(true));
        assert!(output.contains("\x1b[31mError accessing: secret\x1b[0m"), "{:?}", output);
    }
}
