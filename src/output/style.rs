//! Color classification for entry names

use std::path::Path;

use termcolor::{Color, ColorSpec};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg"];
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "java", "c", "cpp", "py", "js", "html", "css", "xml", "json",
];
const EXECUTABLE_SUFFIXES: &[&str] = &[".exe", ".bat", ".sh"];

/// Display category of an entry name. The first matching rule wins, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Directory,
    Executable,
    Image,
    Text,
    Plain,
}

impl EntryStyle {
    pub fn classify(name: &str, is_dir: bool, is_executable: bool) -> Self {
        if is_dir {
            return Self::Directory;
        }

        let lower = name.to_lowercase();
        if is_executable || EXECUTABLE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return Self::Executable;
        }

        match Path::new(&lower).extension().and_then(|e| e.to_str()) {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Self::Image,
            Some(ext) if TEXT_EXTENSIONS.contains(&ext) => Self::Text,
            _ => Self::Plain,
        }
    }

    /// Color for the name token, or `None` to print it unstyled.
    pub fn color_spec(self) -> Option<ColorSpec> {
        let mut spec = ColorSpec::new();
        match self {
            Self::Directory => spec.set_fg(Some(Color::Blue)).set_bold(true),
            Self::Executable => spec.set_fg(Some(Color::Green)).set_bold(true),
            Self::Image => spec.set_fg(Some(Color::Magenta)),
            Self::Text => spec.set_fg(Some(Color::Cyan)),
            Self::Plain => return None,
        };
        Some(spec)
    }
}

/// Color for inline access errors.
pub fn error_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red));
    spec
}
