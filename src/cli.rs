//! Command-line arguments and option resolution

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};

use crate::tree::TreeConfig;

const EXAMPLES: &str = "\
Examples:
  dirtree                        Prompt for every option
  dirtree -p src -d 2            Two levels below ./src
  dirtree -p . -c false -h       No color, include hidden entries
  dirtree -e vendor,coverage     Also skip vendor/ and coverage/

With no arguments at all, dirtree asks for each option interactively.";

#[derive(Parser, Debug, Clone)]
#[command(name = "dirtree")]
#[command(about = "Print a directory hierarchy as an indented tree")]
#[command(version, disable_help_flag = true, after_help = EXAMPLES)]
pub struct Args {
    /// Root directory to display [default: .]
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Descend at most N levels (-1 for unlimited)
    #[arg(
        short = 'd',
        long = "depth",
        value_name = "N",
        allow_hyphen_values = true
    )]
    pub depth: Option<String>,

    /// Enable or disable colors: true/false, yes/no, on/off [default: true]
    #[arg(short = 'c', long = "color", value_name = "BOOL")]
    pub color: Option<String>,

    /// Show hidden files and directories
    #[arg(short = 'h', long = "show-hidden")]
    pub show_hidden: bool,

    /// Extra directory names to exclude, comma separated (added to the defaults)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "NAMES",
        value_delimiter = ','
    )]
    pub exclude: Vec<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    pub json: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    /// Parse `argv`, dropping unrecognized arguments and options missing
    /// their value with a warning instead of failing. Help and version
    /// requests still exit.
    pub fn parse_lenient<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        loop {
            match Self::try_parse_from(argv.iter().cloned()) {
                Ok(args) => return args,
                Err(err) => {
                    if !recover(&err, &mut argv) {
                        err.exit()
                    }
                }
            }
        }
    }

    /// Resolve into a walk configuration, warning about unusable values.
    pub fn into_config(self) -> TreeConfig {
        let max_depth = match self.depth.as_deref().map(parse_depth) {
            None => None,
            Some(Ok(depth)) => depth,
            Some(Err(raw)) => {
                log::warn!("invalid depth '{}', showing unlimited depth", raw);
                None
            }
        };

        let use_color = match self.color.as_deref() {
            None => true,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                log::warn!("invalid color value '{}', keeping colors on", raw);
                true
            }),
        };

        TreeConfig {
            root: self.path.unwrap_or_else(|| PathBuf::from(".")),
            max_depth,
            use_color,
            show_hidden: self.show_hidden,
            ..Default::default()
        }
        .exclude(self.exclude)
    }
}

/// Drop the argv piece behind a recoverable parse error.
///
/// Returns false when the error is not one we recover from. Every successful
/// recovery shrinks `argv`, so the retry loop terminates.
fn recover(err: &clap::Error, argv: &mut Vec<OsString>) -> bool {
    let Some(ContextValue::String(invalid)) = err.get(ContextKind::InvalidArg) else {
        return false;
    };
    match err.kind() {
        ErrorKind::UnknownArgument => {
            if let Some(pos) = unknown_argument_position(invalid, argv) {
                log::warn!(
                    "ignoring unrecognized argument '{}'",
                    argv[pos].to_string_lossy()
                );
                argv.remove(pos);
                return true;
            }
            match short_flag_char(invalid) {
                Some(flag) => strip_from_cluster(argv, flag, "unrecognized argument"),
                None => false,
            }
        }
        // Every option takes free-form text, so this only fires when the
        // value is missing altogether.
        ErrorKind::InvalidValue => {
            let Some(name) = invalid.split_whitespace().next() else {
                return false;
            };
            let with_equals = format!("{}=", name);
            if let Some(pos) = argv
                .iter()
                .rposition(|arg| arg.to_str().is_some_and(|a| a == name || a == with_equals))
                .filter(|&pos| pos > 0)
            {
                log::warn!("ignoring '{}': no value given", name);
                argv.remove(pos);
                return true;
            }
            match short_for(name) {
                Some(flag) => strip_from_cluster(argv, flag, "option without a value"),
                None => false,
            }
        }
        _ => false,
    }
}

/// Locate the argv element clap rejected as unknown.
fn unknown_argument_position(invalid: &str, argv: &[OsString]) -> Option<usize> {
    let with_value = format!("{}=", invalid);
    argv.iter()
        .enumerate()
        .skip(1)
        .find(|(_, arg)| {
            arg.to_str()
                .is_some_and(|a| a == invalid || a.starts_with(&with_value))
        })
        .map(|(pos, _)| pos)
}

/// `-z` -> `z`
fn short_flag_char(flag: &str) -> Option<char> {
    let rest = flag.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Short letter of the option named `--long` (or `-s`).
fn short_for(name: &str) -> Option<char> {
    if let Some(c) = short_flag_char(name) {
        return Some(c);
    }
    let long = name.strip_prefix("--")?;
    Args::command()
        .get_arguments()
        .find(|arg| arg.get_long() == Some(long))
        .and_then(|arg| arg.get_short())
}

/// Remove `flag` from the last short-flag cluster containing it, dropping
/// the cluster once nothing but the dash is left.
fn strip_from_cluster(argv: &mut Vec<OsString>, flag: char, what: &str) -> bool {
    let found = argv.iter().enumerate().skip(1).rev().find_map(|(pos, arg)| {
        let cluster = arg.to_str()?.strip_prefix('-')?;
        if cluster.starts_with('-') {
            return None;
        }
        cluster.contains(flag).then(|| (pos, cluster.replacen(flag, "", 1)))
    });
    let Some((pos, rest)) = found else {
        return false;
    };
    log::warn!("ignoring {} '-{}'", what, flag);
    if rest.is_empty() {
        argv.remove(pos);
    } else {
        argv[pos] = format!("-{}", rest).into();
    }
    true
}

/// Parse a depth limit. Blank and `-1` mean unlimited.
///
/// Returns the trimmed input as the error when it is not a depth.
pub fn parse_depth(raw: &str) -> Result<Option<usize>, String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-1" {
        return Ok(None);
    }
    raw.parse::<usize>().map(Some).map_err(|_| raw.to_string())
}

/// Parse a yes/no style answer.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DEFAULT_EXCLUDES;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["dirtree"];
        argv.extend_from_slice(args);
        Args::parse_lenient(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["-p", "."]).into_config();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.max_depth, None);
        assert!(config.use_color);
        assert!(!config.show_hidden);
        assert_eq!(config.excluded.len(), DEFAULT_EXCLUDES.len());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["-p", "src", "-d", "3", "-c", "false", "-h", "-e", "vendor,tmp"]);
        assert!(!args.json);
        let config = args.into_config();
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(config.max_depth, Some(3));
        assert!(!config.use_color);
        assert!(config.show_hidden);
        assert!(config.is_excluded("vendor"));
        assert!(config.is_excluded("tmp"));
        assert!(config.is_excluded("node_modules"));
    }

    #[test]
    fn test_long_flags() {
        let args = parse(&[
            "--path",
            "docs",
            "--depth",
            "1",
            "--color",
            "no",
            "--show-hidden",
            "--exclude",
            "cache",
            "--json",
        ]);
        assert!(args.json);
        let config = args.into_config();
        assert_eq!(config.root, PathBuf::from("docs"));
        assert_eq!(config.max_depth, Some(1));
        assert!(!config.use_color);
        assert!(config.show_hidden);
        assert!(config.is_excluded("cache"));
    }

    #[test]
    fn test_short_h_is_show_hidden() {
        assert!(parse(&["-h"]).show_hidden);
    }

    #[test]
    fn test_negative_one_depth_is_unlimited() {
        let config = parse(&["-d", "-1"]).into_config();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_non_numeric_depth_falls_back_to_unlimited() {
        let config = parse(&["-d", "deep"]).into_config();
        assert_eq!(config.max_depth, None);
        let config = parse(&["-d", "-5"]).into_config();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_invalid_color_keeps_colors_on() {
        assert!(parse(&["-c", "purple"]).into_config().use_color);
    }

    #[test]
    fn test_exclude_default_name_is_merge() {
        let config = parse(&["-e", "node_modules"]).into_config();
        assert!(config.is_excluded("node_modules"));
        assert!(config.is_excluded("target"));
        assert_eq!(config.excluded.len(), DEFAULT_EXCLUDES.len());
    }

    #[test]
    fn test_unknown_flags_are_dropped() {
        let args = parse(&["--bogus", "-p", "src", "--also-bogus=1", "-d", "2"]);
        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert_eq!(args.depth.as_deref(), Some("2"));
    }

    #[test]
    fn test_unexpected_positional_dropped() {
        let args = parse(&["stray", "-d", "1"]);
        assert_eq!(args.depth.as_deref(), Some("1"));
        assert_eq!(args.path, None);
    }

    #[test]
    fn test_unknown_short_flag_in_cluster_is_stripped() {
        let args = parse(&["-hz", "-p", "src"]);
        assert!(args.show_hidden);
        assert_eq!(args.path, Some(PathBuf::from("src")));

        let args = parse(&["-z", "-h"]);
        assert!(args.show_hidden);
    }

    #[test]
    fn test_missing_option_value_is_dropped() {
        let args = parse(&["-p", "src", "-c"]);
        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert_eq!(args.color, None);

        let args = parse(&["-p", "src", "--depth"]);
        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert_eq!(args.depth, None);
    }

    #[test]
    fn test_missing_value_before_next_flag() {
        let args = parse(&["-c", "-h", "-p", "src"]);
        assert!(args.show_hidden);
        assert_eq!(args.color, None);
        assert_eq!(args.path, Some(PathBuf::from("src")));
    }

    #[test]
    fn test_short_flag_char() {
        assert_eq!(short_flag_char("-z"), Some('z'));
        assert_eq!(short_flag_char("--zz"), None);
        assert_eq!(short_flag_char("-zz"), None);
        assert_eq!(short_for("--color"), Some('c'));
        assert_eq!(short_for("--json"), None);
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth(""), Ok(None));
        assert_eq!(parse_depth(" -1 "), Ok(None));
        assert_eq!(parse_depth("0"), Ok(Some(0)));
        assert_eq!(parse_depth("12"), Ok(Some(12)));
        assert_eq!(parse_depth("abc"), Err("abc".to_string()));
        assert_eq!(parse_depth("-2"), Err("-2".to_string()));
    }

    #[test]
    fn test_parse_bool() {
        for yes in ["true", "Y", "yes", "ON", "1"] {
            assert_eq!(parse_bool(yes), Some(true), "{}", yes);
        }
        for no in ["false", "n", "No", "off", "0"] {
            assert_eq!(parse_bool(no), Some(false), "{}", no);
        }
        assert_eq!(parse_bool("maybe"), None);
    }
}
