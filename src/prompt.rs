//! Interactive prompt mode, used when no arguments are given

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::{parse_bool, parse_depth};
use crate::tree::TreeConfig;

/// Ask for each option in turn and build the configuration.
///
/// Blank answers (and end of input) keep the defaults. Unusable answers
/// print a notice and keep the default too.
pub fn prompt_config<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<TreeConfig> {
    let path = ask(
        input,
        out,
        "Enter the directory path (e.g. /home/you/projects or .): ",
    )?;

    let depth = ask(input, out, "Maximum depth (blank or -1 for unlimited): ")?;
    let max_depth = match parse_depth(&depth) {
        Ok(depth) => depth,
        Err(raw) => {
            writeln!(out, "Invalid depth '{}', using unlimited depth.", raw)?;
            None
        }
    };

    let use_color = ask_yes_no(input, out, "Use colors? (y/n) [y]: ", true)?;
    let show_hidden = ask_yes_no(input, out, "Show hidden files? (y/n) [n]: ", false)?;
    let extra = ask(
        input,
        out,
        "Additional directories to exclude (comma-separated, optional): ",
    )?;
    writeln!(out)?;

    let root = if path.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(path)
    };

    Ok(TreeConfig {
        root,
        max_depth,
        use_color,
        show_hidden,
        ..Default::default()
    }
    .exclude(extra.split(',')))
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    default: bool,
) -> io::Result<bool> {
    let answer = ask(input, out, question)?;
    if answer.is_empty() {
        return Ok(default);
    }
    match parse_bool(&answer) {
        Some(value) => Ok(value),
        None => {
            writeln!(out, "Unrecognized answer '{}', using default.", answer)?;
            Ok(default)
        }
    }
}
