use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use regrep::Regex;
use walkdir::WalkDir;

/// Search for a pattern in files or standard input.
///
/// Prints every matching line, prefixed with its file path when searching
/// named files. Exits 0 if any line matched, 1 if none did, and 2 on
/// usage, pattern, or I/O errors.
#[derive(Parser)]
#[command(name = "regrep", version)]
struct Cli {
    /// The pattern to search for
    pattern: String,

    /// Files to search; reads standard input when empty
    paths: Vec<PathBuf>,

    /// Recursively search subdirectories; the single path argument must
    /// be a directory
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let regex = Regex::new(&cli.pattern)
        .with_context(|| format!("invalid pattern `{}`", cli.pattern))?;

    let filenames = collect_files(cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut matched = false;

    if filenames.is_empty() {
        let stdin = io::stdin();
        matched = search(&regex, stdin.lock(), None, &mut out)?;
    } else {
        for path in &filenames {
            let file = File::open(path)
                .with_context(|| format!("could not read file {}", path.display()))?;
            let found = search(&regex, BufReader::new(file), Some(path), &mut out)?;
            matched = matched || found;
        }
    }

    Ok(matched)
}

/// Resolve the positional paths into the list of files to search.
fn collect_files(cli: &Cli) -> Result<Vec<PathBuf>> {
    if !cli.recursive {
        return Ok(cli.paths.clone());
    }

    if cli.paths.len() != 1 {
        bail!("recursive search requires exactly one directory path");
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&cli.paths[0]) {
        let entry = entry.context("error walking directory")?;
        if entry.file_type().is_file() {
            log::debug!("queueing {}", entry.path().display());
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Search one input line by line, printing matches as they are found.
fn search<R: BufRead>(
    regex: &Regex,
    mut input: R,
    path: Option<&Path>,
    out: &mut impl Write,
) -> Result<bool> {
    let mut matched = false;
    let mut match_count = 0usize;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("error reading input")?;
        if read == 0 {
            break;
        }
        trim_line_ending(&mut line);

        if regex.is_match(&line)? {
            matched = true;
            match_count += 1;
            print_match(regex, &line, path, out)?;
        }
    }

    if let Some(path) = path {
        log::debug!("{}: {} matching line(s)", path.display(), match_count);
    }

    Ok(matched)
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

fn print_match(
    regex: &Regex,
    line: &[u8],
    path: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(path) = path {
        write!(out, "{}:", path.display())?;
    }
    match highlighted(regex, line) {
        Some(rendered) => out.write_all(rendered.as_bytes())?,
        None => out.write_all(line)?,
    }
    out.write_all(b"\n")?;
    Ok(())
}

/// Render the line with its first matched span highlighted. Falls back to
/// raw output for backreference patterns (no capture reporting) and for
/// lines that are not valid UTF-8.
fn highlighted(regex: &Regex, line: &[u8]) -> Option<String> {
    if regex.has_backreferences() {
        return None;
    }
    let text = std::str::from_utf8(line).ok()?;
    let found = regex.find(line).ok()??;
    let (start, end) = found.span();

    let mut rendered = String::with_capacity(text.len());
    rendered.push_str(&text[..start]);
    rendered.push_str(&text[start..end].red().bold().to_string());
    rendered.push_str(&text[end..]);
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_lf_and_crlf() {
        let mut line = b"abc\n".to_vec();
        trim_line_ending(&mut line);
        assert_eq!(line, b"abc");

        let mut line = b"abc\r\n".to_vec();
        trim_line_ending(&mut line);
        assert_eq!(line, b"abc");

        let mut line = b"abc".to_vec();
        trim_line_ending(&mut line);
        assert_eq!(line, b"abc");
    }

    #[test]
    fn search_prefixes_file_matches_with_the_path() {
        let regex = Regex::new("b").unwrap();
        let input = io::Cursor::new(b"abc\nxyz\nbbb\n".to_vec());
        let mut out = Vec::new();

        colored::control::set_override(false);
        let matched = search(&regex, input, Some(Path::new("notes.txt")), &mut out).unwrap();
        colored::control::unset_override();

        assert!(matched);
        assert_eq!(out, b"notes.txt:abc\nnotes.txt:bbb\n");
    }

    #[test]
    fn search_without_path_prints_bare_lines() {
        let regex = Regex::new("^x").unwrap();
        let input = io::Cursor::new(b"abc\nxyz".to_vec());
        let mut out = Vec::new();

        colored::control::set_override(false);
        let matched = search(&regex, input, None, &mut out).unwrap();
        colored::control::unset_override();

        assert!(matched);
        assert_eq!(out, b"xyz\n");
    }

    #[test]
    fn search_reports_no_match() {
        let regex = Regex::new("zzz").unwrap();
        let input = io::Cursor::new(b"abc\n".to_vec());
        let mut out = Vec::new();
        assert!(!search(&regex, input, None, &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn non_utf8_lines_print_raw() {
        let regex = Regex::new("b").unwrap();
        let input = io::Cursor::new(vec![0xFF, b'b', b'\n']);
        let mut out = Vec::new();
        assert!(search(&regex, input, None, &mut out).unwrap());
        assert_eq!(out, vec![0xFF, b'b', b'\n']);
    }
}
