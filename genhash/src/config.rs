//! Command-line arguments and run configuration.

use clap::{ArgAction, Parser};
use std::convert::Infallible;
#[cfg(unix)]
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "genhash")]
#[command(about = "Assign identity hash keys to safelist entries")]
pub struct Args {
    /// Safelist JSON file to read
    pub input: Option<PathBuf>,

    /// Output file [default: <input stem>-hashed.json]
    pub output: Option<PathBuf>,

    /// Keep only entries whose comment contains this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Drop entries whose hash key repeats an earlier entry's
    #[arg(long)]
    pub dedup: bool,

    /// Fail if any stored hash key differs from the recomputed one
    #[arg(long, conflicts_with = "strip")]
    pub verify: bool,

    /// Remove all hash keys instead of computing them
    #[arg(long)]
    pub strip: bool,

    /// Write indented JSON
    #[arg(long)]
    pub pretty: bool,

    /// Running under CI: never read the safelist from standard input
    #[arg(
        long,
        env = "CI",
        action = ArgAction::Set,
        value_parser = parse_ci_flag,
        default_value = "false",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ci: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a boolean-like flag value. Anything unrecognized is `false`.
pub fn parse_ci_flag(value: &str) -> Result<bool, Infallible> {
    Ok(matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True"))
}

/// Where a safelist is read from or written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    File(PathBuf),
    /// Standard input when reading, standard output when writing.
    Stdio,
}

/// Post-load processing switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub filter: Option<String>,
    pub dedup: bool,
    pub verify: bool,
    pub strip: bool,
    pub pretty: bool,
}

/// A fully resolved run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: Channel,
    pub sink: Channel,
    pub options: Options,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no input file given and nothing piped on standard input")]
    NoInput,
}

impl RunConfig {
    /// Picks the input and output channels.
    ///
    /// An input file argument always wins. Without one, standard input is used
    /// when it is not a character device (a pipe or a redirected file), unless
    /// running under CI.
    pub fn resolve(args: &Args, stdin_is_char_device: bool) -> Result<Self, ConfigError> {
        let (source, sink) = match &args.input {
            Some(input) => {
                let output = args
                    .output
                    .clone()
                    .unwrap_or_else(|| default_output_path(input));
                (Channel::File(input.clone()), Channel::File(output))
            }
            None if !stdin_is_char_device && !args.ci => (Channel::Stdio, Channel::Stdio),
            None => return Err(ConfigError::NoInput),
        };

        Ok(Self {
            source,
            sink,
            options: Options {
                filter: args.filter.clone().filter(|f| !f.is_empty()),
                dedup: args.dedup,
                verify: args.verify,
                strip: args.strip,
                pretty: args.pretty,
            },
        })
    }
}

/// True when `file` is a character device such as a terminal or `/dev/null`.
/// Unreadable metadata counts as a character device.
#[cfg(unix)]
pub fn is_char_device(file: &File) -> bool {
    use std::os::unix::fs::FileTypeExt;

    file.metadata()
        .map_or(true, |meta| meta.file_type().is_char_device())
}

/// Whether standard input is a character device rather than piped data.
#[cfg(unix)]
pub fn stdin_is_char_device() -> bool {
    use std::os::fd::AsFd;

    io::stdin()
        .as_fd()
        .try_clone_to_owned()
        .map(File::from)
        .map_or(true, |stdin| is_char_device(&stdin))
}

#[cfg(not(unix))]
pub fn stdin_is_char_device() -> bool {
    use std::io::IsTerminal;

    io::stdin().is_terminal()
}

/// `dir/name.json` becomes `dir/name-hashed.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}-hashed.json"))
}
