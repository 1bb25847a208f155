//! Command handlers for the `tern` CLI.
//!
//! Each submodule implements one command. Argument parsing and the shared
//! file loading live here in the module root.

use std::fmt;

use tern_ir::{SourceFile, StringInterner};
use tern_parse::parse_file;

use crate::position::{line_col, InvalidPosition, Position};

mod check;
mod fmt_file;
mod unfold;

pub use check::check_file;
pub use fmt_file::format_file;
pub use unfold::unfold_file;

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Check { path: String },
    Unfold {
        path: String,
        position: Position,
        write: bool,
    },
    Fmt { path: String },
    Help,
}

/// Why a command line was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    MissingCommand,
    UnknownCommand(String),
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    UnexpectedArgument(String),
    Position(InvalidPosition),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingCommand => write!(f, "missing command"),
            UsageError::UnknownCommand(command) => write!(f, "unknown command '{command}'"),
            UsageError::MissingArgument { command, what } => {
                write!(f, "'{command}' needs {what}")
            }
            UsageError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
            UsageError::Position(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for UsageError {}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(UsageError::MissingCommand);
    };
    let mut flags = Vec::new();
    let mut operands = Vec::new();
    for arg in rest {
        if arg.starts_with("--") {
            flags.push(arg.as_str());
        } else {
            operands.push(arg.as_str());
        }
    }

    let command = match command.as_str() {
        "check" => {
            reject_flags(&flags, &[])?;
            Command::Check {
                path: single_path("check", &operands)?,
            }
        }
        "fmt" => {
            reject_flags(&flags, &[])?;
            Command::Fmt {
                path: single_path("fmt", &operands)?,
            }
        }
        "unfold" => {
            reject_flags(&flags, &["--write"])?;
            let [path, position] = operands[..] else {
                return Err(surplus(&operands, 2).unwrap_or(UsageError::MissingArgument {
                    command: "unfold",
                    what: "a file and a position",
                }));
            };
            Command::Unfold {
                path: path.to_owned(),
                position: position.parse().map_err(UsageError::Position)?,
                write: flags.contains(&"--write"),
            }
        }
        "help" | "--help" | "-h" => Command::Help,
        other => return Err(UsageError::UnknownCommand(other.to_owned())),
    };
    Ok(command)
}

fn single_path(command: &'static str, operands: &[&str]) -> Result<String, UsageError> {
    match operands {
        [path] => Ok((*path).to_owned()),
        _ => Err(surplus(operands, 1).unwrap_or(UsageError::MissingArgument {
            command,
            what: "a file",
        })),
    }
}

fn surplus(operands: &[&str], expected: usize) -> Option<UsageError> {
    operands
        .get(expected)
        .map(|arg| UsageError::UnexpectedArgument((*arg).to_owned()))
}

fn reject_flags(flags: &[&str], allowed: &[&str]) -> Result<(), UsageError> {
    match flags.iter().find(|flag| !allowed.contains(*flag)) {
        Some(flag) => Err(UsageError::UnexpectedArgument((*flag).to_owned())),
        None => Ok(()),
    }
}

/// Read a source file, exiting with a message if it cannot be read.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Read and parse `path`. Reports every parse error and exits if there are
/// any, since a broken tree cannot be unfolded or printed faithfully.
pub(super) fn load(path: &str, interner: &StringInterner) -> SourceFile {
    let text = read_file(path);
    let output = parse_file(path, &text, interner);
    if output.has_errors() {
        for error in &output.errors {
            let (line, col) = line_col(&text, error.span.start);
            eprintln!("{path}:{line}:{col}: error: {error}");
        }
        eprintln!("{path}: {} parse error(s)", output.errors.len());
        std::process::exit(1);
    }
    output.file
}
