//! Command registry, argument validation and execution.
//!
//! This module provides:
//! - `Command` enum, one variant per operation the shell knows
//! - `CommandResult` / `Outcome` for command execution results
//! - `execute_command` for running a validated command against a session
//!
//! # Architecture
//!
//! A tokenized line is turned into a `Command` by [`Command::parse`], which
//! is the registry lookup: unknown names fail with `UnknownOperation`, and
//! each known name checks its own arity before any I/O happens, failing
//! with `InvalidArguments`. Only a fully validated `Command` reaches
//! `execute_command`.

mod archive;
mod execute;
mod files;
mod result;

pub use execute::execute_command;
pub use result::{CommandResult, Outcome};

use std::fmt;

use crate::core::error::ShellError;
use crate::core::parser::ParsedCommand;

// =============================================================================
// Path Argument Type
// =============================================================================

/// A path argument passed to a command (e.g., `cd foo`, `cat bar.txt`).
///
/// The path is stored as typed; it is resolved against the session's
/// working directory only when the command runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PathArg {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for PathArg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// OS Info Flags
// =============================================================================

/// Host detail requested by `os`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFlag {
    Eol,
    Cpus,
    HomeDir,
    Username,
    Architecture,
}

impl OsFlag {
    pub const ALL: [(&'static str, OsFlag); 5] = [
        ("--EOL", Self::Eol),
        ("--cpus", Self::Cpus),
        ("--homedir", Self::HomeDir),
        ("--username", Self::Username),
        ("--architecture", Self::Architecture),
    ];

    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == flag)
            .map(|(_, value)| *value)
    }
}

// =============================================================================
// Command Enum
// =============================================================================

/// Validated shell command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Exit,
    Up,
    Cd(PathArg),
    Ls,
    Cat(PathArg),
    Add(PathArg),
    Rn { source: PathArg, new_name: String },
    Cp { source: PathArg, dest_dir: PathArg },
    Rm(PathArg),
    Mv { source: PathArg, dest_dir: PathArg },
    Os(OsFlag),
    Hash(PathArg),
    Compress { source: PathArg, dest_dir: PathArg },
    Decompress { source: PathArg, dest_dir: PathArg },
}

impl Command {
    /// Look up and validate a tokenized line.
    ///
    /// Names are matched exactly. Argument checks never touch the
    /// filesystem, so a rejected command has no side effects.
    pub fn parse(cmd: &ParsedCommand) -> Result<Self, ShellError> {
        let args = &cmd.args;
        match cmd.name.as_str() {
            "exit" | ".exit" => no_args("exit", args).map(|_| Self::Exit),
            "up" => no_args("up", args).map(|_| Self::Up),
            "ls" => no_args("ls", args).map(|_| Self::Ls),
            "cd" => joined_path("cd", args).map(Self::Cd),
            "cat" => joined_path("cat", args).map(Self::Cat),
            "add" => joined_path("add", args).map(Self::Add),
            "rm" => joined_path("rm", args).map(Self::Rm),
            "rn" => {
                let [source, new_name] = exact::<2>("rn", args)?;
                if !is_plain_name(&new_name) {
                    return Err(ShellError::invalid_args(
                        "rn",
                        format!("'{}' is not a file name", new_name),
                    ));
                }
                Ok(Self::Rn {
                    source: source.into(),
                    new_name,
                })
            }
            "cp" => {
                let [source, dest_dir] = exact::<2>("cp", args)?;
                Ok(Self::Cp {
                    source: source.into(),
                    dest_dir: dest_dir.into(),
                })
            }
            "mv" => {
                let [source, dest_dir] = exact::<2>("mv", args)?;
                Ok(Self::Mv {
                    source: source.into(),
                    dest_dir: dest_dir.into(),
                })
            }
            "os" => {
                let [flag] = exact::<1>("os", args)?;
                OsFlag::from_flag(&flag)
                    .map(Self::Os)
                    .ok_or_else(|| ShellError::invalid_args("os", format!("unknown flag {}", flag)))
            }
            "hash" => {
                let [path] = exact::<1>("hash", args)?;
                Ok(Self::Hash(path.into()))
            }
            "compress" => {
                let [source, dest_dir] = exact::<2>("compress", args)?;
                Ok(Self::Compress {
                    source: source.into(),
                    dest_dir: dest_dir.into(),
                })
            }
            "decompress" => {
                let [source, dest_dir] = exact::<2>("decompress", args)?;
                Ok(Self::Decompress {
                    source: source.into(),
                    dest_dir: dest_dir.into(),
                })
            }
            _ => Err(ShellError::UnknownOperation(cmd.name.clone())),
        }
    }
}

fn no_args(command: &'static str, args: &[String]) -> Result<(), ShellError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ShellError::invalid_args(
            command,
            format!("expected no arguments, got {}", args.len()),
        ))
    }
}

fn exact<const N: usize>(
    command: &'static str,
    args: &[String],
) -> Result<[String; N], ShellError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|got| {
        ShellError::invalid_args(
            command,
            format!("expected {} argument(s), got {}", N, got.len()),
        )
    })
}

/// All arguments re-joined into one path, so names with spaces survive.
fn joined_path(command: &'static str, args: &[String]) -> Result<PathArg, ShellError> {
    if args.is_empty() {
        return Err(ShellError::invalid_args(command, "missing path operand"));
    }
    Ok(PathArg::new(args.join(" ")))
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_input;

    fn parse(line: &str) -> Result<Command, ShellError> {
        Command::parse(&parse_input(line))
    }

    fn is_invalid(res: Result<Command, ShellError>) -> bool {
        matches!(res, Err(ShellError::InvalidArguments { .. }))
    }

    #[test]
    fn test_parse_no_arg_commands() {
        assert_eq!(parse("exit").unwrap(), Command::Exit);
        assert_eq!(parse(".exit").unwrap(), Command::Exit);
        assert_eq!(parse("up").unwrap(), Command::Up);
        assert_eq!(parse("ls").unwrap(), Command::Ls);
        assert!(is_invalid(parse("exit now")));
        assert!(is_invalid(parse("up ..")));
        assert!(is_invalid(parse("ls -l")));
    }

    #[test]
    fn test_parse_joined_paths() {
        assert!(matches!(
            parse("cd My Documents").unwrap(),
            Command::Cd(ref p) if p == &"My Documents"
        ));
        assert!(matches!(
            parse("cat a b.txt").unwrap(),
            Command::Cat(ref p) if p == &"a b.txt"
        ));
        assert!(matches!(parse("add notes.txt").unwrap(), Command::Add(_)));
        assert!(matches!(parse("rm notes.txt").unwrap(), Command::Rm(_)));
        for cmd in ["cd", "cat", "add", "rm"] {
            assert!(is_invalid(parse(cmd)), "{} without operand", cmd);
        }
    }

    #[test]
    fn test_parse_exact_arity() {
        for cmd in ["rn", "cp", "mv", "compress", "decompress"] {
            assert!(is_invalid(parse(cmd)), "{} with 0 args", cmd);
            assert!(is_invalid(parse(&format!("{} a", cmd))), "{} with 1 arg", cmd);
            assert!(
                is_invalid(parse(&format!("{} a b c", cmd))),
                "{} with 3 args",
                cmd
            );
            assert!(parse(&format!("{} a b", cmd)).is_ok(), "{} with 2 args", cmd);
        }
        assert!(is_invalid(parse("hash")));
        assert!(is_invalid(parse("hash a b")));
        assert!(matches!(
            parse("hash a.txt").unwrap(),
            Command::Hash(ref p) if p == &"a.txt"
        ));
    }

    #[test]
    fn test_parse_cp_fields() {
        assert_eq!(
            parse("cp notes.txt backup").unwrap(),
            Command::Cp {
                source: PathArg::new("notes.txt"),
                dest_dir: PathArg::new("backup"),
            }
        );
    }

    #[test]
    fn test_parse_rn_rejects_paths_as_new_name() {
        assert!(is_invalid(parse("rn a.txt sub/b.txt")));
        assert!(is_invalid(parse("rn a.txt ..")));
        assert_eq!(
            parse("rn a.txt b.txt").unwrap(),
            Command::Rn {
                source: PathArg::new("a.txt"),
                new_name: "b.txt".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_os_flags() {
        assert_eq!(parse("os --EOL").unwrap(), Command::Os(OsFlag::Eol));
        assert_eq!(parse("os --cpus").unwrap(), Command::Os(OsFlag::Cpus));
        assert_eq!(parse("os --homedir").unwrap(), Command::Os(OsFlag::HomeDir));
        assert_eq!(parse("os --username").unwrap(), Command::Os(OsFlag::Username));
        assert_eq!(
            parse("os --architecture").unwrap(),
            Command::Os(OsFlag::Architecture)
        );
        assert!(is_invalid(parse("os")));
        assert!(is_invalid(parse("os --gpu")));
        assert!(is_invalid(parse("os --eol")));
        assert!(is_invalid(parse("os --EOL --cpus")));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            parse("frobnicate"),
            Err(ShellError::UnknownOperation(ref c)) if c == "frobnicate"
        ));
        assert!(matches!(parse(""), Err(ShellError::UnknownOperation(_))));
        // Names are case sensitive.
        assert!(matches!(parse("LS"), Err(ShellError::UnknownOperation(_))));
    }

    #[test]
    fn test_every_command_name_is_registered() {
        for name in [
            ".exit", "add", "cat", "cd", "compress", "cp", "decompress", "exit", "hash", "ls", "mv",
            "os", "rm", "rn", "up",
        ] {
            let res = parse(name);
            assert!(
                !matches!(res, Err(ShellError::UnknownOperation(_))),
                "{} should be registered",
                name
            );
        }
    }
}
