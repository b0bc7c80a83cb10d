//! Command execution logic.
//!
//! Contains the `execute_command` function that runs validated commands
//! against the session and returns results. Navigation, listing and host
//! info live here; file transfers are in `files` and `archive`.

use crate::core::Session;
use crate::core::console::Console;
use crate::core::error::{PathContext, ShellError};
use crate::models::{EntryKind, ListEntry, OutputLine};
use crate::utils::{format, sysinfo};

use super::{Command, CommandResult, OsFlag, archive, files};

/// Execute a validated command.
///
/// # Arguments
///
/// * `cmd` - The command produced by [`Command::parse`]
/// * `session` - Session state; only `cd`/`up` change its working directory
/// * `console` - Receives streamed file content as it is read (`cat`)
pub async fn execute_command(
    cmd: Command,
    session: &mut Session,
    console: &mut dyn Console,
) -> Result<CommandResult, ShellError> {
    match cmd {
        Command::Exit => Ok(CommandResult::exit()),
        Command::Up => {
            session.go_up();
            Ok(CommandResult::empty())
        }
        Command::Cd(path) => {
            session.change_dir(path.as_str()).await?;
            Ok(CommandResult::empty())
        }
        Command::Ls => execute_ls(session).await,
        Command::Cat(path) => files::cat(session, &path, console).await,
        Command::Add(path) => files::add(session, &path).await,
        Command::Rn { source, new_name } => files::rename(session, &source, &new_name).await,
        Command::Cp { source, dest_dir } => files::copy(session, &source, &dest_dir).await,
        Command::Rm(path) => files::remove(session, &path).await,
        Command::Mv { source, dest_dir } => files::move_file(session, &source, &dest_dir).await,
        Command::Os(flag) => Ok(execute_os(flag)),
        Command::Hash(path) => files::hash(session, &path).await,
        Command::Compress { source, dest_dir } => {
            archive::compress(session, &source, &dest_dir).await
        }
        Command::Decompress { source, dest_dir } => {
            archive::decompress(session, &source, &dest_dir).await
        }
    }
}

/// Execute `ls` command: directories first, then files, each sorted by name.
async fn execute_ls(session: &Session) -> Result<CommandResult, ShellError> {
    let cwd = session.cwd();
    let mut reader = tokio::fs::read_dir(cwd).await.at_path(cwd)?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.at_path(cwd)? {
        let file_type = entry.file_type().await.at_path(&entry.path())?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(ListEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }
    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));

    Ok(CommandResult::output(vec![OutputLine::listing(entries)]))
}

/// Execute `os` command.
fn execute_os(flag: OsFlag) -> CommandResult {
    let lines = match flag {
        OsFlag::Eol => vec![OutputLine::text(format::format_eol(sysinfo::EOL))],
        OsFlag::Cpus => {
            let cpus = sysinfo::cpu_summary();
            vec![
                OutputLine::text(format!("overallAmount: {}", cpus.count)),
                OutputLine::text(format!("model: {}", cpus.model)),
                OutputLine::text(format!("speed: {}", format::format_ghz(cpus.speed_mhz))),
            ]
        }
        OsFlag::HomeDir => vec![OutputLine::text(
            sysinfo::home_dir()
                .map(|home| home.display().to_string())
                .unwrap_or_default(),
        )],
        OsFlag::Username => vec![OutputLine::text(sysinfo::login_name())],
        OsFlag::Architecture => vec![OutputLine::text(sysinfo::architecture())],
    };
    CommandResult::output(lines)
}
