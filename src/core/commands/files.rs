//! File operations: `cat`, `add`, `rn`, `cp`, `rm`, `mv`, `hash`.

use std::io;
use std::path::{Path, PathBuf};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncReadExt;

use crate::config::{CHUNK_SIZE, FILE_EXISTS_MSG, HASH_KEY, MOVE_ABORTED_MSG, TARGET_EXISTS_MSG};
use crate::core::Session;
use crate::core::console::{Console, ConsoleWriter};
use crate::core::error::{PathContext, ShellError};
use crate::core::stream::StreamPipeline;
use crate::models::OutputLine;

use super::{CommandResult, Outcome, PathArg};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Shared Checks
// =============================================================================

/// Resolve `arg` and require an existing regular file.
pub(super) async fn source_file(session: &Session, arg: &PathArg) -> Result<PathBuf, ShellError> {
    let path = session.resolve(arg.as_str());
    let meta = fs::metadata(&path).await.at_path(&path)?;
    if !meta.is_file() {
        return Err(ShellError::validation(format!(
            "{} is not a file",
            path.display()
        )));
    }
    Ok(path)
}

/// Resolve `arg` and require an existing directory.
pub(super) async fn dest_directory(
    session: &Session,
    arg: &PathArg,
) -> Result<PathBuf, ShellError> {
    let path = session.resolve(arg.as_str());
    let meta = fs::metadata(&path).await.at_path(&path)?;
    if !meta.is_dir() {
        return Err(ShellError::validation(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(path)
}

/// Create `path` for writing, refusing to replace anything already there.
///
/// Returns `None` when the path is taken.
pub(super) async fn create_target(path: &Path) -> Result<Option<File>, ShellError> {
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ShellError::path(path, e)),
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, ShellError> {
    path.file_name()
        .ok_or_else(|| ShellError::validation(format!("{} has no file name", path.display())))
}

// =============================================================================
// Operations
// =============================================================================

/// Stream a file's contents to the console.
///
/// Bytes reach the console as they are read. A line break follows unless
/// the content already ends with one, so an empty file prints one empty line.
pub async fn cat(
    session: &Session,
    arg: &PathArg,
    console: &mut dyn Console,
) -> Result<CommandResult, ShellError> {
    let path = session.resolve(arg.as_str());
    let file = File::open(&path).await.at_path(&path)?;
    let meta = file.metadata().await.at_path(&path)?;
    if meta.is_dir() {
        return Err(ShellError::path(
            &path,
            io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
        ));
    }

    let mut writer = ConsoleWriter::new(console);
    let bytes = StreamPipeline::new(file, &mut writer)
        .run()
        .await
        .map_err(|e| match e {
            ShellError::IoFailure(source) => ShellError::path(&path, source),
            other => other,
        })?;
    if !writer.at_line_start() {
        console.write_raw(b"\n");
    }
    tracing::debug!(path = %path.display(), bytes, "printed file");
    Ok(CommandResult::empty())
}

/// Create an empty file unless something already exists at the path.
pub async fn add(session: &Session, arg: &PathArg) -> Result<CommandResult, ShellError> {
    let path = session.resolve(arg.as_str());
    match create_target(&path).await? {
        Some(_) => {
            tracing::debug!(path = %path.display(), "created empty file");
            Ok(CommandResult::empty())
        }
        None => Ok(CommandResult::already_exists(FILE_EXISTS_MSG)),
    }
}

/// Rename a file within its own directory, never replacing an existing entry.
pub async fn rename(
    session: &Session,
    source: &PathArg,
    new_name: &str,
) -> Result<CommandResult, ShellError> {
    let from = session.resolve(source.as_str());
    fs::metadata(&from).await.at_path(&from)?;
    let to = crate::core::path::parent(&from).join(new_name);

    // Linking fails atomically when `to` is taken; plain `rename` replaces it.
    match fs::hard_link(&from, &to).await {
        Ok(()) => fs::remove_file(&from).await.at_path(&from)?,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(CommandResult::already_exists(FILE_EXISTS_MSG));
        }
        Err(e) => {
            // Directories and link-less filesystems. An entry created between
            // the check and the rename is still replaced here.
            tracing::debug!(path = %from.display(), error = %e, "hard link unavailable, renaming in place");
            if fs::try_exists(&to).await.at_path(&to)? {
                return Ok(CommandResult::already_exists(FILE_EXISTS_MSG));
            }
            fs::rename(&from, &to).await.at_path(&from)?;
        }
    }
    Ok(CommandResult::empty())
}

/// Stream-copy a file into a directory under its original name.
pub async fn copy(
    session: &Session,
    source: &PathArg,
    dest_dir: &PathArg,
) -> Result<CommandResult, ShellError> {
    let from = source_file(session, source).await?;
    let dir = dest_directory(session, dest_dir).await?;
    let to = dir.join(file_name(&from)?);

    let reader = File::open(&from).await.at_path(&from)?;
    let Some(writer) = create_target(&to).await? else {
        return Ok(CommandResult::already_exists(TARGET_EXISTS_MSG));
    };

    let bytes = StreamPipeline::new(reader, writer).run().await?;
    tracing::debug!(from = %from.display(), to = %to.display(), bytes, "copied file");
    Ok(CommandResult::empty())
}

/// Delete a file.
pub async fn remove(session: &Session, arg: &PathArg) -> Result<CommandResult, ShellError> {
    let path = session.resolve(arg.as_str());
    fs::remove_file(&path).await.at_path(&path)?;
    Ok(CommandResult::empty())
}

/// Copy then delete the source.
///
/// When the destination already holds a file of the same name nothing is
/// copied, so the source is kept rather than deleted.
pub async fn move_file(
    session: &Session,
    source: &PathArg,
    dest_dir: &PathArg,
) -> Result<CommandResult, ShellError> {
    let mut result = copy(session, source, dest_dir).await?;
    if result.outcome == Outcome::AlreadyExists {
        result.output.push(OutputLine::info(MOVE_ABORTED_MSG));
        return Ok(result);
    }
    remove(session, source).await
}

/// HMAC-SHA256 of a file's contents, printed as hex.
pub async fn hash(session: &Session, arg: &PathArg) -> Result<CommandResult, ShellError> {
    let path = session.resolve(arg.as_str());
    let mut file = File::open(&path).await.at_path(&path)?;

    let mut mac = HmacSha256::new_from_slice(HASH_KEY)
        .map_err(|e| ShellError::validation(format!("hash key rejected: {}", e)))?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await.at_path(&path)?;
        if n == 0 {
            break;
        }
        mac.update(&buf[..n]);
    }

    let digest = hex::encode(mac.finalize().into_bytes());
    Ok(CommandResult::output(vec![OutputLine::text(digest)]))
}
