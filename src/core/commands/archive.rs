//! Brotli `compress` / `decompress` commands.

use std::path::{Path, PathBuf};

use tokio::fs::File;

use crate::config::{COMPRESSED_EXTENSION, TARGET_EXISTS_MSG};
use crate::core::Session;
use crate::core::error::{PathContext, ShellError};
use crate::core::stream::{BrotliDecoder, BrotliEncoder, StreamPipeline, Transform};

use super::files::{create_target, dest_directory, source_file};
use super::{CommandResult, PathArg};

/// Compress `source` into `<dest_dir>/<stem>.br`.
pub async fn compress(
    session: &Session,
    source: &PathArg,
    dest_dir: &PathArg,
) -> Result<CommandResult, ShellError> {
    let from = source_file(session, source).await?;
    let dir = dest_directory(session, dest_dir).await?;
    let to = dir.join(compressed_name(&from)?);

    transfer(&from, &to, BrotliEncoder::new()).await
}

/// Decompress a `.br` file into `<dest_dir>/<stem>`.
pub async fn decompress(
    session: &Session,
    source: &PathArg,
    dest_dir: &PathArg,
) -> Result<CommandResult, ShellError> {
    let from = source_file(session, source).await?;
    let name = decompressed_name(&from)?;
    let dir = dest_directory(session, dest_dir).await?;
    let to = dir.join(name);

    transfer(&from, &to, BrotliDecoder::new()).await
}

async fn transfer(
    from: &Path,
    to: &Path,
    stage: impl Transform + 'static,
) -> Result<CommandResult, ShellError> {
    let reader = File::open(from).await.at_path(from)?;
    let Some(writer) = create_target(to).await? else {
        return Ok(CommandResult::already_exists(TARGET_EXISTS_MSG));
    };

    let bytes = StreamPipeline::new(reader, writer)
        .through(stage)
        .run()
        .await
        .inspect_err(|e| {
            tracing::warn!(path = %to.display(), error = %e, "transfer aborted, partial output left in place");
        })?;
    tracing::debug!(from = %from.display(), to = %to.display(), bytes, "transfer complete");
    Ok(CommandResult::empty())
}

/// `report.txt` → `report.br`
fn compressed_name(path: &Path) -> Result<PathBuf, ShellError> {
    let stem = path
        .file_stem()
        .ok_or_else(|| ShellError::validation(format!("{} has no file name", path.display())))?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    Ok(PathBuf::from(name))
}

/// `report.br` → `report`; anything without the extension is rejected.
fn decompressed_name(path: &Path) -> Result<PathBuf, ShellError> {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == COMPRESSED_EXTENSION);
    match path.file_stem() {
        Some(stem) if has_extension => Ok(PathBuf::from(stem)),
        _ => Err(ShellError::validation(format!(
            "{} is not a .{} file",
            path.display(),
            COMPRESSED_EXTENSION
        ))),
    }
}
