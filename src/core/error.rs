//! Error taxonomy for command dispatch and file operations.
//!
//! Every failure a handler can produce is one of the [`ShellError`] kinds.
//! The dispatcher collapses them into console messages:
//!
//! - [`ShellError::InvalidEncoding`] / [`ShellError::UnknownOperation`] /
//!   [`ShellError::InvalidArguments`] - precise "invalid input"
//! - everything else - a generic "operation failed"

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure produced while dispatching or executing a command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The input line could not be decoded as text.
    #[error("input line is not valid UTF-8")]
    InvalidEncoding(#[source] FromUtf8Error),

    /// Command name is not in the registry (includes empty input).
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// Wrong arity or malformed arguments for a known command.
    #[error("{command}: invalid arguments: {reason}")]
    InvalidArguments {
        command: &'static str,
        reason: String,
    },

    /// Filesystem access failed (missing entry, permission denied, rename/delete failure).
    #[error("{}: {source}", .path.display())]
    PathError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A precondition on argument content failed.
    #[error("{0}")]
    ValidationError(String),

    /// A streaming transfer failed part way through.
    #[error("transfer failed: {0}")]
    IoFailure(#[source] io::Error),
}

impl ShellError {
    pub fn invalid_args(command: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            command,
            reason: reason.into(),
        }
    }

    pub fn path(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::PathError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the dispatcher should show the precise input message rather
    /// than the generic failure message.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding(_) | Self::UnknownOperation(_) | Self::InvalidArguments { .. }
        )
    }
}

/// Attach the offending path to an I/O error.
pub trait PathContext<T> {
    fn at_path(self, path: &Path) -> Result<T, ShellError>;
}

impl<T> PathContext<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T, ShellError> {
        self.map_err(|e| ShellError::path(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(ShellError::UnknownOperation("frobnicate".into()).is_input_error());
        assert!(ShellError::invalid_args("rn", "expected 2 arguments").is_input_error());
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        assert!(ShellError::InvalidEncoding(bad).is_input_error());
        assert!(!ShellError::validation("not a file").is_input_error());
        assert!(
            !ShellError::path("/nope", io::Error::from(io::ErrorKind::NotFound)).is_input_error()
        );
        assert!(!ShellError::IoFailure(io::Error::from(io::ErrorKind::BrokenPipe)).is_input_error());
    }

    #[test]
    fn test_path_context() {
        let res: io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = res.at_path(Path::new("/tmp/missing")).unwrap_err();
        match err {
            ShellError::PathError { path, source } => {
                assert_eq!(path, PathBuf::from("/tmp/missing"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected PathError, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = ShellError::invalid_args("os", "unknown flag --gpu");
        assert_eq!(err.to_string(), "os: invalid arguments: unknown flag --gpu");
        let err = ShellError::UnknownOperation("frobnicate".into());
        assert_eq!(err.to_string(), "unknown operation: \"frobnicate\"");
    }
}
