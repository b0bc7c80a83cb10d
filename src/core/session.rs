//! Per-process session state threaded through every handler.

use std::path::{Path, PathBuf};

use crate::core::error::{PathContext, ShellError};
use crate::core::path;

/// Mutable state shared by all commands of one shell session.
///
/// The working directory is only changed through [`Session::change_dir`],
/// which checks the target before committing, so it always names an
/// existing directory.
#[derive(Clone, Debug)]
pub struct Session {
    cwd: PathBuf,
    username: String,
}

impl Session {
    /// Start a session in `cwd`.
    ///
    /// Fails with `PathError` when `cwd` is not an existing directory.
    pub fn new(cwd: impl AsRef<Path>, username: impl Into<String>) -> Result<Self, ShellError> {
        let cwd = path::normalize(cwd.as_ref());
        ensure_dir(&cwd)?;
        Ok(Self {
            cwd,
            username: username.into(),
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Resolve a user fragment against the working directory.
    pub fn resolve(&self, fragment: &str) -> PathBuf {
        path::resolve(&self.cwd, fragment)
    }

    /// Move to `fragment`, leaving the working directory untouched on failure.
    pub async fn change_dir(&mut self, fragment: &str) -> Result<(), ShellError> {
        let target = self.resolve(fragment);
        let meta = tokio::fs::metadata(&target).await.at_path(&target)?;
        if !meta.is_dir() {
            return Err(ShellError::path(
                &target,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        // Listing proves the directory is accessible, not just present.
        tokio::fs::read_dir(&target).await.at_path(&target)?;
        tracing::debug!(from = %self.cwd.display(), to = %target.display(), "changed directory");
        self.cwd = target;
        Ok(())
    }

    /// Move to the parent directory. A no-op at the root.
    pub fn go_up(&mut self) {
        self.cwd = path::parent(&self.cwd);
    }
}

fn ensure_dir(path: &Path) -> Result<(), ShellError> {
    let meta = std::fs::metadata(path).at_path(path)?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(ShellError::path(
            path,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cd_then_up_round_trip() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut session = Session::new(tmp.path(), "tester").unwrap();
        let start = session.cwd().to_path_buf();

        session.change_dir("sub").await.unwrap();
        assert_eq!(session.cwd(), start.join("sub"));

        session.go_up();
        assert_eq!(session.cwd(), start);
    }

    #[tokio::test]
    async fn test_failed_cd_keeps_cwd() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("file.txt"), b"x").unwrap();
        let mut session = Session::new(tmp.path(), "tester").unwrap();
        let start = session.cwd().to_path_buf();

        assert!(matches!(
            session.change_dir("missing").await,
            Err(ShellError::PathError { .. })
        ));
        assert!(matches!(
            session.change_dir("file.txt").await,
            Err(ShellError::PathError { .. })
        ));
        assert_eq!(session.cwd(), start);
    }

    #[cfg(unix)]
    #[test]
    fn test_up_at_root_is_noop() {
        let mut session = Session::new("/", "tester").unwrap();
        session.go_up();
        assert_eq!(session.cwd(), Path::new("/"));
    }

    #[test]
    fn test_new_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        std::fs::write(&file, b"").unwrap();
        assert!(Session::new(&file, "tester").is_err());
    }
}
