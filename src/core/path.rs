//! Lexical path resolution against a working directory.
//!
//! Resolution never touches the filesystem: callers check existence
//! themselves, so the result may point at nothing.

use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied fragment against `base`.
///
/// - absolute fragments replace `base`
/// - `~` and `~/rest` start from the home directory when one is known
/// - `.` segments are dropped, `..` pops one segment (never above the root)
///
/// `base` is expected to be absolute; the result is then absolute as well.
pub fn resolve(base: &Path, fragment: &str) -> PathBuf {
    let joined = match expand_home(fragment) {
        Some(home) => home,
        None => base.join(fragment),
    };
    normalize(&joined)
}

/// Parent of an absolute path. The root is its own parent.
pub fn parent(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Normalize `.` and `..` components without following symlinks.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`; a relative path keeps leading `..`s.
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn expand_home(fragment: &str) -> Option<PathBuf> {
    let rest = if fragment == "~" {
        ""
    } else {
        fragment
            .strip_prefix("~/")
            .or_else(|| fragment.strip_prefix("~\\"))?
    };
    dirs::home_dir().map(|home| home.join(rest))
}
