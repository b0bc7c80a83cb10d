//! Terminal-related data types for output rendering.

use std::fmt;

use crate::utils::format::render_listing;

/// Kind of a directory listing entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// One row of an `ls` listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// A single line (or block) of console output.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputLine {
    /// Plain text output
    Text(String),
    /// Non-fatal notice (e.g. "already exists")
    Info(String),
    /// Failure message
    Error(String),
    /// Tabular directory listing
    Listing(Vec<ListEntry>),
    /// Empty line
    Empty,
}

impl OutputLine {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn info(s: impl Into<String>) -> Self {
        Self::Info(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::Error(s.into())
    }

    pub fn listing(entries: Vec<ListEntry>) -> Self {
        Self::Listing(entries)
    }

    pub fn empty() -> Self {
        Self::Empty
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Info(s) | Self::Error(s) => write!(f, "{}", s),
            Self::Listing(entries) => write!(f, "{}", render_listing(entries)),
            Self::Empty => Ok(()),
        }
    }
}
