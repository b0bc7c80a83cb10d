//! Data models and types for the application.
//!
//! Contains [`OutputLine`] and the listing types rendered to the console.

mod terminal;

pub use terminal::{EntryKind, ListEntry, OutputLine};
