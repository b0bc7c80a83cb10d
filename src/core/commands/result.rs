//! Command execution result type.

use crate::models::OutputLine;

/// How a successful command ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The operation was carried out.
    Done,
    /// Nothing was written because the target already exists.
    AlreadyExists,
    /// The session should end.
    Exit,
}

/// Result of executing a command.
///
/// Commands produce output lines plus an [`Outcome`] telling the caller
/// whether anything happened and whether to keep going.
#[derive(Clone, Debug)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<OutputLine>,
    pub outcome: Outcome,
}

impl CommandResult {
    /// Create a result with just output.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            output: lines,
            outcome: Outcome::Done,
        }
    }

    /// Create an empty result (no output).
    pub fn empty() -> Self {
        Self::output(vec![])
    }

    /// Report that the target was left alone because it already exists.
    pub fn already_exists(notice: impl Into<String>) -> Self {
        Self {
            output: vec![OutputLine::info(notice)],
            outcome: Outcome::AlreadyExists,
        }
    }

    /// End the session.
    pub fn exit() -> Self {
        Self {
            output: vec![],
            outcome: Outcome::Exit,
        }
    }

    pub fn is_exit(&self) -> bool {
        self.outcome == Outcome::Exit
    }
}
