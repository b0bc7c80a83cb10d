//! Line-at-a-time command dispatch.
//!
//! The [`Dispatcher`] owns the [`Session`] and runs each input line through
//! parse → validate → execute → report. Lines are consumed from a FIFO
//! queue, and a command is reported in full before the next one is taken,
//! so handlers never race on the working directory.

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::config::{INPUT_QUEUE_DEPTH, INVALID_INPUT_MSG, OPERATION_FAILED_MSG, cwd_message};
use crate::core::Session;
use crate::core::commands::{Command, CommandResult, execute_command};
use crate::core::console::Console;
use crate::core::error::ShellError;
use crate::core::parser::parse_input;
use crate::models::OutputLine;

// =============================================================================
// Input Queue
// =============================================================================

/// One line of input; `Err` when it could not be decoded.
pub type InputLine = Result<String, ShellError>;

/// Read lines from `input` on a dedicated thread and queue them in order.
///
/// The returned receiver yields lines FIFO and closes at end of input. A
/// line that is not valid UTF-8 is queued as an error and reading goes on.
/// Blocking reads stay off the async runtime so a pending read never holds
/// up shutdown.
pub fn spawn_line_reader<R>(mut input: R) -> mpsc::Receiver<InputLine>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(INPUT_QUEUE_DEPTH);
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                        if buf.last() == Some(&b'\r') {
                            buf.pop();
                        }
                    }
                    let line = String::from_utf8(std::mem::take(&mut buf)).map_err(ShellError::InvalidEncoding);
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "stopped reading input");
                    break;
                }
            }
        }
    });
    rx
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Phase of the line currently being processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Parsing,
    Validating,
    Executing,
    Reporting,
}

/// Runs command lines against a session, one at a time.
pub struct Dispatcher {
    session: Session,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: DispatchState::Idle,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Parse, validate and execute one line, surfacing the raw failure.
    ///
    /// Streamed output (`cat`) goes straight to `console`; everything else
    /// comes back in the result.
    pub async fn try_dispatch(
        &mut self,
        line: &str,
        console: &mut dyn Console,
    ) -> Result<CommandResult, ShellError> {
        self.transition(DispatchState::Parsing);
        let parsed = parse_input(line);

        self.transition(DispatchState::Validating);
        let cmd = Command::parse(&parsed)?;

        self.transition(DispatchState::Executing);
        execute_command(cmd, &mut self.session, console).await
    }

    /// Process one line and turn the outcome into console output.
    ///
    /// Success adds the working-directory line (except for `exit`); failure
    /// yields exactly one message. Always ends back in `Idle`.
    pub async fn dispatch(&mut self, line: &str, console: &mut dyn Console) -> CommandResult {
        let res = self.try_dispatch(line, console).await;
        self.report(line, res)
    }

    fn report(&mut self, line: &str, res: Result<CommandResult, ShellError>) -> CommandResult {
        self.transition(DispatchState::Reporting);

        let result = match res {
            Ok(mut result) => {
                if !result.is_exit() {
                    result
                        .output
                        .push(OutputLine::text(cwd_message(self.session.cwd())));
                }
                result
            }
            Err(e) if e.is_input_error() => {
                tracing::debug!(input = line, error = %e, "rejected command");
                CommandResult::output(vec![OutputLine::error(INVALID_INPUT_MSG)])
            }
            Err(e) => {
                tracing::warn!(input = line, error = %e, "command failed");
                CommandResult::output(vec![OutputLine::error(OPERATION_FAILED_MSG)])
            }
        };

        self.transition(DispatchState::Idle);
        result
    }

    /// Drain `lines` in arrival order until `exit` or end of input.
    ///
    /// Returns `true` when the session ended through `exit`.
    pub async fn run<C: Console>(
        &mut self,
        lines: &mut mpsc::Receiver<InputLine>,
        console: &mut C,
    ) -> bool {
        while let Some(line) = lines.recv().await {
            let result = match line {
                Ok(line) => self.dispatch(&line, &mut *console).await,
                Err(e) => self.report("<undecodable line>", Err(e)),
            };
            for out in &result.output {
                console.emit(out);
            }
            if result.is_exit() {
                return true;
            }
        }
        false
    }

    fn transition(&mut self, next: DispatchState) {
        tracing::trace!(from = ?self.state, to = ?next, "dispatch state");
        self.state = next;
    }
}
