//! Core business logic for the shell.
//!
//! This module provides:
//! - [`Command`] parsing and [`execute_command`] execution
//! - [`Dispatcher`] for processing input lines in order
//! - [`Console`] sinks for rendered and streamed output
//! - [`Session`] holding the working directory
//! - [`StreamPipeline`] for chunked copy and compression transfers

pub mod commands;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod path;
mod session;
pub mod stream;

pub use commands::{Command, CommandResult, Outcome, execute_command};
pub use console::{Console, ConsoleWriter, StdoutConsole};
pub use dispatcher::{DispatchState, Dispatcher, InputLine, spawn_line_reader};
pub use error::ShellError;
pub use parser::parse_input;
pub use session::Session;
pub use stream::StreamPipeline;
