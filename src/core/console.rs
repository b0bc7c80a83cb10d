//! Console sinks for user-facing output.
//!
//! Rendered lines go through [`Console::emit`]; file content streamed by
//! `cat` goes through [`Console::write_raw`] one chunk at a time, usually via
//! a [`ConsoleWriter`] at the end of a pipeline.

use std::io::{self, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;

use crate::models::OutputLine;

/// Destination for user-facing output.
pub trait Console {
    /// Write one rendered line.
    fn emit(&mut self, line: &OutputLine);

    /// Write bytes as-is, with no line break added.
    fn write_raw(&mut self, bytes: &[u8]);
}

/// Collects output in memory. Each raw chunk becomes its own text line.
impl Console for Vec<OutputLine> {
    fn emit(&mut self, line: &OutputLine) {
        self.push(line.clone());
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.push(OutputLine::text(String::from_utf8_lossy(bytes)));
    }
}

/// Writes output to stdout, one line per [`OutputLine`].
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn emit(&mut self, line: &OutputLine) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(bytes).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }
}

/// [`AsyncWrite`] adapter that forwards every write to a console.
pub struct ConsoleWriter<'a> {
    console: &'a mut dyn Console,
    last: Option<u8>,
}

impl<'a> ConsoleWriter<'a> {
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self {
            console,
            last: None,
        }
    }

    /// Whether the output so far ends with a line break.
    ///
    /// False when nothing was written.
    pub fn at_line_start(&self) -> bool {
        self.last == Some(b'\n')
    }
}

impl AsyncWrite for ConsoleWriter<'_> {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if let Some(&byte) = buf.last() {
            this.last = Some(byte);
            this.console.write_raw(buf);
        }
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn test_vec_console_collects() {
        let mut console: Vec<OutputLine> = Vec::new();
        console.emit(&OutputLine::info("note"));
        console.write_raw(b"chunk");
        assert_eq!(
            console,
            vec![OutputLine::info("note"), OutputLine::text("chunk")]
        );
    }

    #[tokio::test]
    async fn test_writer_forwards_chunks() {
        let mut console: Vec<OutputLine> = Vec::new();
        let mut writer = ConsoleWriter::new(&mut console);
        assert!(!writer.at_line_start());

        writer.write_all(b"first\n").await.unwrap();
        assert!(writer.at_line_start());
        writer.write_all(b"second").await.unwrap();
        assert!(!writer.at_line_start());
        writer.write_all(b"").await.unwrap();
        assert!(!writer.at_line_start());

        assert_eq!(
            console,
            vec![OutputLine::text("first\n"), OutputLine::text("second")]
        );
    }
}
