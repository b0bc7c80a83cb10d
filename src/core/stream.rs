//! Chunked streaming from a byte source to a byte sink.
//!
//! A [`StreamPipeline`] pulls at most [`CHUNK_SIZE`] bytes at a time from its
//! source, optionally passes them through one [`Transform`] stage, and writes
//! the stage's output to its sink in pieces no larger than [`CHUNK_SIZE`].
//! Each piece is written completely before more is produced, so a slow sink
//! stalls the source instead of growing a buffer, and a stage that expands
//! its input is drained as it goes.
//!
//! The pipeline owns both ends; they are dropped (and file handles closed)
//! when `run` returns, whether it succeeded or not.

use std::io::{self, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{BROTLI_BUFFER_SIZE, BROTLI_LG_WINDOW, BROTLI_QUALITY, CHUNK_SIZE};
use crate::core::error::ShellError;

// =============================================================================
// Transform Stages
// =============================================================================

/// An order-preserving byte conversion driven one chunk at a time.
///
/// Input goes in through `feed`; output comes out through `pull` into a
/// buffer the caller sizes, so a stage never hands back more than asked for
/// however far the data expands.
pub trait Transform: Send {
    /// Queue one chunk of input.
    fn feed(&mut self, input: &[u8]) -> io::Result<()>;

    /// Mark the end of input.
    fn close(&mut self) -> io::Result<()>;

    /// Copy ready output into `out`.
    ///
    /// `Ok(0)` means nothing more until the next `feed` (or at all, once
    /// closed).
    fn pull(&mut self, out: &mut [u8]) -> io::Result<usize>;
}

/// Bytes waiting to be handed on, consumed front to back.
#[derive(Debug, Default)]
struct Pending {
    buf: Vec<u8>,
    pos: usize,
}

impl Pending {
    fn push(&mut self, bytes: &[u8]) {
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        }
        self.buf.extend_from_slice(bytes);
    }

    fn take_into(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.buf.len() - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}

fn closed_stage() -> io::Error {
    io::Error::other("input already closed")
}

/// Brotli compression stage.
pub struct BrotliEncoder {
    writer: Option<brotli::CompressorWriter<Vec<u8>>>,
    ready: Pending,
}

impl BrotliEncoder {
    pub fn new() -> Self {
        Self {
            writer: Some(brotli::CompressorWriter::new(
                Vec::new(),
                BROTLI_BUFFER_SIZE,
                BROTLI_QUALITY,
                BROTLI_LG_WINDOW,
            )),
            ready: Pending::default(),
        }
    }
}

impl Default for BrotliEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for BrotliEncoder {
    fn feed(&mut self, input: &[u8]) -> io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(closed_stage)?;
        writer.write_all(input)?;
        let out = std::mem::take(writer.get_mut());
        self.ready.push(&out);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            let tail = writer.into_inner();
            self.ready.push(&tail);
        }
        Ok(())
    }

    fn pull(&mut self, out: &mut [u8]) -> io::Result<usize> {
        Ok(self.ready.take_into(out))
    }
}

/// Compressed input handed to the decompressor on demand.
///
/// Running dry before `closed` reads as `WouldBlock`, which the decompressor
/// passes back without losing its place.
#[derive(Debug, Default)]
struct InputFeed {
    pending: Pending,
    closed: bool,
}

impl Read for InputFeed {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.pending.take_into(out);
        if n == 0 && !out.is_empty() && !self.closed {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        Ok(n)
    }
}

/// Brotli decompression stage.
pub struct BrotliDecoder {
    reader: brotli::Decompressor<InputFeed>,
}

impl BrotliDecoder {
    pub fn new() -> Self {
        Self {
            reader: brotli::Decompressor::new(InputFeed::default(), BROTLI_BUFFER_SIZE),
        }
    }
}

impl Default for BrotliDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for BrotliDecoder {
    fn feed(&mut self, input: &[u8]) -> io::Result<()> {
        let feed = self.reader.get_mut();
        if feed.closed {
            return Err(closed_stage());
        }
        feed.pending.push(input);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.reader.get_mut().closed = true;
        Ok(())
    }

    fn pull(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match self.reader.read(out) {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            other => other,
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// A single source → [transform] → sink transfer.
pub struct StreamPipeline<R, W> {
    source: R,
    sink: W,
    transform: Option<Box<dyn Transform>>,
}

impl<R, W> StreamPipeline<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a plain copy pipeline.
    pub fn new(source: R, sink: W) -> Self {
        Self {
            source,
            sink,
            transform: None,
        }
    }

    /// Route the bytes through `transform` on their way to the sink.
    pub fn through(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Drive the transfer to completion.
    ///
    /// Returns the number of bytes written to the sink. Any failure on either
    /// end or inside the transform aborts the transfer with `IoFailure`;
    /// whatever reached the sink before that stays there.
    pub async fn run(self) -> Result<u64, ShellError> {
        let Self {
            mut source,
            mut sink,
            mut transform,
        } = self;

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut out = vec![0u8; CHUNK_SIZE];
        let mut written = 0u64;

        loop {
            let n = source.read(&mut buf).await.map_err(ShellError::IoFailure)?;
            let chunk = &buf[..n];
            match transform.as_deref_mut() {
                Some(stage) => {
                    let step = if n == 0 { stage.close() } else { stage.feed(chunk) };
                    step.map_err(ShellError::IoFailure)?;
                    written += drain(stage, &mut out, &mut sink).await?;
                }
                None => written += write_chunk(&mut sink, chunk).await?,
            }
            if n == 0 {
                break;
            }
        }

        sink.shutdown().await.map_err(ShellError::IoFailure)?;
        Ok(written)
    }
}

/// Pull everything `stage` has ready, one `out`-sized piece at a time.
async fn drain<W>(stage: &mut dyn Transform, out: &mut [u8], sink: &mut W) -> Result<u64, ShellError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    loop {
        let n = stage.pull(out).map_err(ShellError::IoFailure)?;
        if n == 0 {
            return Ok(written);
        }
        written += write_chunk(sink, &out[..n]).await?;
    }
}

async fn write_chunk<W>(sink: &mut W, bytes: &[u8]) -> Result<u64, ShellError>
where
    W: AsyncWrite + Unpin,
{
    if bytes.is_empty() {
        return Ok(0);
    }
    sink.write_all(bytes).await.map_err(ShellError::IoFailure)?;
    Ok(bytes.len() as u64)
}

// =============================================================================
// Tests
// =============================================================================
