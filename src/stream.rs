//! Sequential backend: a writer/reader pair over `std::io` channels.
//!
//! The cursor lives in the channel. Operations may block on the underlying
//! sink or source and fail with `Io` when it does; after an I/O failure the
//! session should be released. Each session owns its scratch buffer.

use std::io::{self, BufReader, BufWriter, Read, Write};

use crate::array::{self, Layout};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::traits::{XdrRead, XdrWrite};
use crate::word::WORD_SIZE;

// ── StreamWriter ───────────────────────────────────────────────────────────

/// Writes XDR into any `W: Write`, e.g. a `TcpStream` or `File`.
///
/// Output is buffered. [`StreamWriter::finish`] flushes and returns the sink;
/// dropping the writer flushes on a best-effort basis.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    inner: BufWriter<W>,
    scratch: Vec<u8>,
    pos: usize,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        tracing::trace!("XDR stream writer opened");
        StreamWriter {
            inner: BufWriter::new(sink),
            scratch: Vec::new(),
            pos: 0,
        }
    }

    /// Run one encode session over `sink`.
    ///
    /// The writer is released on every exit path. On success the sink comes
    /// back flushed. If `f` fails, whatever was written is still flushed
    /// (best-effort), the sink is dropped and the error from `f` is returned.
    ///
    /// ```rust
    /// use xdr_wire::{StreamWriter, XdrWrite};
    ///
    /// let (_, bytes) = StreamWriter::session(Vec::new(), |w| w.write_boolean(true)).unwrap();
    /// assert_eq!(bytes, [0, 0, 0, 1]);
    /// ```
    pub fn session<T, F>(sink: W, f: F) -> Result<(T, W)>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut writer = Self::new(sink);
        match f(&mut writer) {
            Ok(value) => Ok((value, writer.finish()?)),
            Err(err) => {
                tracing::debug!(error = %err, written = writer.pos, "XDR write session failed");
                if let Err(flush_err) = writer.flush() {
                    tracing::debug!(error = %flush_err, "flush after failed session also failed");
                }
                Err(err)
            }
        }
    }

    /// Flush buffered output to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Flush and release the writer, returning the sink.
    pub fn finish(self) -> Result<W> {
        let written = self.pos;
        let sink = self
            .inner
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))?;
        tracing::debug!(written, "XDR stream writer finished");
        Ok(sink)
    }
}

impl<W: Write> XdrWrite for StreamWriter<W> {
    fn put<F: FnOnce(&mut [u8])>(&mut self, len: usize, fill: F) -> Result<()> {
        self.scratch.clear();
        self.scratch.resize(len, 0);
        fill(&mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        self.pos += len;
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

// ── StreamReader ───────────────────────────────────────────────────────────

/// Reads XDR from any `R: Read`.
///
/// Prefixed payloads are read incrementally, so a corrupt length prefix that
/// passes the [`Limits`] check still allocates no more than the source
/// actually delivers.
#[derive(Debug)]
pub struct StreamReader<R: Read> {
    inner: BufReader<R>,
    scratch: Vec<u8>,
    pos: usize,
    limits: Limits,
}

impl<R: Read> StreamReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_limits(source, Limits::default())
    }

    pub fn with_limits(source: R, limits: Limits) -> Self {
        tracing::trace!(?limits, "XDR stream reader opened");
        StreamReader {
            inner: BufReader::new(source),
            scratch: Vec::new(),
            pos: 0,
            limits,
        }
    }

    /// Run one decode session over `source`, releasing it afterwards.
    pub fn session<T, F>(source: R, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        Self::session_with_limits(source, Limits::default(), f)
    }

    /// [`StreamReader::session`] with custom prefix bounds.
    ///
    /// The source is dropped before this returns, whether `f` succeeds or not.
    pub fn session_with_limits<T, F>(source: R, limits: Limits, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut reader = Self::with_limits(source, limits);
        let result = f(&mut reader);
        tracing::debug!(consumed = reader.pos, ok = result.is_ok(), "XDR read session closed");
        result
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Release the reader, returning the source.
    ///
    /// Bytes already pulled into the read buffer are discarded.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Fill `scratch` with exactly `len` bytes, growing it only as data arrives.
    fn fill_scratch(&mut self, len: usize) -> Result<()> {
        self.scratch.clear();
        let got = io::Read::take(&mut self.inner, len as u64)
            .read_to_end(&mut self.scratch)
            .map_err(|err| Error::from_read(err, len))?;
        if got < len {
            return Err(Error::EndOfData {
                needed: len,
                available: Some(got),
            });
        }
        self.pos += len;
        Ok(())
    }
}

impl<R: Read> XdrRead for StreamReader<R> {
    fn take<T, F: FnOnce(&[u8]) -> Result<T>>(&mut self, len: usize, decode: F) -> Result<T> {
        self.fill_scratch(len)?;
        decode(&self.scratch)
    }

    fn take_prefixed<T, F: FnOnce(&[u8]) -> Result<T>>(
        &mut self,
        layout: Layout,
        decode: F,
    ) -> Result<T> {
        let mut prefix = [0u8; WORD_SIZE];
        self.inner
            .read_exact(&mut prefix)
            .map_err(|err| Error::from_read(err, WORD_SIZE))?;
        self.pos += WORD_SIZE;

        let count = array::decode_prefix(prefix, layout, &self.limits)?;
        let payload_len = layout
            .wire_len(count)
            .ok_or_else(|| Error::corrupt(format_args!("length prefix {count} overflows")))?;
        self.fill_scratch(payload_len)?;
        decode(layout.data(count, &self.scratch))
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn limits(&self) -> &Limits {
        &self.limits
    }
}
