//! Buffer backend: a writer/reader pair over a caller-owned byte region.
//!
//! Capacity is fixed at construction. Operations never block and never do
//! I/O; a write that does not fit fails with `Capacity` and a failed read
//! leaves the cursor where it was.

use crate::array::{self, Layout};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::traits::{XdrRead, XdrWrite};
use crate::word::WORD_SIZE;

// ── BufferWriter ───────────────────────────────────────────────────────────

/// Writes XDR into a fixed `&mut [u8]`.
///
/// ```rust
/// use xdr_wire::{BufferWriter, Error, XdrWrite};
///
/// let mut frame = [0u8; 8];
/// let mut w = BufferWriter::new(&mut frame);
/// w.write_long(155).unwrap();
/// assert!(matches!(w.write_int(1), Err(Error::Capacity { needed: 4, available: 0 })));
/// assert_eq!(w.written(), [0, 0, 0, 0, 0, 0, 0, 155]);
/// ```
#[derive(Debug)]
pub struct BufferWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        BufferWriter { buf, pos: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes encoded so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// End the session, returning the encoded prefix of the region.
    pub fn into_written(self) -> &'a [u8] {
        let buf: &'a [u8] = self.buf;
        &buf[..self.pos]
    }
}

impl XdrWrite for BufferWriter<'_> {
    fn put<F: FnOnce(&mut [u8])>(&mut self, len: usize, fill: F) -> Result<()> {
        let available = self.remaining();
        if len > available {
            return Err(Error::Capacity {
                needed: len,
                available,
            });
        }
        let end = self.pos + len;
        fill(&mut self.buf[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

// ── BufferReader ───────────────────────────────────────────────────────────

/// Reads XDR from a byte slice, maintaining a cursor position.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    input: &'a [u8],
    pos: usize,
    limits: Limits,
}

impl<'a> BufferReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_limits(input, Limits::default())
    }

    pub fn with_limits(input: &'a [u8], limits: Limits) -> Self {
        BufferReader {
            input,
            pos: 0,
            limits,
        }
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// The unread portion of the input.
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    fn end_of_data(&self, needed: usize) -> Error {
        Error::EndOfData {
            needed,
            available: Some(self.remaining()),
        }
    }
}

impl XdrRead for BufferReader<'_> {
    fn take<T, F: FnOnce(&[u8]) -> Result<T>>(&mut self, len: usize, decode: F) -> Result<T> {
        if len > self.remaining() {
            return Err(self.end_of_data(len));
        }
        let end = self.pos + len;
        let value = decode(&self.input[self.pos..end])?;
        self.pos = end;
        Ok(value)
    }

    fn take_prefixed<T, F: FnOnce(&[u8]) -> Result<T>>(
        &mut self,
        layout: Layout,
        decode: F,
    ) -> Result<T> {
        let rest = self.rest();
        if rest.len() < WORD_SIZE {
            return Err(self.end_of_data(WORD_SIZE));
        }
        let (head, body) = rest.split_at(WORD_SIZE);
        let mut prefix = [0u8; WORD_SIZE];
        prefix.copy_from_slice(head);

        let count = array::decode_prefix(prefix, layout, &self.limits)?;
        let payload_len = layout
            .wire_len(count)
            .ok_or_else(|| Error::corrupt(format_args!("length prefix {count} overflows")))?;
        if payload_len > body.len() {
            tracing::warn!(
                prefix = count,
                needed = payload_len,
                available = body.len(),
                "length prefix runs past end of buffer"
            );
            return Err(self.end_of_data(WORD_SIZE + payload_len));
        }

        let value = decode(layout.data(count, &body[..payload_len]))?;
        self.pos += WORD_SIZE + payload_len;
        Ok(value)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn limits(&self) -> &Limits {
        &self.limits
    }
}
