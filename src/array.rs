//! Array and vector codec.
//!
//! ```text
//! array:   [u32 count][T]*count
//! vector:  [T]*count                 count agreed out of band
//! string:  [u32 len][len bytes][0-3 zero bytes]
//! ```
//!
//! Helpers here build the complete byte run of an operation so a backend can
//! commit it in one step, and validate length prefixes before anything is
//! allocated.

use std::ops::{Range, RangeFrom, RangeFull};

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::word::{self, Element, WORD_SIZE, padding};

// ── Span ───────────────────────────────────────────────────────────────────

/// Selects a contiguous sub-range of a source sequence.
///
/// `count: None` means "through the end of the source".
///
/// ```rust
/// use xdr_wire::Span;
///
/// let src = [1, 2, 3];
/// assert_eq!(Span::new(1, 2).select(&src).unwrap(), &[2, 3]);
/// assert_eq!(Span::from(..).select(&src).unwrap(), &[1, 2, 3]);
/// assert!(Span::new(2, 5).select(&src).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub count: Option<usize>,
    /// Built from a range whose end precedes its start; never selects.
    reversed: bool,
}

impl Span {
    /// The whole source.
    pub const ALL: Span = Span::from_offset(0);

    pub const fn new(offset: usize, count: usize) -> Self {
        Span {
            offset,
            count: Some(count),
            reversed: false,
        }
    }

    pub const fn from_offset(offset: usize) -> Self {
        Span {
            offset,
            count: None,
            reversed: false,
        }
    }

    /// Borrow the selected part of `src`.
    pub fn select<T>(self, src: &[T]) -> Result<&[T]> {
        let len = src.len();
        if self.reversed {
            return Err(Error::InvalidRange {
                offset: self.offset,
                count: 0,
                len,
            });
        }
        let count = self.count.unwrap_or(len.saturating_sub(self.offset));
        match self.offset.checked_add(count) {
            Some(end) if self.offset <= len && end <= len => Ok(&src[self.offset..end]),
            _ => Err(Error::InvalidRange {
                offset: self.offset,
                count,
                len,
            }),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        match r.end.checked_sub(r.start) {
            Some(count) => Span::new(r.start, count),
            None => Span {
                offset: r.start,
                count: Some(0),
                reversed: true,
            },
        }
    }
}

impl From<RangeFrom<usize>> for Span {
    fn from(r: RangeFrom<usize>) -> Self {
        Span::from_offset(r.start)
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::ALL
    }
}

// ── Layout ─────────────────────────────────────────────────────────────────

/// Shape of the payload that follows a length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `count` elements of the given byte width.
    Elements(usize),
    /// `count` raw bytes followed by zero padding to a word boundary.
    Padded,
}

impl Layout {
    pub fn of<T: Element>() -> Self {
        Layout::Elements(T::WIDTH)
    }

    /// Payload size on the wire for `count` items, excluding the prefix.
    pub fn wire_len(self, count: usize) -> Option<usize> {
        match self {
            Layout::Elements(width) => count.checked_mul(width),
            Layout::Padded => count.checked_add(padding(count)),
        }
    }

    /// Largest count a reader accepts for this layout.
    pub fn limit(self, limits: &Limits) -> usize {
        match self {
            Layout::Elements(_) => limits.max_array_len,
            Layout::Padded => limits.max_string_len,
        }
    }

    /// Payload bytes carrying data, dropping any trailing padding.
    pub fn data<'a>(self, count: usize, payload: &'a [u8]) -> &'a [u8] {
        match self {
            Layout::Elements(_) => payload,
            Layout::Padded => &payload[..count],
        }
    }
}

// ── Prefix ─────────────────────────────────────────────────────────────────

pub(crate) fn encode_prefix(len: usize) -> Result<word::Word> {
    let n = i32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;
    Ok(word::encode_int(n))
}

/// Validate a decoded length prefix against `limits`.
///
/// Lengths are unsigned on the wire, but a prefix with the top bit set can
/// only come from corruption: no reader could allocate it.
pub(crate) fn decode_prefix(w: word::Word, layout: Layout, limits: &Limits) -> Result<usize> {
    let raw = word::decode_int(w);
    let Ok(count) = usize::try_from(raw) else {
        tracing::warn!(prefix = raw, "rejecting negative length prefix");
        return Err(Error::corrupt(format_args!("negative length prefix {raw}")));
    };
    let max = layout.limit(limits);
    if count > max {
        tracing::warn!(prefix = count, max, "rejecting oversized length prefix");
        return Err(Error::corrupt(format_args!(
            "length prefix {count} exceeds limit {max}"
        )));
    }
    Ok(count)
}

/// Total wire size of a prefixed payload, prefix included.
pub(crate) fn prefixed_len(layout: Layout, count: usize) -> Result<usize> {
    layout
        .wire_len(count)
        .and_then(|n| n.checked_add(WORD_SIZE))
        .ok_or(Error::LengthOverflow(count))
}

// ── Encoding ───────────────────────────────────────────────────────────────

/// Encode `items` back to back into `out` (`items.len() * T::WIDTH` bytes).
pub(crate) fn encode_vector<T: Element>(items: &[T], out: &mut [u8]) {
    for (item, chunk) in items.iter().zip(out.chunks_exact_mut(T::WIDTH)) {
        item.put(chunk);
    }
}

/// Encode `[count][items]` into `out`.
pub(crate) fn encode_array<T: Element>(prefix: word::Word, items: &[T], out: &mut [u8]) {
    let (head, body) = out.split_at_mut(WORD_SIZE);
    head.copy_from_slice(&prefix);
    encode_vector(items, body);
}

/// Encode `[len][bytes][padding]` into `out`.
pub(crate) fn encode_padded(prefix: word::Word, bytes: &[u8], out: &mut [u8]) {
    let (head, body) = out.split_at_mut(WORD_SIZE);
    head.copy_from_slice(&prefix);
    let (data, pad) = body.split_at_mut(bytes.len());
    data.copy_from_slice(bytes);
    pad.fill(0);
}

// ── Decoding ───────────────────────────────────────────────────────────────

/// Decode every `T::WIDTH` chunk of `bytes`.
pub(crate) fn decode_vector<T: Element>(bytes: &[u8]) -> Result<Vec<T>> {
    bytes.chunks_exact(T::WIDTH).map(T::get).collect()
}

/// Decode into `dst`, leaving it untouched if any element is invalid.
pub(crate) fn decode_into<T: Element>(bytes: &[u8], dst: &mut [T]) -> Result<()> {
    let decoded = decode_vector::<T>(bytes)?;
    dst.copy_from_slice(&decoded);
    Ok(())
}
