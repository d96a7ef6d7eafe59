//! The writer/reader capability shared by every backend.
//!
//! A backend implements two or three hooks: commit a run of bytes, hand out a
//! run of bytes, report its position. Every typed operation is a provided
//! method built on those hooks, so [`BufferWriter`](crate::BufferWriter) and
//! [`StreamWriter`](crate::StreamWriter) (and their readers) expose the same
//! operations with the same wire output.
//!
//! The format carries no type tags. The Nth read must match the Nth write in
//! type and shape; a mismatch decodes to meaningless values rather than an
//! error. Encode and decode logic is normally written once against these
//! traits:
//!
//! ```rust
//! use xdr_wire::{BufferReader, BufferWriter, Result, XdrRead, XdrWrite};
//!
//! fn encode<W: XdrWrite>(w: &mut W) -> Result<()> {
//!     w.write_int(7)?;
//!     w.write_string("seven")
//! }
//!
//! fn decode<R: XdrRead>(r: &mut R) -> Result<(i32, String)> {
//!     Ok((r.read_int()?, r.read_string()?))
//! }
//!
//! let mut buf = [0u8; 16];
//! let mut w = BufferWriter::new(&mut buf);
//! encode(&mut w).unwrap();
//! assert_eq!(w.position(), 16);
//!
//! let mut r = BufferReader::new(&buf);
//! assert_eq!(decode(&mut r).unwrap(), (7, "seven".to_string()));
//! ```

use crate::array::{self, Layout, Span};
use crate::charset;
use crate::error::Result;
use crate::limits::Limits;
use crate::word::{self, DoubleWord, Element, WORD_SIZE, Word};

// ── XdrWrite ───────────────────────────────────────────────────────────────

macro_rules! write_sequences {
    ($($t:ty => $array:ident, $vector:ident;)*) => {
        $(
            #[doc = concat!("Write `[count][", stringify!($t), "]*count` for the selected part of `src`.")]
            fn $array(&mut self, src: &[$t], span: impl Into<Span>) -> Result<()> {
                write_array(self, src, span.into())
            }

            #[doc = concat!("Write the selected `", stringify!($t), "` elements of `src` without a count.")]
            fn $vector(&mut self, src: &[$t], span: impl Into<Span>) -> Result<()> {
                write_vector(self, src, span.into())
            }
        )*
    };
}

/// Sink side of an XDR session.
pub trait XdrWrite {
    /// Commit exactly `len` bytes, produced by `fill`, as one unit.
    ///
    /// `fill` receives a zeroed or scratch region of exactly `len` bytes and
    /// must overwrite all of it. If the backend cannot take `len` bytes it
    /// fails without writing any of them.
    fn put<F: FnOnce(&mut [u8])>(&mut self, len: usize, fill: F) -> Result<()>;

    /// Bytes written so far in this session.
    fn position(&self) -> usize;

    fn write_word(&mut self, w: Word) -> Result<()> {
        self.put(WORD_SIZE, |out| out.copy_from_slice(&w))
    }

    fn write_double_word(&mut self, w: DoubleWord) -> Result<()> {
        self.put(2 * WORD_SIZE, |out| out.copy_from_slice(&w))
    }

    fn write_boolean(&mut self, v: bool) -> Result<()> {
        self.write_word(word::encode_bool(v))
    }

    fn write_char(&mut self, v: char) -> Result<()> {
        self.write_word(word::encode_char(v))
    }

    fn write_short(&mut self, v: i16) -> Result<()> {
        self.write_word(word::encode_short(v))
    }

    fn write_unsigned_short(&mut self, v: u16) -> Result<()> {
        self.write_word(word::encode_unsigned_short(v))
    }

    fn write_int(&mut self, v: i32) -> Result<()> {
        self.write_word(word::encode_int(v))
    }

    fn write_unsigned_int(&mut self, v: u32) -> Result<()> {
        self.write_word(word::encode_unsigned_int(v))
    }

    fn write_long(&mut self, v: i64) -> Result<()> {
        self.write_double_word(word::encode_long(v))
    }

    fn write_float(&mut self, v: f32) -> Result<()> {
        self.write_word(word::encode_float(v))
    }

    fn write_double(&mut self, v: f64) -> Result<()> {
        self.write_double_word(word::encode_double(v))
    }

    /// Write a length prefix on its own.
    fn write_length(&mut self, len: usize) -> Result<()> {
        self.write_word(array::encode_prefix(len)?)
    }

    /// Write `[len][bytes][padding]`, one byte per char.
    ///
    /// Chars outside Latin-1 are written as `?`; see [`crate::charset`].
    fn write_string(&mut self, s: &str) -> Result<()> {
        self.write_opaque(&charset::encode(s))
    }

    /// Write variable-length opaque data: `[len][bytes][padding]`.
    fn write_opaque(&mut self, bytes: &[u8]) -> Result<()> {
        let prefix = array::encode_prefix(bytes.len())?;
        let len = array::prefixed_len(Layout::Padded, bytes.len())?;
        self.put(len, |out| array::encode_padded(prefix, bytes, out))
    }

    write_sequences! {
        bool => write_boolean_array, write_boolean_vector;
        i16 => write_short_array, write_short_vector;
        u16 => write_unsigned_short_array, write_unsigned_short_vector;
        i32 => write_int_array, write_int_vector;
        u32 => write_unsigned_int_array, write_unsigned_int_vector;
        i64 => write_long_array, write_long_vector;
        f32 => write_float_array, write_float_vector;
        f64 => write_double_array, write_double_vector;
    }
}

fn write_array<W, T>(w: &mut W, src: &[T], span: Span) -> Result<()>
where
    W: XdrWrite + ?Sized,
    T: Element,
{
    let items = span.select(src)?;
    let prefix = array::encode_prefix(items.len())?;
    let len = array::prefixed_len(Layout::of::<T>(), items.len())?;
    w.put(len, |out| array::encode_array(prefix, items, out))
}

fn write_vector<W, T>(w: &mut W, src: &[T], span: Span) -> Result<()>
where
    W: XdrWrite + ?Sized,
    T: Element,
{
    let items = span.select(src)?;
    let len = Layout::of::<T>()
        .wire_len(items.len())
        .ok_or(crate::Error::LengthOverflow(items.len()))?;
    w.put(len, |out| array::encode_vector(items, out))
}

impl<W: XdrWrite + ?Sized> XdrWrite for &mut W {
    fn put<F: FnOnce(&mut [u8])>(&mut self, len: usize, fill: F) -> Result<()> {
        (**self).put(len, fill)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

// ── XdrRead ────────────────────────────────────────────────────────────────

macro_rules! read_sequences {
    ($($t:ty => $array:ident, $vector:ident;)*) => {
        $(
            #[doc = concat!("Read a length-prefixed array of `", stringify!($t), "`.")]
            fn $array(&mut self) -> Result<Vec<$t>> {
                self.take_prefixed(Layout::of::<$t>(), array::decode_vector::<$t>)
            }

            #[doc = concat!("Fill `dst` with `dst.len()` `", stringify!($t), "` elements; no count is read.")]
            ///
            /// On failure `dst` is left unchanged.
            fn $vector(&mut self, dst: &mut [$t]) -> Result<()> {
                read_vector(self, dst)
            }
        )*
    };
}

/// Source side of an XDR session.
pub trait XdrRead {
    /// Consume exactly `len` bytes and decode them with `decode`.
    ///
    /// Fails with `EndOfData` when fewer than `len` bytes remain.
    fn take<T, F: FnOnce(&[u8]) -> Result<T>>(&mut self, len: usize, decode: F) -> Result<T>;

    /// Consume a length prefix and the payload it announces.
    ///
    /// The prefix is validated against [`XdrRead::limits`] before anything is
    /// allocated. `decode` receives the payload without trailing padding.
    fn take_prefixed<T, F: FnOnce(&[u8]) -> Result<T>>(
        &mut self,
        layout: Layout,
        decode: F,
    ) -> Result<T>;

    /// Bytes consumed so far in this session.
    fn position(&self) -> usize;

    fn limits(&self) -> &Limits;

    fn read_word(&mut self) -> Result<Word> {
        self.take(WORD_SIZE, |b| Ok(to_word(b)))
    }

    fn read_double_word(&mut self) -> Result<DoubleWord> {
        self.take(2 * WORD_SIZE, |b| {
            let mut w = [0u8; 2 * WORD_SIZE];
            w.copy_from_slice(b);
            Ok(w)
        })
    }

    fn read_boolean(&mut self) -> Result<bool> {
        self.take(WORD_SIZE, |b| word::decode_bool(to_word(b)))
    }

    fn read_char(&mut self) -> Result<char> {
        self.take(WORD_SIZE, |b| word::decode_char(to_word(b)))
    }

    fn read_short(&mut self) -> Result<i16> {
        Ok(word::decode_short(self.read_word()?))
    }

    fn read_unsigned_short(&mut self) -> Result<u16> {
        Ok(word::decode_unsigned_short(self.read_word()?))
    }

    fn read_int(&mut self) -> Result<i32> {
        Ok(word::decode_int(self.read_word()?))
    }

    fn read_unsigned_int(&mut self) -> Result<u32> {
        Ok(word::decode_unsigned_int(self.read_word()?))
    }

    fn read_long(&mut self) -> Result<i64> {
        Ok(word::decode_long(self.read_double_word()?))
    }

    fn read_float(&mut self) -> Result<f32> {
        Ok(word::decode_float(self.read_word()?))
    }

    fn read_double(&mut self) -> Result<f64> {
        Ok(word::decode_double(self.read_double_word()?))
    }

    /// Read a length prefix written by [`XdrWrite::write_length`], bounded
    /// by the array limit.
    fn read_length(&mut self) -> Result<usize> {
        let limits = *self.limits();
        self.take(WORD_SIZE, |b| {
            array::decode_prefix(to_word(b), Layout::Elements(WORD_SIZE), &limits)
        })
    }

    /// Read a string written by [`XdrWrite::write_string`].
    fn read_string(&mut self) -> Result<String> {
        self.take_prefixed(Layout::Padded, |b| Ok(charset::decode(b)))
    }

    fn read_opaque(&mut self) -> Result<Vec<u8>> {
        self.take_prefixed(Layout::Padded, |b| Ok(b.to_vec()))
    }

    read_sequences! {
        bool => read_boolean_array, read_boolean_vector;
        i16 => read_short_array, read_short_vector;
        u16 => read_unsigned_short_array, read_unsigned_short_vector;
        i32 => read_int_array, read_int_vector;
        u32 => read_unsigned_int_array, read_unsigned_int_vector;
        i64 => read_long_array, read_long_vector;
        f32 => read_float_array, read_float_vector;
        f64 => read_double_array, read_double_vector;
    }
}

fn to_word(bytes: &[u8]) -> Word {
    let mut w = [0u8; WORD_SIZE];
    w.copy_from_slice(bytes);
    w
}

fn read_vector<R, T>(r: &mut R, dst: &mut [T]) -> Result<()>
where
    R: XdrRead + ?Sized,
    T: Element,
{
    let len = Layout::of::<T>()
        .wire_len(dst.len())
        .ok_or(crate::Error::LengthOverflow(dst.len()))?;
    r.take(len, |b| array::decode_into(b, dst))
}

impl<R: XdrRead + ?Sized> XdrRead for &mut R {
    fn take<T, F: FnOnce(&[u8]) -> Result<T>>(&mut self, len: usize, decode: F) -> Result<T> {
        (**self).take(len, decode)
    }

    fn take_prefixed<T, F: FnOnce(&[u8]) -> Result<T>>(
        &mut self,
        layout: Layout,
        decode: F,
    ) -> Result<T> {
        (**self).take_prefixed(layout, decode)
    }

    fn position(&self) -> usize {
        (**self).position()
    }

    fn limits(&self) -> &Limits {
        (**self).limits()
    }
}
