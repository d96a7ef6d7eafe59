//! Word codec: fixed-width, big-endian encodings of every primitive.
//!
//! Every value occupies a whole number of 4-byte words. Types narrower than
//! 32 bits are widened to fill one word:
//!
//! | Type | Words | Extension |
//! |------|-------|-----------|
//! | `bool` | 1 | 0 or 1 |
//! | `char` | 1 | Unicode scalar, zero-extended |
//! | `i16` (short) | 1 | sign-extended |
//! | `u16` (unsigned short) | 1 | zero-extended |
//! | `i32` / `u32` | 1 | none |
//! | `f32` | 1 | IEEE 754 bit pattern |
//! | `i64` / `f64` | 2 | most-significant word first |
//!
//! These functions do no I/O; the backends in [`crate::buffer`] and
//! [`crate::stream`] move the resulting bytes.

use crate::error::{Error, Result};

/// Size in bytes of the atomic wire unit.
pub const WORD_SIZE: usize = 4;

/// One encoded word.
pub type Word = [u8; WORD_SIZE];

/// Two consecutive words, most-significant first.
pub type DoubleWord = [u8; 2 * WORD_SIZE];

/// Number of zero bytes needed after `len` bytes to reach a word boundary.
pub const fn padding(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}

pub fn encode_bool(v: bool) -> Word {
    encode_unsigned_int(u32::from(v))
}

/// Only 0 and 1 are valid boolean words.
pub fn decode_bool(w: Word) -> Result<bool> {
    match decode_unsigned_int(w) {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(Error::corrupt(format_args!(
            "invalid boolean encoding: {v} (must be 0 or 1)"
        ))),
    }
}

pub fn encode_char(v: char) -> Word {
    encode_unsigned_int(u32::from(v))
}

pub fn decode_char(w: Word) -> Result<char> {
    let v = decode_unsigned_int(w);
    char::from_u32(v).ok_or_else(|| Error::corrupt(format_args!("invalid char value: {v:#x}")))
}

pub fn encode_short(v: i16) -> Word {
    encode_int(i32::from(v))
}

/// Keeps the low 16 bits of the word.
pub fn decode_short(w: Word) -> i16 {
    decode_int(w) as i16
}

pub fn encode_unsigned_short(v: u16) -> Word {
    encode_unsigned_int(u32::from(v))
}

/// Keeps the low 16 bits of the word.
pub fn decode_unsigned_short(w: Word) -> u16 {
    decode_unsigned_int(w) as u16
}

pub fn encode_int(v: i32) -> Word {
    v.to_be_bytes()
}

pub fn decode_int(w: Word) -> i32 {
    i32::from_be_bytes(w)
}

pub fn encode_unsigned_int(v: u32) -> Word {
    v.to_be_bytes()
}

pub fn decode_unsigned_int(w: Word) -> u32 {
    u32::from_be_bytes(w)
}

pub fn encode_long(v: i64) -> DoubleWord {
    v.to_be_bytes()
}

pub fn decode_long(w: DoubleWord) -> i64 {
    i64::from_be_bytes(w)
}

pub fn encode_float(v: f32) -> Word {
    v.to_be_bytes()
}

pub fn decode_float(w: Word) -> f32 {
    f32::from_be_bytes(w)
}

pub fn encode_double(v: f64) -> DoubleWord {
    v.to_be_bytes()
}

pub fn decode_double(w: DoubleWord) -> f64 {
    f64::from_be_bytes(w)
}

// ── Element ────────────────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
}

/// A primitive that can appear as an array or vector element.
///
/// Sealed: the set of wire types is closed.
pub trait Element: private::Sealed + Copy {
    /// Encoded width in bytes (4 or 8).
    const WIDTH: usize;

    /// Encode into `out`, which is exactly `WIDTH` bytes long.
    fn put(self, out: &mut [u8]);

    /// Decode from `bytes`, which is exactly `WIDTH` bytes long.
    fn get(bytes: &[u8]) -> Result<Self>;
}

fn word(bytes: &[u8]) -> Word {
    let mut w = [0u8; WORD_SIZE];
    w.copy_from_slice(bytes);
    w
}

fn double_word(bytes: &[u8]) -> DoubleWord {
    let mut w = [0u8; 2 * WORD_SIZE];
    w.copy_from_slice(bytes);
    w
}

macro_rules! element {
    ($t:ty, $width:expr, $split:ident, $encode:ident, |$b:ident| $decode:expr) => {
        impl private::Sealed for $t {}

        impl Element for $t {
            const WIDTH: usize = $width;

            fn put(self, out: &mut [u8]) {
                out.copy_from_slice(&$encode(self));
            }

            fn get(bytes: &[u8]) -> Result<Self> {
                let $b = $split(bytes);
                $decode
            }
        }
    };
}

element!(bool, WORD_SIZE, word, encode_bool, |w| decode_bool(w));
element!(char, WORD_SIZE, word, encode_char, |w| decode_char(w));
element!(i16, WORD_SIZE, word, encode_short, |w| Ok(decode_short(w)));
element!(u16, WORD_SIZE, word, encode_unsigned_short, |w| Ok(
    decode_unsigned_short(w)
));
element!(i32, WORD_SIZE, word, encode_int, |w| Ok(decode_int(w)));
element!(u32, WORD_SIZE, word, encode_unsigned_int, |w| Ok(
    decode_unsigned_int(w)
));
element!(f32, WORD_SIZE, word, encode_float, |w| Ok(decode_float(w)));
element!(i64, 2 * WORD_SIZE, double_word, encode_long, |w| Ok(
    decode_long(w)
));
element!(f64, 2 * WORD_SIZE, double_word, encode_double, |w| Ok(
    decode_double(w)
));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_is_sign_extended() {
        assert_eq!(encode_short(-2), [0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(decode_short([0xFF, 0xFF, 0xFF, 0xFE]), -2);
    }

    #[test]
    fn unsigned_short_is_zero_extended() {
        assert_eq!(encode_unsigned_short(0xFFFE), [0, 0, 0xFF, 0xFE]);
        assert_eq!(decode_unsigned_short([0, 0, 0xFF, 0xFE]), 0xFFFE);
        // An unsigned short word reads back unchanged as an int.
        assert_eq!(decode_int(encode_unsigned_short(0xFFFE)), 0xFFFE);
    }

    #[test]
    fn unsigned_int_keeps_full_range() {
        let w = encode_unsigned_int(u32::MAX);
        assert_eq!(w, [0xFF; 4]);
        assert_eq!(decode_unsigned_int(w), 4_294_967_295);
        assert_eq!(decode_int(w), -1);
    }

    #[test]
    fn long_most_significant_word_first() {
        assert_eq!(
            encode_long(0x0102_0304_0506_0708),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(decode_long(encode_long(i64::MIN)), i64::MIN);
    }

    #[test]
    fn float_is_ieee_bit_pattern() {
        assert_eq!(encode_float(1.0), [0x3F, 0x80, 0, 0]);
        assert_eq!(encode_double(2.0), [0x40, 0, 0, 0, 0, 0, 0, 0]);
        let nan = decode_float(encode_float(f32::NAN));
        assert!(nan.is_nan());
    }

    #[test]
    fn bool_rejects_other_words() {
        assert!(decode_bool(encode_bool(true)).unwrap());
        assert!(!decode_bool(encode_bool(false)).unwrap());
        assert!(matches!(decode_bool([0, 0, 0, 2]), Err(Error::CorruptData(_))));
    }

    #[test]
    fn char_rejects_surrogates() {
        assert_eq!(decode_char(encode_char('f')).unwrap(), 'f');
        assert_eq!(decode_char(encode_char('я')).unwrap(), 'я');
        assert!(decode_char(encode_unsigned_int(0xD800)).is_err());
    }

    #[test]
    fn padding_to_word_boundary() {
        assert_eq!(
            [0, 1, 2, 3, 4, 5].map(padding),
            [0, 3, 2, 1, 0, 3]
        );
    }

    #[test]
    fn element_widths() {
        assert_eq!(<i16 as Element>::WIDTH, 4);
        assert_eq!(<i64 as Element>::WIDTH, 8);
        let mut out = [0u8; 8];
        2.5f64.put(&mut out);
        assert_eq!(<f64 as Element>::get(&out).unwrap(), 2.5);
    }
}
