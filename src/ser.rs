//! serde serializer over the [`XdrWrite`] capability (RFC 4506 shapes).
//!
//! The [`Serializer`] is generic over any backend, so the same value encodes
//! identically into a fixed buffer (`to_slice`) or a stream (`to_writer`).
//!
//! ## Wire format summary
//! - bool, i8/i16/i32, u8/u16/u32, f32, char: one word
//! - i64, u64, f64: two words
//! - str / bytes: 4-byte length + bytes + 0–3 zero-padding bytes (UTF-8 for str)
//! - seq / map: 4-byte count + elements
//! - tuple / struct: fields back to back, no prefix
//! - Option: bool discriminant + optional value
//! - enum: 4-byte variant index + fields

use crate::buffer::BufferWriter;
use crate::error::{Error, Result};
use crate::stream::StreamWriter;
use crate::traits::XdrWrite;
use serde::ser::{self, Serialize};
use std::io::Write;

// ── Public entry points ────────────────────────────────────────────────────

/// Serialize `value` into a freshly allocated `Vec<u8>` of XDR bytes.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    to_writer(Vec::new(), value)
}

/// Serialize `value` into `sink`, flushing it, and hand the sink back.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(sink: W, value: &T) -> Result<W> {
    let (_, sink) = StreamWriter::session(sink, |w| value.serialize(&mut Serializer::new(w)))?;
    Ok(sink)
}

/// Serialize `value` into the fixed region `buf`, returning the bytes used.
///
/// Fails with `Capacity` if the encoding does not fit.
pub fn to_slice<T: Serialize + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let mut ser = Serializer::new(BufferWriter::new(buf));
    value.serialize(&mut ser)?;
    Ok(ser.into_inner().position())
}

// ── Serializer ─────────────────────────────────────────────────────────────

/// The XDR serializer. Generic over any [`XdrWrite`] backend.
///
/// ```rust
/// use serde::Serialize;
/// use xdr_wire::{BufferWriter, Serializer};
///
/// let mut buf = [0u8; 4];
/// let mut ser = Serializer::new(BufferWriter::new(&mut buf));
/// 42u32.serialize(&mut ser).unwrap();
/// assert_eq!(buf, [0, 0, 0, 42]);
/// ```
pub struct Serializer<W> {
    writer: W,
}

impl<W: XdrWrite> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Serializer { writer }
    }

    /// Consume the serializer and return the backend.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_len(&mut self, len: Option<usize>) -> Result<()> {
        let len = len.ok_or(Error::Unsupported(
            "sequence of unknown length (XDR requires a count prefix)",
        ))?;
        self.writer.write_length(len)
    }
}

impl<W: XdrWrite> ser::Serializer for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.write_boolean(v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.writer.write_short(i16::from(v))
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        self.writer.write_short(v)
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.writer.write_int(v)
    }
    fn serialize_i64(self, v: i64) -> Result<()> {
        self.writer.write_long(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.write_unsigned_short(u16::from(v))
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.write_unsigned_short(v)
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.write_unsigned_int(v)
    }
    /// Unsigned hyper: same two words as the bit-identical `i64`.
    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.write_double_word(v.to_be_bytes())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.writer.write_float(v)
    }
    fn serialize_f64(self, v: f64) -> Result<()> {
        self.writer.write_double(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.writer.write_char(v)
    }

    /// UTF-8 bytes as variable-length opaque, so any Rust string round-trips.
    fn serialize_str(self, v: &str) -> Result<()> {
        self.writer.write_opaque(v.as_bytes())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.write_opaque(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.writer.write_boolean(false)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        self.writer.write_boolean(true)?;
        value.serialize(self)
    }

    /// XDR void: 0 bytes
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        self.writer.write_unsigned_int(variant_index)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.writer.write_unsigned_int(variant_index)?;
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.write_len(len)?;
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.writer.write_unsigned_int(variant_index)?;
        Ok(self)
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        self.write_len(len)?;
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.writer.write_unsigned_int(variant_index)?;
        Ok(self)
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── Compound serializer impls ──────────────────────────────────────────────

macro_rules! compound {
    ($t:ident :: $method:ident) => {
        impl<W: XdrWrite> ser::$t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn $method<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
    ($t:ident :: $method:ident, named) => {
        impl<W: XdrWrite> ser::$t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn $method<T: Serialize + ?Sized>(
                &mut self,
                _key: &'static str,
                value: &T,
            ) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

compound!(SerializeSeq::serialize_element);
compound!(SerializeTuple::serialize_element);
compound!(SerializeTupleStruct::serialize_field);
compound!(SerializeTupleVariant::serialize_field);
compound!(SerializeStruct::serialize_field, named);
compound!(SerializeStructVariant::serialize_field, named);

impl<W: XdrWrite> ser::SerializeMap for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        key.serialize(&mut **self)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}
