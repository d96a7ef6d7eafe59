//! # xdr-wire
//!
//! Writer/reader pairs for an XDR-style (eXternal Data Representation) wire
//! format: big-endian, every item a whole number of 4-byte words, and no type
//! information beyond the length prefixes of arrays and strings.
//!
//! ## Backends
//!
//! | Backend | Writer | Reader | Failure modes |
//! |---------|--------|--------|---------------|
//! | Fixed buffer | [`BufferWriter`] | [`BufferReader`] | `Capacity`, `EndOfData`, `CorruptData` |
//! | Byte stream | [`StreamWriter`] | [`StreamReader`] | the above (minus `Capacity`) plus `Io` |
//!
//! Both implement [`XdrWrite`] / [`XdrRead`], one method per wire type, so
//! encode and decode logic is written once and runs over either backend.
//!
//! ## Wire layout
//!
//! | Operation | Encoding |
//! |-----------|----------|
//! | `boolean`, `char`, `short`, `unsigned_short`, `int`, `unsigned_int` | 1 word, sign- or zero-extended |
//! | `long`, `double` | 2 words, most-significant first |
//! | `float` | 1 word, IEEE 754 |
//! | `*_array` | 4-byte count + elements |
//! | `*_vector` | elements only; the count is agreed out of band |
//! | `string` | 4-byte length + Latin-1 bytes + 0–3 zero-padding bytes |
//! | `opaque` | 4-byte length + bytes + 0–3 zero-padding bytes |
//!
//! A session is strictly ordered: the Nth read must match the Nth write in
//! type and shape. A mismatch is not detected and yields meaningless values.
//!
//! ## Example
//!
//! ```rust
//! use xdr_wire::{BufferReader, BufferWriter, Span, XdrRead, XdrWrite};
//!
//! let mut frame = [0u8; 64];
//! let mut w = BufferWriter::new(&mut frame);
//! w.write_int(1).unwrap();
//! w.write_int_array(&[1, 2, 3], Span::new(1, 2)).unwrap();
//! w.write_unsigned_short_vector(&[47, 49, 51], ..).unwrap();
//! let len = w.position();
//!
//! let mut r = BufferReader::new(&frame[..len]);
//! assert_eq!(r.read_int().unwrap(), 1);
//! assert_eq!(r.read_int_array().unwrap(), [2, 3]);
//! let mut ids = [0i32; 3];
//! r.read_int_vector(&mut ids).unwrap();
//! assert_eq!(ids, [47, 49, 51]);
//! ```
//!
//! ## serde
//!
//! [`to_bytes`], [`to_writer`], [`to_slice`], [`from_bytes`] and
//! [`from_reader`] map serde types onto the same capability, following
//! RFC 4506 for structs, options, enums, sequences and maps.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use xdr_wire::{from_bytes, to_bytes};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct FileHandle {
//!     inode: u64,
//!     generation: u32,
//!     flags: u32,
//! }
//!
//! let fh = FileHandle { inode: 0x0102030405060708, generation: 42, flags: 0 };
//! let bytes = to_bytes(&fh).unwrap();
//! assert_eq!(bytes.len(), 16);
//! assert_eq!(fh, from_bytes::<FileHandle>(&bytes).unwrap());
//! ```

pub mod array;
pub mod buffer;
pub mod charset;
pub mod de;
pub mod error;
pub mod limits;
pub mod ser;
pub mod stream;
pub mod traits;
pub mod word;

pub use array::{Layout, Span};
pub use buffer::{BufferReader, BufferWriter};
pub use de::{Deserializer, from_bytes, from_bytes_partial, from_reader};
pub use error::{Error, ErrorKind, Result};
pub use limits::Limits;
pub use ser::{Serializer, to_bytes, to_slice, to_writer};
pub use stream::{StreamReader, StreamWriter};
pub use traits::{XdrRead, XdrWrite};

pub use serde::{Deserialize, Serialize};
