use serde::{de, ser};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by XDR writers and readers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fixed-size buffer has no room for the whole write
    #[error("buffer capacity exceeded (need {needed} bytes, {available} left)")]
    Capacity { needed: usize, available: usize },

    /// A read needs more bytes than the source still holds
    #[error("unexpected end of data (need {needed} bytes{})", fmt_available(.available))]
    EndOfData {
        needed: usize,
        available: Option<usize>,
    },

    /// A decoded value cannot be valid (bad length prefix, bool or char word)
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// The underlying byte channel failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An (offset, count) selection falls outside the source sequence
    #[error("range {offset}+{count} out of bounds for length {len}")]
    InvalidRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    /// A sequence is too long for a 32-bit length prefix
    #[error("length {0} does not fit a 32-bit prefix")]
    LengthOverflow(usize),

    /// A custom error message from serde
    #[error("{0}")]
    Message(String),

    /// XDR does not support this serde data model type
    #[error("XDR does not support type: {0}")]
    Unsupported(&'static str),
}

fn fmt_available(available: &Option<usize>) -> String {
    match available {
        Some(n) => format!(", {n} left"),
        None => String::new(),
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Capacity,
    EndOfData,
    CorruptData,
    Io,
    /// Caller misuse, such as a bad range or an unsupported serde shape.
    Usage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Capacity { .. } => ErrorKind::Capacity,
            Error::EndOfData { .. } => ErrorKind::EndOfData,
            Error::CorruptData(_) => ErrorKind::CorruptData,
            Error::Io(_) => ErrorKind::Io,
            Error::InvalidRange { .. }
            | Error::LengthOverflow(_)
            | Error::Message(_)
            | Error::Unsupported(_) => ErrorKind::Usage,
        }
    }

    pub(crate) fn corrupt(msg: impl fmt::Display) -> Self {
        Error::CorruptData(msg.to_string())
    }

    /// Map an I/O failure from a sequential source, turning a short read into
    /// `EndOfData`.
    pub(crate) fn from_read(err: std::io::Error, needed: usize) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::EndOfData {
                needed,
                available: None,
            }
        } else {
            Error::Io(err)
        }
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_maps_to_end_of_data() {
        let err = Error::from_read(std::io::ErrorKind::UnexpectedEof.into(), 8);
        assert!(matches!(
            err,
            Error::EndOfData {
                needed: 8,
                available: None
            }
        ));
        assert_eq!(err.kind(), ErrorKind::EndOfData);
    }

    #[test]
    fn other_io_failures_stay_io() {
        let err = Error::from_read(std::io::ErrorKind::BrokenPipe.into(), 4);
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn display_mentions_remaining_bytes() {
        let err = Error::EndOfData {
            needed: 8,
            available: Some(3),
        };
        assert_eq!(err.to_string(), "unexpected end of data (need 8 bytes, 3 left)");
        let err = Error::Capacity {
            needed: 4,
            available: 0,
        };
        assert_eq!(err.to_string(), "buffer capacity exceeded (need 4 bytes, 0 left)");
    }
}
