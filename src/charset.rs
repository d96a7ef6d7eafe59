//! Single-byte string encoding used by `write_string` / `read_string`.
//!
//! Strings travel as ISO-8859-1 (Latin-1): U+0000..=U+00FF map to the byte of
//! the same value. Any other char is written as `?`, so text outside Latin-1
//! does not survive a round trip. Decoding is total.

/// Byte written in place of a char outside Latin-1.
pub const REPLACEMENT: u8 = b'?';

/// Encode `s` one byte per char.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Decode Latin-1 bytes.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Encoded length of `s` in bytes.
pub fn encoded_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_survives() {
        let s = "caf\u{e9} \u{ff}";
        assert_eq!(encode(s), [b'c', b'a', b'f', 0xE9, b' ', 0xFF]);
        assert_eq!(decode(&encode(s)), s);
    }

    #[test]
    fn wide_chars_are_replaced() {
        assert_eq!(decode(&encode("ok тест")), "ok ????");
        assert_eq!(encoded_len("тест"), 4);
    }
}
