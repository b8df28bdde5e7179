//! Composed wire codecs
//!
//! Strings, byte arrays and string lists all follow one pattern: write
//! the length or count as a VarInt, then that many raw units. Every
//! read path checks the declared length against a cap before allocating,
//! so a corrupt or hostile length prefix cannot trigger an unbounded
//! allocation.

use std::string::FromUtf8Error;
use thiserror::Error;

use super::{read_varint, write_varint, ByteCursor};

/// Default cap on any single decoded length or count (10 MB). Callers
/// with a configured maximum message size use the `*_bounded` variants
/// to impose a tighter cap.
pub const MAX_WIRE_LEN: usize = 10 * 1024 * 1024;

/// Decode-side caps applied to peer-declared lengths before allocation.
/// The default allows anything up to [`MAX_WIRE_LEN`]; tighter caps come
/// from the node configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLimits {
    /// Maximum decoded string length in bytes
    pub max_string_len: usize,
    /// Maximum decoded byte-array length
    pub max_array_len: usize,
    /// Maximum string-list element count
    pub max_list_len: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_string_len: MAX_WIRE_LEN,
            max_array_len: MAX_WIRE_LEN,
            max_list_len: MAX_WIRE_LEN,
        }
    }
}

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("VarInt exceeds 5 bytes")]
    MalformedVarint,

    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Declared length {declared} exceeds limit {max}")]
    LengthLimitExceeded { declared: usize, max: usize },

    #[error("Unknown packet type: {0:#x}")]
    UnknownPacketType(u32),

    #[error("Malformed packet: {0}")]
    MalformedPacket(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

fn check_limit(declared: usize, max: usize) -> CodecResult<()> {
    if declared > max {
        return Err(CodecError::LengthLimitExceeded { declared, max });
    }
    Ok(())
}

/// Write a string as a VarInt byte length followed by its UTF-8 bytes.
/// Length prefixes are 32-bit on the wire; larger payloads are a caller
/// bug, checked in debug builds.
pub fn write_string(cursor: &mut ByteCursor, value: &str) {
    debug_assert!(
        u32::try_from(value.len()).is_ok(),
        "string length exceeds the 32-bit wire prefix"
    );
    write_varint(cursor, value.len() as u32);
    cursor.write_bytes(value.as_bytes());
}

/// Read a length-prefixed UTF-8 string.
pub fn read_string(cursor: &mut ByteCursor) -> CodecResult<String> {
    read_string_bounded(cursor, MAX_WIRE_LEN)
}

/// Read a length-prefixed UTF-8 string, rejecting declared lengths
/// above `max` before any allocation.
pub fn read_string_bounded(cursor: &mut ByteCursor, max: usize) -> CodecResult<String> {
    let len = read_varint(cursor)? as usize;
    check_limit(len, max)?;
    let bytes = cursor.read_bytes(len)?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Write a byte array as a VarInt length followed by the raw bytes.
pub fn write_array(cursor: &mut ByteCursor, array: &[u8]) {
    debug_assert!(
        u32::try_from(array.len()).is_ok(),
        "array length exceeds the 32-bit wire prefix"
    );
    write_varint(cursor, array.len() as u32);
    cursor.write_bytes(array);
}

/// Read a length-prefixed byte array.
pub fn read_array(cursor: &mut ByteCursor) -> CodecResult<Vec<u8>> {
    read_array_bounded(cursor, MAX_WIRE_LEN)
}

/// Read a length-prefixed byte array with an explicit length cap.
pub fn read_array_bounded(cursor: &mut ByteCursor, max: usize) -> CodecResult<Vec<u8>> {
    let len = read_varint(cursor)? as usize;
    check_limit(len, max)?;
    Ok(cursor.read_bytes(len)?.to_vec())
}

/// Write a list of strings as a VarInt count followed by each string.
/// Element order is preserved on the wire.
pub fn write_string_list(cursor: &mut ByteCursor, list: &[String]) {
    debug_assert!(
        u32::try_from(list.len()).is_ok(),
        "list count exceeds the 32-bit wire prefix"
    );
    write_varint(cursor, list.len() as u32);
    for value in list {
        write_string(cursor, value);
    }
}

/// Read a count-prefixed list of strings in wire order.
pub fn read_string_list(cursor: &mut ByteCursor) -> CodecResult<Vec<String>> {
    read_string_list_bounded(cursor, &WireLimits::default())
}

/// Read a count-prefixed string list. The count is capped by
/// `max_list_len` and each element by `max_string_len`.
pub fn read_string_list_bounded(
    cursor: &mut ByteCursor,
    limits: &WireLimits,
) -> CodecResult<Vec<String>> {
    let count = read_varint(cursor)? as usize;
    check_limit(count, limits.max_list_len)?;
    let mut list = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        list.push(read_string_bounded(cursor, limits.max_string_len)?);
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_known_encoding() {
        let mut cursor = ByteCursor::new();
        write_string(&mut cursor, "hi");
        assert_eq!(cursor.as_slice(), &[0x02, 0x68, 0x69]);
        assert_eq!(read_string(&mut cursor).unwrap(), "hi");
    }

    #[test]
    fn test_empty_string() {
        let mut cursor = ByteCursor::new();
        write_string(&mut cursor, "");
        assert_eq!(cursor.as_slice(), &[0x00]);
        assert_eq!(read_string(&mut cursor).unwrap(), "");
    }

    #[test]
    fn test_multibyte_string_roundtrip() {
        let mut cursor = ByteCursor::new();
        write_string(&mut cursor, "grüß dich 日本");
        assert_eq!(read_string(&mut cursor).unwrap(), "grüß dich 日本");
    }

    #[test]
    fn test_string_truncated() {
        // Declares 5 bytes, supplies 2.
        let mut cursor = ByteCursor::from_slice(&[0x05, 0x68, 0x69]);
        match read_string(&mut cursor) {
            Err(CodecError::Truncated { needed, remaining }) => {
                assert_eq!(needed, 5);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn test_string_invalid_utf8() {
        let mut cursor = ByteCursor::from_slice(&[0x02, 0xFF, 0xFE]);
        match read_string(&mut cursor) {
            Err(CodecError::InvalidUtf8(_)) => {}
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[test]
    fn test_string_length_limit() {
        let mut cursor = ByteCursor::new();
        write_string(&mut cursor, "too long for the cap");
        match read_string_bounded(&mut cursor, 4) {
            Err(CodecError::LengthLimitExceeded { declared, max }) => {
                assert_eq!(declared, 20);
                assert_eq!(max, 4);
            }
            other => panic!("expected LengthLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_array_roundtrip() {
        let payload = vec![0x00, 0xFF, 0x7F, 0x80];
        let mut cursor = ByteCursor::new();
        write_array(&mut cursor, &payload);
        assert_eq!(read_array(&mut cursor).unwrap(), payload);
    }

    #[test]
    fn test_empty_array() {
        let mut cursor = ByteCursor::new();
        write_array(&mut cursor, &[]);
        assert_eq!(cursor.as_slice(), &[0x00]);
        assert!(read_array(&mut cursor).unwrap().is_empty());
    }

    #[test]
    fn test_array_length_limit() {
        // Declared length is huge; no matching payload needed, the cap
        // must reject it before any read.
        let mut cursor = ByteCursor::new();
        write_varint(&mut cursor, 1 << 30);
        match read_array_bounded(&mut cursor, 1024) {
            Err(CodecError::LengthLimitExceeded { .. }) => {}
            other => panic!("expected LengthLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_string_list_known_encoding() {
        let list = vec!["a".to_string(), "bb".to_string()];
        let mut cursor = ByteCursor::new();
        write_string_list(&mut cursor, &list);
        assert_eq!(cursor.as_slice(), &[0x02, 0x01, 0x61, 0x02, 0x62, 0x62]);
        assert_eq!(read_string_list(&mut cursor).unwrap(), list);
    }

    #[test]
    fn test_string_list_preserves_order() {
        let list: Vec<String> = ["delta", "alpha", "charlie", "", "alpha"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut cursor = ByteCursor::new();
        write_string_list(&mut cursor, &list);
        assert_eq!(read_string_list(&mut cursor).unwrap(), list);
    }

    #[test]
    fn test_empty_list() {
        let mut cursor = ByteCursor::new();
        write_string_list(&mut cursor, &[]);
        assert_eq!(cursor.as_slice(), &[0x00]);
        assert!(read_string_list(&mut cursor).unwrap().is_empty());
    }

    #[test]
    fn test_list_count_limit() {
        let limits = WireLimits {
            max_list_len: 10,
            ..Default::default()
        };
        let mut cursor = ByteCursor::new();
        write_varint(&mut cursor, 100);
        match read_string_list_bounded(&mut cursor, &limits) {
            Err(CodecError::LengthLimitExceeded { declared, max }) => {
                assert_eq!(declared, 100);
                assert_eq!(max, 10);
            }
            other => panic!("expected LengthLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_list_element_limit() {
        let limits = WireLimits {
            max_string_len: 2,
            ..Default::default()
        };
        let list = vec!["ok".to_string(), "too long".to_string()];
        let mut cursor = ByteCursor::new();
        write_string_list(&mut cursor, &list);
        match read_string_list_bounded(&mut cursor, &limits) {
            Err(CodecError::LengthLimitExceeded { declared, max }) => {
                assert_eq!(declared, 8);
                assert_eq!(max, 2);
            }
            other => panic!("expected LengthLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_list_truncated_element() {
        // Count says two strings, only one present.
        let mut cursor = ByteCursor::from_slice(&[0x02, 0x01, 0x61]);
        match read_string_list(&mut cursor) {
            Err(CodecError::Truncated { .. }) => {}
            other => panic!("expected Truncated, got {other:?}"),
        }
    }
}
