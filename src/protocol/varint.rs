//! VarInt primitive
//!
//! A VarInt carries an unsigned 32-bit value in 1-5 bytes. Each byte
//! holds 7 payload bits with the high bit set when more bytes follow;
//! groups are ordered least-significant first. Encoding is canonical:
//! the minimal number of groups, never a padding group.

use super::{ByteCursor, CodecError, CodecResult};

/// Maximum encoded length of a VarInt. A 6th continuation group would
/// overflow 32 bits and is rejected as malformed.
pub const MAX_VARINT_LEN: usize = 5;

/// Write `value` as a VarInt. Always succeeds; emits 1-5 bytes.
pub fn write_varint(cursor: &mut ByteCursor, mut value: u32) {
    while value & !0x7F != 0 {
        cursor.write_byte((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    cursor.write_byte(value as u8);
}

/// Read a VarInt, consuming 1-5 bytes.
///
/// The loop bound is explicit: a continuation bit on the 5th group means
/// the sender encoded more than 32 bits, and the decode fails with
/// [`CodecError::MalformedVarint`] rather than reading on.
pub fn read_varint(cursor: &mut ByteCursor) -> CodecResult<u32> {
    let mut value: u32 = 0;

    for group in 0..MAX_VARINT_LEN {
        let byte = cursor.read_byte()?;
        value |= u32::from(byte & 0x7F) << (group * 7);

        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(CodecError::MalformedVarint)
}

/// Number of bytes `write_varint` will emit for `value`.
pub fn varint_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0xFFF_FFFF => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u32) -> Vec<u8> {
        let mut cursor = ByteCursor::new();
        write_varint(&mut cursor, value);
        cursor.as_slice().to_vec()
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_decode_known() {
        let mut cursor = ByteCursor::from_slice(&[0xAC, 0x02]);
        assert_eq!(read_varint(&mut cursor).unwrap(), 300);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_roundtrip_boundaries() {
        // Group boundaries: each value where the encoded length changes.
        let values = [
            0,
            1,
            127,
            128,
            16_383,
            16_384,
            2_097_151,
            2_097_152,
            268_435_455,
            268_435_456,
            u32::MAX,
        ];
        for &value in &values {
            let mut cursor = ByteCursor::new();
            write_varint(&mut cursor, value);
            assert_eq!(cursor.written(), varint_len(value), "length for {value}");
            assert_eq!(read_varint(&mut cursor).unwrap(), value, "roundtrip for {value}");
        }
    }

    #[test]
    fn test_canonical_minimal_length() {
        assert_eq!(varint_len(127), 1);
        assert_eq!(varint_len(128), 2);
        assert_eq!(varint_len(16_383), 2);
        assert_eq!(varint_len(16_384), 3);
        assert_eq!(varint_len(u32::MAX), 5);
    }

    #[test]
    fn test_overflow_rejected() {
        // Five continuation groups followed by a sixth byte.
        let mut cursor = ByteCursor::from_slice(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        match read_varint(&mut cursor) {
            Err(CodecError::MalformedVarint) => {}
            other => panic!("expected MalformedVarint, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_input() {
        // Continuation bit set but no further bytes.
        let mut cursor = ByteCursor::from_slice(&[0x80]);
        match read_varint(&mut cursor) {
            Err(CodecError::Truncated { .. }) => {}
            other => panic!("expected Truncated, got {other:?}"),
        }
    }
}
