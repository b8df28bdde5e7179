//! Byte cursor over a growable buffer
//!
//! A [`ByteCursor`] pairs independent read and write positions over one
//! buffer. The codec only ever advances them; it never seeks backward.
//! Reads past the end fail with a typed error instead of panicking, so
//! a truncated or malicious peer buffer can never take the process down.

use bytes::{BufMut, BytesMut};

use super::{CodecError, CodecResult};

/// Read/write cursor over an in-memory byte buffer.
///
/// Writes append to the end of the buffer; reads consume from the front,
/// tracked by a separate position. One cursor serves one message - cursors
/// are not shared across threads, and a cursor whose read failed must be
/// discarded because its position is no longer meaningful.
#[derive(Debug, Default, Clone)]
pub struct ByteCursor {
    buf: BytesMut,
    read_pos: usize,
}

impl ByteCursor {
    /// Create an empty cursor for encoding.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
            read_pos: 0,
        }
    }

    /// Create a cursor over a received buffer, ready for decoding.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(bytes),
            read_pos: 0,
        }
    }

    /// Read a single byte, advancing the read position.
    pub fn read_byte(&mut self) -> CodecResult<u8> {
        let byte = *self
            .buf
            .get(self.read_pos)
            .ok_or(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            })?;
        self.read_pos += 1;
        Ok(byte)
    }

    /// Read exactly `count` bytes, advancing the read position.
    pub fn read_bytes(&mut self, count: usize) -> CodecResult<&[u8]> {
        if self.remaining() < count {
            return Err(CodecError::Truncated {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let start = self.read_pos;
        self.read_pos += count;
        Ok(&self.buf[start..self.read_pos])
    }

    /// Append a single byte, advancing the write position.
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.put_u8(byte);
    }

    /// Append a byte slice, advancing the write position.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Unread bytes between the read and write positions.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.read_pos
    }

    /// Total bytes written so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }

    /// The full buffer contents, independent of the read position.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}
