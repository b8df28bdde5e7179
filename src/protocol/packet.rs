//! Packet definitions
//!
//! A packet travels as two VarInt tags - protocol version and packet
//! type - followed by a variant-specific body. The packet type keys a
//! closed set of variants; decoding dispatches on it and an unknown tag
//! is a decode error, not a silently skipped body. Equality, hashing
//! and debug formatting are structural per variant.
//!
//! The concrete catalog here is intentionally small: enough for the
//! handshake path and the node console. Version/type compatibility
//! policy (which versions may carry which types) is the dispatcher's
//! call, not enforced here.

use super::{
    read_array_bounded, read_string_bounded, read_string_list_bounded, read_varint, write_array,
    write_string, write_string_list, write_varint, ByteCursor, CodecError, CodecResult, WireLimits,
};

/// The two wire tags preceding every packet body. Plain data; neither
/// field is validated against the other at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketHeader {
    /// Wire-format revision the sender used
    pub protocol_version: u32,
    /// Tag identifying the body variant, used for dispatch
    pub packet_type: u32,
}

impl PacketHeader {
    pub fn write(&self, cursor: &mut ByteCursor) {
        write_varint(cursor, self.protocol_version);
        write_varint(cursor, self.packet_type);
    }

    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        Ok(Self {
            protocol_version: read_varint(cursor)?,
            packet_type: read_varint(cursor)?,
        })
    }
}

/// All packet variants, keyed by their wire type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Packet {
    /// First packet from a connecting node
    Handshake {
        node_name: String,
        groups: Vec<String>,
    },

    /// Authentication token following the handshake
    AuthToken { token: Vec<u8> },

    /// A line of console output forwarded between nodes
    ConsoleText { line: String },

    /// Graceful disconnect
    Disconnect { reason: String },
}

impl Packet {
    /// Get the wire type tag for this variant
    pub fn packet_type(&self) -> u32 {
        match self {
            Packet::Handshake { .. } => 0x01,
            Packet::AuthToken { .. } => 0x02,
            Packet::ConsoleText { .. } => 0x10,
            Packet::Disconnect { .. } => 0xFE,
        }
    }

    /// Serialize the body only; the header is written by [`Frame::write`].
    pub fn write_body(&self, cursor: &mut ByteCursor) {
        match self {
            Packet::Handshake { node_name, groups } => {
                write_string(cursor, node_name);
                write_string_list(cursor, groups);
            }
            Packet::AuthToken { token } => {
                write_array(cursor, token);
            }
            Packet::ConsoleText { line } => {
                write_string(cursor, line);
            }
            Packet::Disconnect { reason } => {
                write_string(cursor, reason);
            }
        }
    }

    /// Parse the body for `packet_type`, returning a fully populated
    /// value. There is no partially-constructed state to observe.
    pub fn read_body(packet_type: u32, cursor: &mut ByteCursor) -> CodecResult<Self> {
        Self::read_body_bounded(packet_type, cursor, &WireLimits::default())
    }

    /// Parse the body with the given decode limits; every peer-declared
    /// length is checked against them before allocation.
    pub fn read_body_bounded(
        packet_type: u32,
        cursor: &mut ByteCursor,
        limits: &WireLimits,
    ) -> CodecResult<Self> {
        match packet_type {
            0x01 => {
                let node_name = read_string_bounded(cursor, limits.max_string_len)?;
                if node_name.is_empty() {
                    return Err(CodecError::MalformedPacket(
                        "handshake with empty node name".into(),
                    ));
                }
                let groups = read_string_list_bounded(cursor, limits)?;
                Ok(Packet::Handshake { node_name, groups })
            }
            0x02 => Ok(Packet::AuthToken {
                token: read_array_bounded(cursor, limits.max_array_len)?,
            }),
            0x10 => Ok(Packet::ConsoleText {
                line: read_string_bounded(cursor, limits.max_string_len)?,
            }),
            0xFE => Ok(Packet::Disconnect {
                reason: read_string_bounded(cursor, limits.max_string_len)?,
            }),
            other => Err(CodecError::UnknownPacketType(other)),
        }
    }
}

/// A packet together with the protocol version it was sent under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub protocol_version: u32,
    pub packet: Packet,
}

impl Frame {
    pub fn new(protocol_version: u32, packet: Packet) -> Self {
        Self {
            protocol_version,
            packet,
        }
    }

    /// Serialize header tags then body.
    pub fn write(&self, cursor: &mut ByteCursor) {
        let header = PacketHeader {
            protocol_version: self.protocol_version,
            packet_type: self.packet.packet_type(),
        };
        header.write(cursor);
        self.packet.write_body(cursor);
    }

    /// Read header tags, dispatch on the type tag, parse the body.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        Self::read_bounded(cursor, &WireLimits::default())
    }

    /// Read with configured decode limits applied to the body.
    pub fn read_bounded(cursor: &mut ByteCursor, limits: &WireLimits) -> CodecResult<Self> {
        let header = PacketHeader::read(cursor)?;
        let packet = Packet::read_body_bounded(header.packet_type, cursor, limits)?;
        Ok(Self {
            protocol_version: header.protocol_version,
            packet,
        })
    }
}
