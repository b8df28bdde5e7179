//! Protocol module - Defines the wire encoding for Cirrus node communication
//!
//! Every value on the wire is built from one primitive, the VarInt:
//! - VarInt: 1-5 bytes, 7 payload bits per byte, high bit = continuation
//! - String: VarInt byte length + UTF-8 bytes
//! - Byte array: VarInt length + raw bytes
//! - String list: VarInt count + that many strings
//!
//! A packet is a VarInt protocol version and a VarInt packet type tag
//! followed by a variant-specific body. Outer framing (length prefix,
//! TLS, sockets) belongs to the transport layer, not this module.

mod codec;
mod cursor;
mod packet;
mod varint;

pub use codec::*;
pub use cursor::*;
pub use packet::*;
pub use varint::*;

/// Protocol version for compatibility checking
pub const PROTOCOL_VERSION: u32 = 1;
