//! PIX BR Code generation
//!
//! - [`tlv`]: Tag-Length-Value builder
//! - [`crc`]: CRC-16/CCITT-FALSE checksum
//! - [`payload`]: the static payload encoder
//! - [`key`]: PIX key classification for configuration checks

pub mod crc;
pub mod key;
pub mod payload;
pub mod tlv;

pub use crc::{crc16_ccitt_false, payload_crc};
pub use key::{PixKeyKind, check_key};
pub use payload::{
    PixChargeRequest, PixPayload, encode, format_amount, is_encodable_amount,
};
