//! CRC-16/CCITT-FALSE checksum used by the BR Code `63` field

/// Initial register value
const INIT: u16 = 0xFFFF;

/// Generator polynomial (x^16 + x^12 + x^5 + 1)
const POLY: u16 = 0x1021;

/// Compute CRC-16/CCITT-FALSE over a byte slice
///
/// No input/output reflection and no final XOR mask.
pub fn crc16_ccitt_false(bytes: &[u8]) -> u16 {
    bytes.iter().fold(INIT, |crc, &byte| update(crc, byte))
}

/// Checksum of payload text, one step per UTF-16 code unit
///
/// Each unit contributes its low byte, so ASCII text gives the same value as
/// [`crc16_ccitt_false`] over its bytes and Latin-1 letters such as `ç`
/// count once. This is the unit BR Code lengths are measured in.
pub fn payload_crc(text: &str) -> u16 {
    text.encode_utf16()
        .fold(INIT, |crc, unit| update(crc, (unit & 0xFF) as u8))
}

fn update(mut crc: u16, byte: u8) -> u16 {
    crc ^= u16::from(byte) << 8;
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// Render a checksum the way the `63` field carries it: 4 uppercase hex digits
pub fn format_crc(crc: u16) -> String {
    format!("{:04X}", crc)
}
