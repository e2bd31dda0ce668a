//! Tag-Length-Value builder for EMV QRCPS payloads
//!
//! Every field is written as `<2-digit tag><2-digit length><value>`. The
//! builder derives the length from the value so callers never do length
//! arithmetic by hand, including for nested templates.
//!
//! Lengths are measured in UTF-16 code units, the same unit the checksum
//! walks (see [`payload_crc`](super::crc::payload_crc)).

use std::fmt::Write;

/// Largest value a two-digit length field can describe
pub const MAX_VALUE_LEN: usize = 99;

/// Length of `value` as a BR Code field counts it
pub fn encoded_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Longest prefix of `value` that is at most `max` code units long
///
/// Cuts on character boundaries and borrows when nothing is cut.
pub fn truncate_units(value: &str, max: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > max {
            return &value[..idx];
        }
    }
    value
}

/// Incremental TLV writer
///
/// # Example
///
/// ```rust
/// use cacamba::pix::tlv::TlvBuilder;
///
/// let payload = TlvBuilder::new()
///     .field(0, "01")
///     .template(62, |t| t.field(5, "***"))
///     .finish();
///
/// assert_eq!(payload, "00020162070503***");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TlvBuilder {
    buf: String,
}

impl TlvBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Append a primitive field
    ///
    /// Values longer than [`MAX_VALUE_LEN`] code units are cut to fit, so
    /// the output always stays well-formed TLV.
    pub fn field(mut self, tag: u8, value: &str) -> Self {
        debug_assert!(tag < 100, "tag {} does not fit two digits", tag);
        let value = truncate_units(value, MAX_VALUE_LEN);

        // Writing into a String cannot fail
        let _ = write!(self.buf, "{:02}{:02}{}", tag, encoded_len(value), value);
        self
    }

    /// Append a template: a field whose value is itself a TLV sequence
    pub fn template(self, tag: u8, build: impl FnOnce(TlvBuilder) -> TlvBuilder) -> Self {
        let nested = build(TlvBuilder::new()).finish();
        self.field(tag, &nested)
    }

    /// Append already-encoded text verbatim
    ///
    /// Used for the CRC trailer, whose tag and length are part of the
    /// checksummed bytes while its value is not yet known.
    pub fn raw(mut self, text: &str) -> Self {
        self.buf.push_str(text);
        self
    }

    /// View the bytes written so far
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the builder and return the encoded text
    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lengths_are_padded() {
        let out = TlvBuilder::new().field(0, "01").field(58, "BR").finish();
        assert_eq!(out, "0002015802BR");
    }

    #[test]
    fn test_empty_value_keeps_field() {
        let out = TlvBuilder::new().field(59, "").finish();
        assert_eq!(out, "5900");
    }

    #[test]
    fn test_template_length_covers_nested_fields() {
        let out = TlvBuilder::new()
            .template(26, |t| t.field(0, "br.gov.bcb.pix").field(1, "abc"))
            .finish();
        // 0014br.gov.bcb.pix = 18 chars, 0103abc = 7 chars
        assert_eq!(out, "26250014br.gov.bcb.pix0103abc");
    }

    #[test]
    fn test_length_counts_code_units() {
        let out = TlvBuilder::new().field(59, "JOÃO").finish();
        assert_eq!(out, "5904JOÃO");

        // Outside the BMP a character takes two units
        let out = TlvBuilder::new().field(5, "a😀").finish();
        assert_eq!(out, "0503a😀");
    }

    #[test]
    fn test_oversized_value_is_cut_to_fit() {
        let long = "9".repeat(150);
        let out = TlvBuilder::new().field(54, &long).finish();
        assert_eq!(out, format!("5499{}", "9".repeat(99)));
    }

    #[test]
    fn test_truncate_units() {
        assert_eq!(truncate_units("SAO PAULO", 15), "SAO PAULO");
        assert_eq!(truncate_units("", 15), "");
        assert_eq!(truncate_units("CAÇAMBA", 3), "CAÇ");
        // Never splits a surrogate pair
        assert_eq!(truncate_units("ab😀", 3), "ab");
        assert_eq!(encoded_len("ab😀"), 4);
    }

    #[test]
    fn test_raw_is_appended_verbatim() {
        let builder = TlvBuilder::new().field(0, "01").raw("6304");
        assert_eq!(builder.as_str(), "0002016304");
    }
}
