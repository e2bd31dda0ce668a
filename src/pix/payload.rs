//! Static PIX payload ("Copia e Cola") encoder
//!
//! Produces a BR Code text payload: the Central Bank profile of the EMV QR
//! Code Specification for Payment Systems. Encoding is a pure function of
//! the [`PixChargeRequest`]; no clock, randomness or I/O is involved.

use super::crc::{format_crc, payload_crc};
use super::tlv::{TlvBuilder, truncate_units};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique identifier of the PIX arrangement
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Maximum characters kept from the merchant name
pub const MAX_MERCHANT_NAME_LEN: usize = 25;

/// Maximum characters kept from the merchant city
pub const MAX_MERCHANT_CITY_LEN: usize = 15;

/// Maximum characters kept from the reference label
pub const MAX_DESCRIPTION_LEN: usize = 50;

/// Longest transaction amount value, `9999999999.99`
pub const MAX_AMOUNT_LEN: usize = 13;

/// Tag + length of the CRC field, checksummed before its value is known
const CRC_PREFIX: &str = "6304";

/// Top-level and nested field identifiers, in emission order
mod tag {
    pub const PAYLOAD_FORMAT_INDICATOR: u8 = 0;
    pub const MERCHANT_ACCOUNT_INFO: u8 = 26;
    pub const MERCHANT_CATEGORY_CODE: u8 = 52;
    pub const TRANSACTION_CURRENCY: u8 = 53;
    pub const TRANSACTION_AMOUNT: u8 = 54;
    pub const COUNTRY_CODE: u8 = 58;
    pub const MERCHANT_NAME: u8 = 59;
    pub const MERCHANT_CITY: u8 = 60;
    pub const ADDITIONAL_DATA: u8 = 62;

    pub const ACCOUNT_GUI: u8 = 0;
    pub const ACCOUNT_KEY: u8 = 1;
    pub const REFERENCE_LABEL: u8 = 5;
}

/// Everything needed to encode one PIX charge
///
/// The merchant fields come from configuration; the amount and description
/// come from the checkout being paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixChargeRequest {
    /// Key registered with the receiving bank (e-mail, phone, CPF/CNPJ or random key)
    pub merchant_pix_key: String,

    /// Payee display name
    pub merchant_name: String,

    /// Payee city
    pub merchant_city: String,

    /// Non-negative finite amount in BRL
    pub transaction_amount: f64,

    /// Free-text reference shown to the payer
    pub description: String,
}

impl PixChargeRequest {
    /// Encode this request into a BR Code payload
    pub fn encode(&self) -> PixPayload {
        encode(
            &self.merchant_pix_key,
            &self.merchant_name,
            &self.merchant_city,
            self.transaction_amount,
            &self.description,
        )
    }
}

/// Encoded BR Code payload
///
/// No whitespace, terminated by the CRC field. Plain ASCII for ASCII input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PixPayload(String);

impl PixPayload {
    /// The payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the payload text
    pub fn into_string(self) -> String {
        self.0
    }

    /// The trailing 4 hex digits of the CRC field
    pub fn checksum(&self) -> &str {
        let split = self.0.len().saturating_sub(4);
        &self.0[split..]
    }

    /// Recompute the CRC over everything before the checksum digits and
    /// compare it with the digits carried in the payload
    pub fn has_valid_checksum(&self) -> bool {
        let split = self.0.len().saturating_sub(4);
        let (body, carried) = self.0.split_at(split);
        body.ends_with(CRC_PREFIX) && format_crc(payload_crc(body)) == carried
    }
}

impl fmt::Display for PixPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PixPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PixPayload> for String {
    fn from(payload: PixPayload) -> Self {
        payload.0
    }
}

/// Encode a static PIX charge
///
/// Name and city are upper-cased then truncated; the description is only
/// truncated. Empty strings still emit their field with length `00`.
///
/// Never fails. The amount should pass [`is_encodable_amount`] and the key
/// should be at most [`MAX_PIX_KEY_LEN`](super::key::MAX_PIX_KEY_LEN) long;
/// past those bounds the payload is still well-formed with a valid checksum,
/// but over-long values are cut.
pub fn encode(
    pix_key: &str,
    merchant_name: &str,
    merchant_city: &str,
    amount: f64,
    description: &str,
) -> PixPayload {
    let name = merchant_name.to_uppercase();
    let name = truncate_units(&name, MAX_MERCHANT_NAME_LEN);
    let city = merchant_city.to_uppercase();
    let city = truncate_units(&city, MAX_MERCHANT_CITY_LEN);
    let description = truncate_units(description, MAX_DESCRIPTION_LEN);

    let body = TlvBuilder::new()
        .field(tag::PAYLOAD_FORMAT_INDICATOR, "01")
        .template(tag::MERCHANT_ACCOUNT_INFO, |t| {
            t.field(tag::ACCOUNT_GUI, PIX_GUI)
                .field(tag::ACCOUNT_KEY, pix_key)
        })
        .field(tag::MERCHANT_CATEGORY_CODE, "0000")
        .field(tag::TRANSACTION_CURRENCY, "986")
        .field(tag::TRANSACTION_AMOUNT, &format_amount(amount))
        .field(tag::COUNTRY_CODE, "BR")
        .field(tag::MERCHANT_NAME, name)
        .field(tag::MERCHANT_CITY, city)
        .template(tag::ADDITIONAL_DATA, |t| {
            t.field(tag::REFERENCE_LABEL, description)
        })
        .raw(CRC_PREFIX)
        .finish();

    let crc = format_crc(payload_crc(&body));
    PixPayload(body + &crc)
}

/// Render an amount with exactly two fraction digits and a `.` separator
///
/// `{:.2}` never switches to scientific notation and ignores locale.
/// Negative zero is folded into zero.
pub fn format_amount(amount: f64) -> String {
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2}", amount)
}

/// Whether `amount` fits the transaction amount field
///
/// Non-negative, finite, and at most [`MAX_AMOUNT_LEN`] characters once
/// formatted.
pub fn is_encodable_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0 && format_amount(amount).len() <= MAX_AMOUNT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(290.0), "290.00");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(1e7), "10000000.00");
    }

    #[test]
    fn test_encodable_amount_bounds() {
        assert!(is_encodable_amount(0.0));
        assert!(is_encodable_amount(290.0));
        assert!(is_encodable_amount(9_999_999_999.99));
        assert!(!is_encodable_amount(10_000_000_000.0));
        assert!(!is_encodable_amount(-0.01));
        assert!(!is_encodable_amount(f64::NAN));
        assert!(!is_encodable_amount(f64::INFINITY));
    }

    #[test]
    fn test_huge_amount_stays_well_formed() {
        let payload = encode("k@x.com", "L", "C", 1e100, "d");
        let text = payload.as_str();
        assert!(text.contains("5499"));
        assert!(text.contains("5802BR5901L6001C62050501d6304"));
        assert!(payload.has_valid_checksum());
    }

    #[test]
    fn test_payload_starts_with_format_indicator() {
        let payload = encode("k", "n", "c", 1.0, "d");
        assert!(payload.as_str().starts_with("000201"));
    }

    #[test]
    fn test_checksum_accessor() {
        let payload = encode("pix@example.com", "LOJA", "SAO PAULO", 10.0, "x");
        assert_eq!(payload.checksum().len(), 4);
        assert!(payload.has_valid_checksum());
    }

    #[test]
    fn test_tampered_payload_fails_checksum() {
        let payload = encode("pix@example.com", "LOJA", "SAO PAULO", 10.0, "x");
        let tampered = PixPayload(payload.as_str().replace("10.00", "90.00"));
        assert!(!tampered.has_valid_checksum());
    }

    #[test]
    fn test_request_encode_matches_free_function() {
        let request = PixChargeRequest {
            merchant_pix_key: "pix@example.com".to_string(),
            merchant_name: "Loja".to_string(),
            merchant_city: "Sao Paulo".to_string(),
            transaction_amount: 12.5,
            description: "Caçamba".to_string(),
        };
        assert_eq!(
            request.encode(),
            encode("pix@example.com", "Loja", "Sao Paulo", 12.5, "Caçamba")
        );
    }
}
