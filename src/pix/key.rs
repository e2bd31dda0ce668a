//! PIX key classification
//!
//! The encoder writes the key verbatim; classification only serves
//! configuration checks so a mistyped key is caught at startup.

use super::payload::PIX_GUI;
use super::tlv::{MAX_VALUE_LEN, encoded_len};
use crate::core::field::FieldFormat;
use serde::{Deserialize, Serialize};

/// Longest key that still fits the merchant account template
///
/// The template carries the GUI field (4 + 14 chars) and the key field
/// header (4 chars) inside a two-digit length.
pub const MAX_PIX_KEY_LEN: usize = MAX_VALUE_LEN - (4 + PIX_GUI.len()) - 4;

/// Kinds of key the PIX directory accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixKeyKind {
    Email,
    Phone,
    Cpf,
    Cnpj,
    /// Random key (EVP), a UUID issued by the bank
    Random,
}

impl PixKeyKind {
    /// Classify a key by its shape
    ///
    /// Returns `None` when the key matches no known kind.
    pub fn classify(key: &str) -> Option<Self> {
        if FieldFormat::Phone.validate(key) {
            Some(PixKeyKind::Phone)
        } else if FieldFormat::Email.validate(key) {
            Some(PixKeyKind::Email)
        } else if FieldFormat::Uuid.validate(key) {
            Some(PixKeyKind::Random)
        } else if FieldFormat::CpfShape.validate(key) {
            Some(PixKeyKind::Cpf)
        } else if FieldFormat::CnpjShape.validate(key) {
            Some(PixKeyKind::Cnpj)
        } else {
            None
        }
    }
}

/// Check that a key can be encoded
///
/// Returns a human-readable reason when it cannot.
pub fn check_key(key: &str) -> Result<PixKeyKind, String> {
    if key.trim().is_empty() {
        return Err("PIX key is empty".to_string());
    }

    let len = encoded_len(key);
    if len > MAX_PIX_KEY_LEN {
        return Err(format!(
            "PIX key is {} characters, at most {} fit the merchant account field",
            len, MAX_PIX_KEY_LEN
        ));
    }

    PixKeyKind::classify(key).ok_or_else(|| format!("'{}' is not a recognised PIX key", key))
}
