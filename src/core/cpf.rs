//! CPF (Cadastro de Pessoas Físicas) handling
//!
//! Payers identify themselves with a CPF at checkout. Input arrives either
//! masked (`000.000.000-00`) or as bare digits; both normalise to the same
//! [`Cpf`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const CPF_LEN: usize = 11;

/// A CPF whose check digits have been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_LEN]);

/// Reasons a CPF is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    #[error("CPF must have 11 digits, got {0}")]
    WrongLength(usize),

    #[error("CPF with all digits equal is not valid")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    BadCheckDigits,
}

impl Cpf {
    /// Parse a CPF, ignoring every non-digit character
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits: Vec<u8> = input
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();

        let digits: [u8; CPF_LEN] = digits
            .as_slice()
            .try_into()
            .map_err(|_| CpfError::WrongLength(digits.len()))?;

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }

        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(CpfError::BadCheckDigits);
        }

        Ok(Self(digits))
    }

    /// The 11 digits without punctuation
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }

    /// Masked form: `000.000.000-00`
    pub fn formatted(&self) -> String {
        let d = self.digits();
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }

    /// Form safe for logs: only the last two digits are shown
    pub fn redacted(&self) -> String {
        let d = self.digits();
        format!("***.***.***-{}", &d[9..11])
    }
}

/// Mod-11 check digit over the leading digits
///
/// Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (weight_start - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        r => r as u8,
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Cpf::parse(&raw).map_err(serde::de::Error::custom)
    }
}
