//! Field formats and pattern validation

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Uuid,
    Url,
    /// Brazilian phone in international form, e.g. `+5511987654321`
    Phone,
    /// Eleven digits, or masked as `000.000.000-00`
    CpfShape,
    /// Fourteen digits, or masked as `00.000.000/0000-00`
    CnpjShape,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Uuid => Uuid::parse_str(value).is_ok(),
            FieldFormat::Url => Self::is_valid_url(value),
            FieldFormat::Phone => Self::is_valid_phone(value),
            FieldFormat::CpfShape => Self::is_cpf_shaped(value),
            FieldFormat::CnpjShape => Self::is_cnpj_shaped(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());
        regex.is_match(url)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        // +55, two-digit area code, 8 or 9 digit subscriber number
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\+55[1-9]{2}9?\d{8}$").unwrap());
        regex.is_match(phone)
    }

    fn is_cpf_shaped(value: &str) -> bool {
        static CPF_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = CPF_REGEX
            .get_or_init(|| Regex::new(r"^(\d{11}|\d{3}\.\d{3}\.\d{3}-\d{2})$").unwrap());
        regex.is_match(value)
    }

    fn is_cnpj_shaped(value: &str) -> bool {
        static CNPJ_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = CNPJ_REGEX
            .get_or_init(|| Regex::new(r"^(\d{14}|\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})$").unwrap());
        regex.is_match(value)
    }
}
