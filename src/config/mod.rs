//! Configuration loading and management
//!
//! Configuration is read once at startup (YAML file, then environment
//! overrides), validated, and passed explicitly to the services that need
//! it. Business logic never reads the environment.

use crate::core::error::ConfigError;
use crate::core::field::FieldFormat;
use crate::pix::key::MAX_PIX_KEY_LEN;
use crate::pix::tlv::encoded_len;
use crate::pix::{PixChargeRequest, check_key};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variables consulted by [`StoreConfig::apply_env_overrides`]
pub mod env {
    pub const PIX_KEY: &str = "CACAMBA_PIX_KEY";
    pub const MERCHANT_NAME: &str = "CACAMBA_MERCHANT_NAME";
    pub const MERCHANT_CITY: &str = "CACAMBA_MERCHANT_CITY";
    pub const ADMIN_PASSWORD: &str = "CACAMBA_ADMIN_PASSWORD";
    pub const BIND: &str = "CACAMBA_BIND";
    pub const PUBLIC_BASE_URL: &str = "CACAMBA_PUBLIC_BASE_URL";
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,

    /// Base URL used when building shareable product links
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Identity of the payee encoded into every PIX charge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantConfig {
    /// PIX key registered with the receiving bank
    pub pix_key: String,

    /// Payee display name
    pub name: String,

    /// Payee city
    pub city: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            pix_key: String::new(),
            name: "CACAMBAS DE ENTULHOS".to_string(),
            city: "SAO PAULO".to_string(),
        }
    }
}

impl MerchantConfig {
    /// Build the charge request for an amount and reference label
    pub fn charge(&self, amount: f64, description: &str) -> PixChargeRequest {
        PixChargeRequest {
            merchant_pix_key: self.pix_key.clone(),
            merchant_name: self.name.clone(),
            merchant_city: self.city.clone(),
            transaction_amount: amount,
            description: description.to_string(),
        }
    }
}

/// Admin panel settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared admin password; the admin panel is disabled when absent
    pub password: Option<String>,

    /// Lifetime of an admin session
    pub session_ttl_minutes: i64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: None,
            session_ttl_minutes: 8 * 60,
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

/// Checkout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Largest quantity accepted for one order
    pub max_quantity: u32,

    /// External service rendering a string as a QR image
    pub qr_image_base_url: String,

    /// Side of the rendered QR image, in pixels
    pub qr_image_size: u32,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            max_quantity: 50,
            qr_image_base_url: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            qr_image_size: 250,
        }
    }
}

/// Complete storefront configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub server: ServerConfig,
    pub merchant: MerchantConfig,
    pub admin: AdminConfig,
    pub checkout: CheckoutConfig,
}

impl StoreConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::ParseError {
                file: None,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Overlay values from a variable lookup (normally the process environment)
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env::PIX_KEY) {
            self.merchant.pix_key = v;
        }
        if let Some(v) = get(env::MERCHANT_NAME) {
            self.merchant.name = v;
        }
        if let Some(v) = get(env::MERCHANT_CITY) {
            self.merchant.city = v;
        }
        if let Some(v) = get(env::ADMIN_PASSWORD) {
            self.admin.password = Some(v);
        }
        if let Some(v) = get(env::BIND) {
            self.server.bind = v;
        }
        if let Some(v) = get(env::PUBLIC_BASE_URL) {
            self.server.public_base_url = v;
        }

        self
    }

    /// Load from an optional file, apply process environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can run a storefront
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merchant.pix_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                key: "merchant.pix_key".to_string(),
            });
        }

        if let Err(message) = check_key(&self.merchant.pix_key) {
            if encoded_len(&self.merchant.pix_key) > MAX_PIX_KEY_LEN {
                return Err(ConfigError::InvalidValue {
                    key: "merchant.pix_key".to_string(),
                    message,
                });
            }
            // Banks may issue key formats we don't know; the encoder takes any string
            tracing::warn!(reason = %message, "unrecognised PIX key kind");
        }

        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                message: e.to_string(),
            })?;

        for (key, url) in [
            ("server.public_base_url", &self.server.public_base_url),
            ("checkout.qr_image_base_url", &self.checkout.qr_image_base_url),
        ] {
            if !FieldFormat::Url.validate(url) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("'{}' is not an http(s) URL", url),
                });
            }
        }

        if self.checkout.max_quantity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "checkout.max_quantity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.admin.session_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "admin.session_ttl_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if self.admin.password.is_none() {
            tracing::warn!("admin password not configured; admin panel disabled");
        }

        Ok(())
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.bind.parse()?)
    }

    /// Configuration for tests and local development
    pub fn default_config() -> Self {
        let mut config = Self::default();
        config.merchant.pix_key = "suachavepix@email.com".to_string();
        config.admin.password = Some("admin".to_string());
        config
    }
}
