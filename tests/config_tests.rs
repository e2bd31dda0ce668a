//! Tests for configuration loading
//!
//! These tests verify that:
//! - YAML files load with defaults for missing sections
//! - Parse failures carry the offending file name
//! - Environment overrides are applied before validation

use cacamba::config::{StoreConfig, env};
use cacamba::core::error::ConfigError;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod file_loading_tests {
    use super::*;

    #[test]
    fn test_full_file_loads() {
        let file = write_yaml(
            r#"
server:
  bind: "0.0.0.0:8080"
  public_base_url: "https://cacambas.example.com"
merchant:
  pix_key: "12345678000195"
  name: "Caçambas Zona Sul"
  city: "Santo Andre"
admin:
  password: "segredo"
  session_ttl_minutes: 60
checkout:
  max_quantity: 5
  qr_image_size: 300
"#,
        );

        let config = StoreConfig::from_yaml_file(file.path()).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.merchant.pix_key, "12345678000195");
        assert_eq!(config.merchant.city, "Santo Andre");
        assert_eq!(config.admin.password.as_deref(), Some("segredo"));
        assert_eq!(config.admin.session_ttl_minutes, 60);
        assert_eq!(config.checkout.max_quantity, 5);
        assert_eq!(config.checkout.qr_image_size, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = write_yaml("merchant:\n  pix_key: \"loja@example.com\"\n");

        let config = StoreConfig::from_yaml_file(file.path()).unwrap();

        assert_eq!(config.merchant.name, "CACAMBAS DE ENTULHOS");
        assert_eq!(config.merchant.city, "SAO PAULO");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.checkout.max_quantity, 50);
        assert!(config.admin.password.is_none());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let file = write_yaml("merchant: [unclosed\n");

        let err = StoreConfig::from_yaml_file(file.path()).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().expect("ConfigError");

        match config_err {
            ConfigError::ParseError { file: name, .. } => {
                assert_eq!(name.as_deref(), Some(file.path().display().to_string().as_str()));
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(StoreConfig::from_yaml_file(&path).is_err());
    }

    #[test]
    fn test_load_validates_file_contents() {
        let file = write_yaml("merchant:\n  pix_key: \"loja@example.com\"\nserver:\n  bind: \"nope\"\n");

        let err = StoreConfig::load(Some(file.path())).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidValue { key, .. }) if key == "server.bind"
        ));
    }

    #[test]
    fn test_load_accepts_valid_file() {
        let file = write_yaml(
            "merchant:\n  pix_key: \"loja@example.com\"\nadmin:\n  password: \"x\"\n",
        );

        let config = StoreConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.merchant.pix_key, "loja@example.com");
    }
}

mod env_override_tests {
    use super::*;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let file = write_yaml(
            "merchant:\n  pix_key: \"arquivo@example.com\"\n  name: \"Loja Arquivo\"\n",
        );

        let config = StoreConfig::from_yaml_file(file.path())
            .unwrap()
            .apply_env_overrides(lookup(&[
                (env::PIX_KEY, "+5511999998888"),
                (env::ADMIN_PASSWORD, "do-ambiente"),
                (env::PUBLIC_BASE_URL, "https://loja.example.com"),
            ]));

        assert_eq!(config.merchant.pix_key, "+5511999998888");
        assert_eq!(config.merchant.name, "Loja Arquivo");
        assert_eq!(config.admin.password.as_deref(), Some("do-ambiente"));
        assert_eq!(config.server.public_base_url, "https://loja.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = StoreConfig::default_config().apply_env_overrides(lookup(&[
            (env::MERCHANT_CITY, "   "),
            (env::BIND, ""),
        ]));

        assert_eq!(config.merchant.city, "SAO PAULO");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_env_can_supply_missing_pix_key() {
        let config = StoreConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingValue { .. })
        ));

        let config = config.apply_env_overrides(lookup(&[(env::PIX_KEY, "loja@example.com")]));
        assert!(config.validate().is_ok());
    }
}
