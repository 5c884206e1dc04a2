use std::str;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// Accepted values for `api.mode`.
pub const MODE_READ_WRITE: &str = "readwrite";
pub const MODE_READ_ONLY: &str = "readonly";

/// API credentials, loaded once at configuration time and never mutated.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Api {
    #[validate(length(min = 1))]
    pub login: String,
    /// PEM private key text; may carry stray whitespace from copy-pasting.
    /// Normalized by [`crate::key::normalize_private_key`] before use.
    #[validate(length(min = 1))]
    pub private_key: String,
    /// Endpoint hostname, e.g. `api.vps.example`. Also signed into every
    /// request as `__hostname`.
    #[validate(length(min = 1))]
    pub endpoint: String,
    #[validate(length(min = 1))]
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub api: Api,
}

impl Settings {
    /// Load settings from the embedded `vps-api.toml`, with environment
    /// overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when the TOML is invalid or a
    /// required field is missing or empty.
    pub fn new() -> Result<Self, Report<ApiError>> {
        let toml_bytes = include_bytes!("../../../vps-api.toml");
        let toml_str = str::from_utf8(toml_bytes).change_context(ApiError::Configuration {
            message: "embedded vps-api.toml is not valid UTF-8".to_string(),
        })?;

        Self::from_toml(toml_str)
    }

    /// Parse settings from a TOML string.
    ///
    /// Environment variables prefixed with `VPS_API` override file values,
    /// e.g. `VPS_API__API__LOGIN` overrides `api.login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for invalid TOML, missing fields,
    /// empty values, or an unrecognized `api.mode`.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<ApiError>> {
        let environment = Environment::default().prefix("VPS_API").separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(ApiError::Configuration {
                message: "failed to read configuration".to_string(),
            })?;

        let settings: Settings =
            config
                .try_deserialize()
                .change_context(ApiError::Configuration {
                    message: "configuration is missing required fields".to_string(),
                })?;

        settings
            .validate()
            .change_context(ApiError::Configuration {
                message: "configuration validation failed".to_string(),
            })?;

        if settings.api.mode != MODE_READ_WRITE && settings.api.mode != MODE_READ_ONLY {
            return Err(Report::new(ApiError::Configuration {
                message: format!(
                    "api.mode must be '{}' or '{}', got '{}'",
                    MODE_READ_WRITE, MODE_READ_ONLY, settings.api.mode
                ),
            }));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::tests::test_settings_str;

    #[test]
    fn test_settings_new() {
        let settings = Settings::new();
        assert!(settings.is_ok(), "Settings should load from embedded TOML");

        let settings = settings.unwrap();
        assert!(!settings.api.login.is_empty());
        assert!(!settings.api.private_key.is_empty());
        assert!(!settings.api.endpoint.is_empty());
        assert!(!settings.api.mode.is_empty());
    }

    #[test]
    fn test_settings_from_valid_toml() {
        // Guard against env overrides leaking in from concurrent tests.
        temp_env::with_var_unset("VPS_API__API__LOGIN", || {
            let settings = Settings::from_toml(&test_settings_str()).unwrap();

            assert_eq!(settings.api.login, "test-user");
            assert_eq!(settings.api.endpoint, "api.example.com");
            assert_eq!(settings.api.mode, "readwrite");
            assert!(settings.api.private_key.contains("BEGIN"));
        });
    }

    #[test]
    fn test_settings_missing_required_fields() {
        let toml_str = r#"
            [api]
            login = "test-user"
            endpoint = "api.example.com"
            # Missing private_key and mode
            "#;

        let settings = Settings::from_toml(toml_str);
        assert!(
            settings.is_err(),
            "Should fail when required fields are missing"
        );
    }

    #[test]
    fn test_settings_empty_field_rejected() {
        let toml_str = r#"
            [api]
            login = ""
            private_key = "key"
            endpoint = "api.example.com"
            mode = "readonly"
            "#;

        let settings = Settings::from_toml(toml_str);
        assert!(settings.is_err(), "Should fail when a field is empty");
    }

    #[test]
    fn test_settings_unknown_mode_rejected() {
        let toml_str = r#"
            [api]
            login = "test-user"
            private_key = "key"
            endpoint = "api.example.com"
            mode = "admin"
            "#;

        let settings = Settings::from_toml(toml_str);
        assert!(settings.is_err(), "Should fail for unknown mode");
    }

    #[test]
    fn test_settings_empty_toml() {
        let settings = Settings::from_toml("");
        assert!(settings.is_err(), "Should fail with empty TOML");
    }

    #[test]
    fn test_settings_invalid_toml_syntax() {
        let toml_str = r#"
            [api
            login = "test-user"
            "#;

        let settings = Settings::from_toml(toml_str);
        assert!(settings.is_err(), "Should fail with invalid TOML syntax");
    }

    #[test]
    fn test_override_env() {
        temp_env::with_var("VPS_API__API__LOGIN", Some("env-user"), || {
            let settings = Settings::from_toml(&test_settings_str()).unwrap();
            assert_eq!(settings.api.login, "env-user");
        });
    }
}
