#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_culture_tag, validate_socket_addr, Validate};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:7071";

/// Effective settings after merging the TOML file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub culture: String,
    pub preserve_uppercase_words: bool,
    pub bind_address: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            culture: String::new(),
            preserve_uppercase_words: false,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl Settings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.bind", &self.bind_address)
    }
}

impl ConfigProvider for Settings {
    fn culture(&self) -> &str {
        &self.culture
    }

    fn preserve_uppercase_words(&self) -> bool {
        self.preserve_uppercase_words
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_culture_tag("normalization.culture", &self.culture)?;
        self.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.socket_addr().unwrap().port(), 7071);
        assert_eq!(settings.culture(), "");
    }

    #[test]
    fn test_invalid_settings() {
        let bad_culture = Settings {
            culture: "en US".to_string(),
            ..Default::default()
        };
        assert!(bad_culture.validate().is_err());

        let bad_bind = Settings {
            bind_address: "nowhere".to_string(),
            ..Default::default()
        };
        assert!(bad_bind.validate().is_err());
    }
}
