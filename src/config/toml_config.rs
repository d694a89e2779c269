use crate::config::Settings;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_culture_tag, validate_socket_addr, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    pub culture: Option<String>,
    pub preserve_uppercase_words: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${PROFILE_CULTURE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 轉成有效設定，缺少的欄位使用預設值
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            culture: self.normalization.culture.unwrap_or(defaults.culture),
            preserve_uppercase_words: self
                .normalization
                .preserve_uppercase_words
                .unwrap_or(defaults.preserve_uppercase_words),
            bind_address: self.server.bind.unwrap_or(defaults.bind_address),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn culture(&self) -> &str {
        self.normalization.culture.as_deref().unwrap_or_default()
    }

    fn preserve_uppercase_words(&self) -> bool {
        self.normalization.preserve_uppercase_words.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_culture_tag("normalization.culture", self.culture())?;
        if let Some(bind) = &self.server.bind {
            validate_socket_addr("server.bind", bind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[normalization]
culture = "tr-TR"
preserve_uppercase_words = true

[server]
bind = "0.0.0.0:8080"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.culture(), "tr-TR");
        assert!(config.preserve_uppercase_words());

        let settings = config.into_settings();
        assert_eq!(settings.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.into_settings(), Settings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROFILE_INTAKE_TEST_CULTURE", "az-AZ");

        let toml_content = r#"
[normalization]
culture = "${PROFILE_INTAKE_TEST_CULTURE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.culture(), "az-AZ");

        std::env::remove_var("PROFILE_INTAKE_TEST_CULTURE");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[normalization]
culture = "${PROFILE_INTAKE_SURELY_UNSET}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.culture(), "${PROFILE_INTAKE_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[server]\nbind = \"localhost\"\n").unwrap();
        assert!(config.validate().is_err());

        assert!(TomlConfig::from_toml_str("[normalization]\nculture = 5\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[normalization]\nculture = \"en-GB\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.culture(), "en-GB");

        assert!(TomlConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
