use crate::utils::error::{IntakeError, Result};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;

// language[-script][-region]... e.g. "en", "en-US", "tr_TR", "zh-Hant-TW"
static CULTURE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(?:[-_][A-Za-z0-9]{1,8})*$").unwrap()
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_culture_tag(field_name: &str, tag: &str) -> Result<()> {
    let trimmed = tag.trim();

    // 空字串與 "invariant" 都代表不變文化
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("invariant") {
        return Ok(());
    }

    if !CULTURE_TAG.is_match(trimmed) {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tag.to_string(),
            reason: "Culture must look like 'en', 'en-US' or 'tr-TR' (or be 'invariant')"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    validate_non_empty_string(field_name, addr)?;

    addr.trim()
        .parse::<SocketAddr>()
        .map_err(|e| IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_bool_flag(field_name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected one of true/false, yes/no, on/off, 1/0".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_culture_tag() {
        assert!(validate_culture_tag("culture", "").is_ok());
        assert!(validate_culture_tag("culture", "invariant").is_ok());
        assert!(validate_culture_tag("culture", "en").is_ok());
        assert!(validate_culture_tag("culture", "en-US").is_ok());
        assert!(validate_culture_tag("culture", "tr_TR").is_ok());
        assert!(validate_culture_tag("culture", "zh-Hant-TW").is_ok());
        assert!(validate_culture_tag("culture", "e").is_err());
        assert!(validate_culture_tag("culture", "en US").is_err());
        assert!(validate_culture_tag("culture", "12-34").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1:7071").is_ok());
        assert!(validate_socket_addr("server.bind", "[::1]:0").is_ok());
        assert!(validate_socket_addr("server.bind", "").is_err());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_bool_flag() {
        assert!(validate_bool_flag("flag", "TRUE").unwrap());
        assert!(validate_bool_flag("flag", "on").unwrap());
        assert!(!validate_bool_flag("flag", "").unwrap());
        assert!(!validate_bool_flag("flag", "no").unwrap());
        assert!(validate_bool_flag("flag", "maybe").is_err());
    }
}
