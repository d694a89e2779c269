use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Failed to read request body: {message}")]
    BodyReadError { message: String },

    #[error("Request body is not valid UTF-8: {0}")]
    InvalidUtf8Error(#[from] std::str::Utf8Error),

    #[error("Base64 body could not be decoded: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Request body is JSON but not an object (found {kind})")]
    NotAnObjectError { kind: &'static str },

    #[error("Body property '{property}' is {kind}, expected a string")]
    PropertyTypeError { property: String, kind: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, IntakeError>;
