//! Error types for EatGo

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EatgoError>;

#[derive(Error, Debug)]
pub enum EatgoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EatgoError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EatgoError::InvalidInput(_) => 3,
            EatgoError::Api(ApiError::Authentication(_)) => 2,
            EatgoError::Api(_) => 1,
            EatgoError::Config(_) => 1,
            EatgoError::Storage(_) => 1,
        }
    }

    /// True when the failure came from the transport layer (network or HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, EatgoError::Api(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to follow symlink at {0}")]
    Symlink(PathBuf),

    #[error("OS keyring unavailable: {0}")]
    KeyringUnavailable(String),

    #[error("Keyring operation failed: {0}")]
    Keyring(String),
}
