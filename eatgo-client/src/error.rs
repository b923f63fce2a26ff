//! Error types for eatgo-client
//!
//! Wraps service layer errors together with dispatch and output failures.

use thiserror::Error;

/// Client-level errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Service layer error (API, storage, config, input)
    #[error("{0}")]
    Service(#[from] libeatgo::EatgoError),

    /// The store owning the dispatch queue is gone
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Failed to render output
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl ClientError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Service(e) => e.exit_code(),
            ClientError::Dispatch(_) | ClientError::Output(_) => 1,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::Service(libeatgo::EatgoError::InvalidInput(message.into()))
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
