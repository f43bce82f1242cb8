//! Client Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Fallback when a failure carries no usable message
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// Errors raised while talking to the checkout endpoint
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request never completed (DNS, refused connection, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Request body could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Message shown to the user at the top of the form
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(msg) | Self::Encode(msg) | Self::Config(msg) if !msg.is_empty() => msg.as_str(),
            Self::Network(_) | Self::Encode(_) | Self::Config(_) => SOMETHING_WENT_WRONG,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Encode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
