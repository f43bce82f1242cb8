//! Payment Error Types

use thiserror::Error;

use crate::schema::ValidationErrors;

/// Only message a client ever sees for a failure that is not its input
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Input failed the payment schema
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Record store failure (connection, constraint violation, ...)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Request body is not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    /// Get user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields.",
            Self::Storage(_) | Self::Json(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for PaymentError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::migrate::MigrateError> for PaymentError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_detail_hidden_from_users() {
        let err = PaymentError::Storage("duplicate key value violates unique constraint".into());
        assert_eq!(err.user_message(), INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("unique constraint"));
    }

    #[test]
    fn test_conversions() {
        let err: PaymentError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, PaymentError::Json(_)));
        assert_eq!(err.user_message(), INTERNAL_SERVER_ERROR);

        let err: PaymentError = crate::schema::validate(&serde_json::json!({}))
            .unwrap_err()
            .into();
        assert!(matches!(err, PaymentError::Validation(ref errors) if errors.len() == 3));
    }
}
