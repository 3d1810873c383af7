//! Error types and handling for the `EgoTrip` service

use thiserror::Error;

/// Main error type for the `EgoTrip` service
#[derive(Error, Debug)]
pub enum EgoTripError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl EgoTripError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EgoTripError::Config { .. } => {
                "Configuration error. Please check your environment variables.".to_string()
            }
            EgoTripError::Api { .. } => {
                "Unable to reach external services. Please check your internet connection."
                    .to_string()
            }
            EgoTripError::Cache { .. } => {
                "Cache operation failed. You may need to clear the cache directory.".to_string()
            }
            EgoTripError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            EgoTripError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
