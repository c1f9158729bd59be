//! Error types for the Voxdial dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the Voxdial dashboard
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error raised before anything is sent to the backend
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The backend answered with a non-success status
    Http {
        /// HTTP status code
        status: u16,
        /// Message reported by the server
        message: String,
    },

    /// The backend could not be reached
    Transport(String),

    /// The backend rejected the bearer token
    Authentication(String),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Database error
    Database(String),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the backend rejected the credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Human-readable message shown in inline error panels
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::Transport(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::Authentication(msg) => msg.clone(),
            Self::Serialization(_) => "Received an unexpected response from the server".to_string(),
            Self::Other(msg) => msg.clone(),
            Self::Io(_) | Self::Configuration { .. } | Self::Database(_) => {
                "Something went wrong".to_string()
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            Self::Transport(msg) => write!(f, "Transport error: {msg}"),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}
