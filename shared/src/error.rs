//! Error types for the agenda relay.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while relaying an agenda entry.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or incorrect shared secret
    #[error("Unauthorized")]
    Unauthorized,

    /// Validation error (missing required field, malformed body)
    #[error("{0}")]
    Validation(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// The external collaborator (Notion) rejected or failed the call
    #[error("{0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Unauthorized => 401,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Message reported to the caller in the `error` field.
    pub fn client_message(&self) -> String {
        match self {
            Error::NotFound(_) => "Not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Upstream(e.to_string())
    }
}
