//! Error types for Studyshare
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Studyshare operations
///
/// Covers configuration problems, transport failures, non-success responses
/// from the backend, and local session storage failures.
#[derive(Error, Debug)]
pub enum StudyshareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (connect, DNS, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// A command that needs a session was run without one
    #[error("Please log in to {0}")]
    NotLoggedIn(String),

    /// Login or registration refused by the backend; carries its message
    #[error("{message}")]
    CredentialsRejected {
        /// HTTP status code returned by the backend
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// A session that breaks the non-empty token invariant
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Session slot read/write failures
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Invalid user input rejected before any request is made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl StudyshareError {
    /// HTTP status of an [`StudyshareError::Api`] error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::CredentialsRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the backend rejected the bearer credential.
    ///
    /// A refused login is not a rejected session, so
    /// [`StudyshareError::CredentialsRejected`] never counts.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Result type alias for Studyshare operations
///
/// Uses `anyhow::Error` so callers can attach context while the typed
/// [`StudyshareError`] stays recoverable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
