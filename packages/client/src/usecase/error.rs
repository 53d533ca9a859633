//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::ValueObjectError;
use crate::infrastructure::registration::RegistrationError;

/// Errors raised while registering a participant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// Local validation failed; no network call was made
    #[error(transparent)]
    InvalidNickname(#[from] ValueObjectError),

    /// The server refused the nickname
    #[error("{0}")]
    Rejected(String),

    /// The registration endpoint could not be reached
    #[error("registration failed: {0}")]
    Transport(String),
}

impl From<RegistrationError> for RegisterError {
    fn from(error: RegistrationError) -> Self {
        match error {
            RegistrationError::Rejected(message) => RegisterError::Rejected(message),
            other => RegisterError::Transport(other.to_string()),
        }
    }
}

/// Errors raised while building an outgoing message frame.
///
/// Both variants are treated as silent no-ops by the UI: nothing is
/// transmitted and the input is left as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Empty or over-length input
    #[error(transparent)]
    InvalidMessage(#[from] ValueObjectError),

    /// No active, registered connection
    #[error("no active connection")]
    NotConnected,
}
