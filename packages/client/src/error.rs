//! Top-level client error definitions.
//!
//! Most failures are handled inline (validation and registration errors
//! re-prompt, frame errors are logged and discarded); only errors that
//! abort the client surface here.

use thiserror::Error;

use crate::infrastructure::connection::ConnectionError;

/// Errors that end the client run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket connection could not be opened or was lost while a
    /// frame had to be queued.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}
