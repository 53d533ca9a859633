//! WebSocket chat client library.
//!
//! Collects a nickname, registers it with the chat server, and keeps a
//! persistent WebSocket connection over which the live participant list
//! and message stream are received and outgoing messages are sent.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ClientConfig;
pub use error::ClientError;
pub use ui::run_client;
