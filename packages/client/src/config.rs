//! Client configuration parsed from the command line.

use clap::{Parser, ValueEnum};

/// How the client registers its nickname with the server.
///
/// Both strategies exist in deployed servers; a session uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegistrationMode {
    /// Register over HTTP (`POST /new-user`) before opening the socket.
    Http,
    /// Open the socket first and register with a `reg` frame.
    Socket,
}

/// Command line configuration for the chat client.
#[derive(Debug, Clone, Parser)]
#[command(name = "idobata-client", version, about = "Terminal chat client for Idobata")]
pub struct ClientConfig {
    /// WebSocket endpoint of the chat server
    #[arg(long, default_value = "ws://127.0.0.1:8080")]
    pub server_url: String,

    /// Base URL of the registration HTTP endpoint (http mode only)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub http_url: String,

    /// Registration strategy
    #[arg(long, value_enum, default_value_t = RegistrationMode::Http)]
    pub register: RegistrationMode,

    /// Nickname to try first instead of prompting
    #[arg(long)]
    pub nickname: Option<String>,
}
