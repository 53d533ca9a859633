//! Terminal chat client for Idobata.
//!
//! Collects a nickname, connects to the chat server over WebSocket, and
//! renders the live participant list and message stream.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-client
//! ```

use clap::Parser;

use idobata_client::ClientConfig;
use idobata_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig::parse();

    // Run the client
    if let Err(e) = idobata_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
