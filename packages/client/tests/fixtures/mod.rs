//! In-process WebSocket server fixture for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Scripted chat server accepting a single client connection.
///
/// Frames the client sends are exposed through [`next_frame`]; raw JSON
/// text pushed through [`push`] is delivered to the client in order.
///
/// [`next_frame`]: MockChatServer::next_frame
/// [`push`]: MockChatServer::push
pub struct MockChatServer {
    url: String,
    from_client: mpsc::UnboundedReceiver<String>,
    to_client: mpsc::UnboundedSender<String>,
}

impl MockChatServer {
    /// Bind an ephemeral port and start serving one connection.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("Failed to read listener addr");

        let (from_tx, from_rx) = mpsc::unbounded_channel();
        let (to_tx, mut to_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(ws) = accept_async(stream).await else {
                return;
            };
            let (mut sink, mut inbound) = ws.split();

            loop {
                tokio::select! {
                    message = inbound.next() => match message {
                        Some(Ok(Message::Text(text))) => {
                            let _ = from_tx.send(text.to_string());
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    },
                    outbound = to_rx.recv() => match outbound {
                        Some(text) => {
                            if sink.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });

        Self {
            url: format!("ws://{addr}"),
            from_client: from_rx,
            to_client: to_tx,
        }
    }

    /// WebSocket URL of the fixture
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Queue a raw frame for delivery to the client.
    pub fn push(&self, raw: &str) {
        self.to_client
            .send(raw.to_string())
            .expect("Server task should be alive");
    }

    /// Next frame received from the client, parsed as JSON.
    pub async fn next_frame(&mut self) -> serde_json::Value {
        let text = tokio::time::timeout(Duration::from_secs(5), self.from_client.recv())
            .await
            .expect("Timed out waiting for a client frame")
            .expect("Client disconnected before sending a frame");
        serde_json::from_str(&text).expect("Client frames should be JSON")
    }
}
