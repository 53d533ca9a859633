//! WebSocket connection lifecycle.
//!
//! The connection is opened at most once per session and owned
//! exclusively by [`ChatConnection`]: one task pumps inbound frames in
//! delivery order through the frame-handling use case, one task drains
//! the outbound queue into the sink (FIFO). There is no reconnect.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message};

use crate::domain::Session;
use crate::infrastructure::dto::websocket::{ClientFrame, FrameError, parse_server_frame};
use crate::usecase::{HandleServerFrameUseCase, SessionUpdate};

/// Errors raised by the connection layer.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The socket could not be opened
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    /// A frame was queued after the connection ended
    #[error("connection is closed")]
    Closed,
}

/// Handle to an open chat connection.
pub struct ChatConnection {
    outbound: mpsc::UnboundedSender<ClientFrame>,
    recv_task: tokio::task::JoinHandle<()>,
    send_task: tokio::task::JoinHandle<()>,
}

impl ChatConnection {
    /// Open the socket and spawn the pump tasks.
    ///
    /// Returns the handle and the stream of session updates produced by
    /// inbound frames. The stream ends when the connection closes, for
    /// any reason; no reconnect is attempted.
    pub async fn connect(
        url: &str,
        session: Arc<Mutex<Session>>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionUpdate>), ConnectionError> {
        session.lock().await.begin_connect();

        let (stream, _) = match connect_async(url).await {
            Ok(pair) => pair,
            Err(source) => {
                session.lock().await.closed();
                return Err(ConnectionError::Connect {
                    url: url.to_string(),
                    source,
                });
            }
        };
        session.lock().await.opened();
        tracing::info!("Connected to {}", url);

        let (mut sink, mut inbound) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ClientFrame>();
        let (updates_tx, updates_rx) = mpsc::unbounded_channel::<SessionUpdate>();

        let handler = HandleServerFrameUseCase::new(session.clone());
        let recv_session = session.clone();

        // Inbound pump: frames are applied strictly in delivery order.
        let recv_task = tokio::spawn(async move {
            while let Some(message) = inbound.next().await {
                let message = match message {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::error!("WebSocket error: {}", e);
                        let _ = updates_tx.send(SessionUpdate::ConnectionLost(e.to_string()));
                        break;
                    }
                };

                match message {
                    Message::Text(text) => match parse_server_frame(&text) {
                        Ok(frame) => {
                            let update = handler.execute(frame).await;
                            if update != SessionUpdate::Ignored
                                && updates_tx.send(update).is_err()
                            {
                                break;
                            }
                        }
                        // Neither decode failure closes the connection.
                        Err(FrameError::Malformed(e)) => {
                            tracing::warn!("Discarding malformed frame: {}", e);
                        }
                        Err(e @ FrameError::Unrecognized { .. }) => {
                            tracing::warn!("{}", e);
                        }
                    },
                    Message::Close(_) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    // Ping/pong is handled by the protocol layer.
                    Message::Ping(_) | Message::Pong(_) => {}
                    _ => {}
                }
            }
            recv_session.lock().await.closed();
            // Dropping updates_tx ends the update stream.
        });

        // Outbound pump: drains queued frames, then closes the sink.
        let send_task = tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                let text = match frame.encode() {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("Failed to encode outgoing frame: {}", e);
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    tracing::error!("Failed to send frame: {}", e);
                    break;
                }
            }
            let _ = sink.send(Message::Close(None)).await;
        });

        Ok((
            Self {
                outbound: outbound_tx,
                recv_task,
                send_task,
            },
            updates_rx,
        ))
    }

    /// Queue a frame for transmission.
    ///
    /// Enqueueing is synchronous; delivery order is FIFO per connection.
    pub fn send(&self, frame: ClientFrame) -> Result<(), ConnectionError> {
        self.outbound.send(frame).map_err(|_| ConnectionError::Closed)
    }

    /// Close the connection, flushing queued frames first.
    pub async fn close(self) {
        let Self {
            outbound,
            recv_task,
            send_task,
        } = self;

        // Dropping the sender lets the outbound pump drain the queue and
        // send the protocol close.
        drop(outbound);
        let _ = send_task.await;
        recv_task.abort();
        let _ = recv_task.await;
    }
}
