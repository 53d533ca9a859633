//! Interactive client runner.
//!
//! Phase one collects and registers a nickname, re-prompting on inline
//! errors; phase two is the chat loop over the open connection. On
//! shutdown a best-effort exit frame is sent before the socket closes.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use idobata_shared::time::local_timestamp_millis;

use crate::config::{ClientConfig, RegistrationMode};
use crate::domain::Session;
use crate::error::ClientError;
use crate::infrastructure::connection::ChatConnection;
use crate::infrastructure::dto::websocket::ClientFrame;
use crate::infrastructure::registration::HttpRegistrationApi;
use crate::ui::{prompt, view};
use crate::usecase::{RegisterParticipantUseCase, SendMessageUseCase, SessionUpdate};

/// Run the interactive chat client until EOF or the connection closes.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut input = prompt::spawn_input_thread("> ");
    let session = Arc::new(Mutex::new(Session::new()));

    let Some((connection, updates)) = bootstrap(&config, &session, &mut input).await? else {
        // EOF before a registration succeeded
        return Ok(());
    };

    chat_loop(&config, &session, &connection, updates, &mut input).await;

    // Best-effort exit notification, fire-and-forget.
    let current_user = session.lock().await.current_user().cloned();
    if let Some(user) = current_user {
        if connection.send(ClientFrame::exit(&user)).is_err() {
            tracing::debug!("Connection already gone; skipping exit notification");
        }
    }
    connection.close().await;

    Ok(())
}

/// Nickname phase. Loops until a registration succeeds; `None` means the
/// user quit at the prompt.
async fn bootstrap(
    config: &ClientConfig,
    session: &Arc<Mutex<Session>>,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<Option<(ChatConnection, mpsc::UnboundedReceiver<SessionUpdate>)>, ClientError> {
    let register_usecase =
        RegisterParticipantUseCase::new(Arc::new(HttpRegistrationApi::new(&config.http_url)));
    let mut preset = config.nickname.clone();

    loop {
        let raw_name = match preset.take() {
            Some(name) => name,
            None => {
                println!("Choose a nickname:");
                match input.recv().await {
                    Some(line) => line,
                    None => return Ok(None),
                }
            }
        };

        match config.register {
            RegistrationMode::Http => match register_usecase.execute(&raw_name).await {
                Ok(user) => {
                    session.lock().await.pre_register(user.clone());
                    let pair = ChatConnection::connect(&config.server_url, session.clone()).await?;
                    println!("connected as {}", view::sanitize(&user.name));
                    return Ok(Some(pair));
                }
                Err(e) => println!("{}", view::render_inline_error(&e.to_string())),
            },
            RegistrationMode::Socket => {
                // Validation stays local; the registration frame goes out
                // only once the connection is established.
                let nickname = match RegisterParticipantUseCase::validate_nickname(&raw_name) {
                    Ok(nickname) => nickname,
                    Err(e) => {
                        println!("{}", view::render_inline_error(&e.to_string()));
                        continue;
                    }
                };

                let (connection, mut updates) =
                    ChatConnection::connect(&config.server_url, session.clone()).await?;
                connection.send(ClientFrame::reg(&nickname))?;

                match await_registration(&mut updates).await {
                    AckOutcome::Registered(name) => {
                        println!("connected as {}", view::sanitize(&name));
                        return Ok(Some((connection, updates)));
                    }
                    AckOutcome::Rejected(reason) => {
                        // A rejected nickname keeps no live connection.
                        println!("{}", view::render_inline_error(&reason));
                        connection.close().await;
                        *session.lock().await = Session::new();
                    }
                    AckOutcome::ConnectionEnded => {
                        println!("connection closed");
                        connection.close().await;
                        *session.lock().await = Session::new();
                    }
                }
            }
        }
    }
}

enum AckOutcome {
    Registered(String),
    Rejected(String),
    ConnectionEnded,
}

/// Wait for the registration ack, rendering anything the server sends
/// ahead of it (e.g. an eager roster snapshot).
async fn await_registration(updates: &mut mpsc::UnboundedReceiver<SessionUpdate>) -> AckOutcome {
    while let Some(update) = updates.recv().await {
        match update {
            SessionUpdate::Registered(user) => return AckOutcome::Registered(user.name),
            SessionUpdate::RegistrationRejected(reason) => return AckOutcome::Rejected(reason),
            other => {
                if let Some(rendered) = view::render_update(&other, local_timestamp_millis()) {
                    println!("{rendered}");
                }
            }
        }
    }
    AckOutcome::ConnectionEnded
}

/// Chat phase: render inbound updates, transmit submitted lines.
async fn chat_loop(
    config: &ClientConfig,
    session: &Arc<Mutex<Session>>,
    connection: &ChatConnection,
    mut updates: mpsc::UnboundedReceiver<SessionUpdate>,
    input: &mut mpsc::UnboundedReceiver<String>,
) {
    let send_usecase = SendMessageUseCase::new(
        session.clone(),
        config.register == RegistrationMode::Http,
    );

    loop {
        tokio::select! {
            maybe_line = input.recv() => match maybe_line {
                // EOF or interrupt: leave the chat
                None => break,
                Some(line) => match send_usecase.execute(&line).await {
                    Ok(frame) => {
                        if connection.send(frame).is_err() {
                            break;
                        }
                    }
                    // Empty input and sends without a live connection are
                    // no-ops.
                    Err(e) => tracing::debug!("Ignoring input line: {}", e),
                },
            },
            maybe_update = updates.recv() => match maybe_update {
                None => {
                    println!("connection closed");
                    break;
                }
                Some(update) => {
                    if let Some(rendered) = view::render_update(&update, local_timestamp_millis()) {
                        println!("{rendered}");
                    }
                }
            },
        }
    }
}
