//! WebSocket frame DTOs for the chat protocol.
//!
//! Every frame is one JSON-encoded unit. Inbound frames come in two
//! top-level shapes: a bare array of users (full roster snapshot) and
//! objects dispatched on their `type` discriminant.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::{MessageText, Nickname, User, UserId, ValueObjectError};

/// Errors raised while decoding an inbound frame.
///
/// Neither variant closes the connection; both are logged and the frame
/// is discarded.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Payload is not valid JSON
    #[error("frame is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Valid JSON that matches none of the known frame shapes
    #[error("unrecognized frame (type: {discriminant:?})")]
    Unrecognized { discriminant: Option<String> },
}

/// User as it appears on the wire.
///
/// Deployed servers emit ids as either JSON strings or numbers; both
/// normalize to strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name.clone(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = ValueObjectError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        Ok(User::new(UserId::new(dto.id)?, dto.name))
    }
}

/// The `exit` frame carries only the leaving user's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitUser {
    pub name: String,
}

/// Frames sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    /// Register a nickname over the socket
    Reg { name: String },

    /// Send a chat message.
    ///
    /// `user` is present only when the server does not bind an identity
    /// to the socket session (HTTP pre-registration).
    Send {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<UserDto>,
    },

    /// Best-effort leave notification, fire-and-forget
    Exit { user: ExitUser },
}

impl ClientFrame {
    /// Build a registration frame
    pub fn reg(name: &Nickname) -> Self {
        Self::Reg {
            name: name.as_str().to_string(),
        }
    }

    /// Build a message frame, optionally tagged with the sender
    pub fn send(message: MessageText, user: Option<&User>) -> Self {
        Self::Send {
            message: message.into_string(),
            user: user.map(UserDto::from),
        }
    }

    /// Build an exit notification frame
    pub fn exit(user: &User) -> Self {
        Self::Exit {
            user: ExitUser {
                name: user.name.clone(),
            },
        }
    }

    /// Encode the frame as JSON text
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frames received from the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerFrame {
    /// Bare array: full roster snapshot
    Roster(Vec<UserDto>),
    /// Tagged object
    Event(ServerEvent),
}

/// Tagged server events, dispatched on the `type` discriminant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Registration acknowledgment (socket-carried registration)
    Reg {
        success: bool,
        #[serde(default)]
        user: Option<UserDto>,
        #[serde(default)]
        message: Option<String>,
    },

    /// Full roster snapshot, tagged variant
    Users { users: Vec<UserDto> },

    /// Chat message; servers emit either `message` or `send`
    #[serde(alias = "send")]
    Message { message: String, user: UserDto },

    /// Incremental roster join
    UserJoined { user: UserDto },

    /// Incremental roster leave
    UserLeft {
        #[serde(rename = "userId", deserialize_with = "string_or_number")]
        user_id: String,
    },
}

/// Decode one inbound frame.
///
/// Distinguishes malformed JSON from well-formed JSON of an unknown
/// shape so the caller can log the discriminant of the latter and stay
/// forward-compatible.
pub fn parse_server_frame(text: &str) -> Result<ServerFrame, FrameError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(FrameError::Malformed)?;
    let discriminant = value
        .get("type")
        .and_then(|t| t.as_str())
        .map(str::to_string);
    serde_json::from_value(value).map_err(|_| FrameError::Unrecognized { discriminant })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => Ok(text),
        Raw::Int(number) => Ok(number.to_string()),
    }
}
