//! Core domain models for the chat client.

use serde::{Deserialize, Serialize};

use super::value_object::UserId;

/// A connected chat user as reported by the server.
///
/// Identity is server-assigned and never mutated locally. Remote user
/// names are not re-validated; the server enforces its own rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    pub id: UserId,
    /// Display name
    pub name: String,
}

impl User {
    /// Create a new user
    pub fn new(id: UserId, name: String) -> Self {
        Self { id, name }
    }
}

/// The live set of currently connected users.
///
/// Invariant: no id appears twice. Joins of a present id and removals of
/// an absent id are silent no-ops, so the tracked set always mirrors the
/// server-reported membership regardless of whether the server sends
/// snapshots or incremental events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Replace the whole roster from a snapshot.
    ///
    /// Duplicate ids in the snapshot are dropped, first occurrence wins.
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users.clear();
        for user in users {
            if !self.contains(&user.id) {
                self.users.push(user);
            }
        }
    }

    /// Add one user. Returns `false` without changes if the id is
    /// already present.
    pub fn join(&mut self, user: User) -> bool {
        if self.contains(&user.id) {
            return false;
        }
        self.users.push(user);
        true
    }

    /// Remove one user by id, returning it. Absent ids return `None`.
    pub fn leave(&mut self, user_id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == user_id)?;
        Some(self.users.remove(index))
    }

    /// Whether a user with this id is present
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.users.iter().any(|u| &u.id == user_id)
    }

    /// The current membership, in arrival order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of connected users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Connection lifecycle states.
///
/// `AwaitingRegistration` only occurs with socket-carried registration,
/// between the transport opening and the server's `reg` acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    AwaitingRegistration,
    Connected,
    Closed,
}

/// The session aggregate: connection state, the registered identity, and
/// the roster.
///
/// All handlers mutate session state through this type only; the view
/// layer renders the updates those mutations produce.
#[derive(Debug, Clone)]
pub struct Session {
    state: ConnectionState,
    current_user: Option<User>,
    roster: Roster,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a disconnected session with no identity
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            current_user: None,
            roster: Roster::new(),
        }
    }

    /// Store the identity obtained from HTTP registration, before the
    /// socket is opened.
    pub fn pre_register(&mut self, user: User) {
        if self.current_user.is_none() {
            self.current_user = Some(user);
        }
    }

    /// The socket is being constructed
    pub fn begin_connect(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// The transport reported the connection established.
    ///
    /// With a pre-registered identity the session is immediately
    /// connected; otherwise it waits for the registration ack.
    pub fn opened(&mut self) {
        self.state = if self.current_user.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::AwaitingRegistration
        };
    }

    /// Store the identity from a successful registration ack.
    ///
    /// Returns `false` without changes if an identity is already set; the
    /// session identity is assigned exactly once.
    pub fn registered(&mut self, user: User) -> bool {
        if self.current_user.is_some() {
            return false;
        }
        self.current_user = Some(user);
        self.state = ConnectionState::Connected;
        true
    }

    /// The transport closed; no reconnect is attempted
    pub fn closed(&mut self) {
        self.state = ConnectionState::Closed;
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The registered identity, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Whether `user_id` is the session's own identity
    pub fn is_own(&self, user_id: &UserId) -> bool {
        self.current_user.as_ref().is_some_and(|u| &u.id == user_id)
    }

    /// Whether outgoing messages can be transmitted right now
    pub fn can_send(&self) -> bool {
        self.state == ConnectionState::Connected && self.current_user.is_some()
    }

    /// The live participant roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable access for frame handling
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}
