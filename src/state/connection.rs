//! Connection tracking.
//!
//! A connection is one transport-level socket. It is transient: when a client
//! drops and comes back it gets a new connection id but presents the same
//! session token, and the token is what rooms use to find the player again.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Transport connection id.
pub type ConnectionId = Uuid;

/// One live connection.
#[derive(Debug, Clone)]
pub struct Connection {
    pub connection_id: ConnectionId,

    /// Durable identity presented by the client
    pub session_token: Option<String>,

    /// Token named in a join request the host has not answered yet.
    /// Grants nothing until the host accepts.
    pub requested_token: Option<String>,

    /// Room this connection was last placed in. Kept after the token moves
    /// elsewhere so closing the socket still detaches it.
    pub room_code: Option<String>,

    pub connected_at: DateTime<Utc>,

    /// Last request received
    pub last_activity: DateTime<Utc>,
}

impl Connection {
    pub fn new(connection_id: ConnectionId) -> Self {
        let now = Utc::now();
        Self {
            connection_id,
            session_token: None,
            requested_token: None,
            room_code: None,
            connected_at: now,
            last_activity: now,
        }
    }

    /// Record activity (any request received).
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

/// Connection manager - maps connections to session tokens and back.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    /// Connections by id
    connections: HashMap<ConnectionId, Connection>,

    /// Session token to its most recent connection
    sessions: HashMap<String, ConnectionId>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection.
    pub fn open(&mut self, connection_id: ConnectionId) -> &mut Connection {
        self.connections
            .entry(connection_id)
            .or_insert_with(|| Connection::new(connection_id))
    }

    /// Tie a connection to a session token.
    ///
    /// Returns the connection that previously carried the token, if it was a
    /// different one. That older connection loses the token but remembers its
    /// room.
    pub fn bind(&mut self, connection_id: ConnectionId, session_token: &str) -> Option<ConnectionId> {
        let conn = self.open(connection_id);
        conn.session_token = Some(session_token.to_string());
        conn.requested_token = None;
        conn.touch();

        let previous = self
            .sessions
            .insert(session_token.to_string(), connection_id)
            .filter(|prev| *prev != connection_id);

        if let Some(prev) = previous {
            if let Some(stale) = self.connections.get_mut(&prev) {
                stale.session_token = None;
            }
        }
        previous
    }

    /// Remember which room a connection is in.
    pub fn set_room(&mut self, connection_id: ConnectionId, room_code: Option<String>) {
        if let Some(conn) = self.connections.get_mut(&connection_id) {
            conn.room_code = room_code;
        }
    }

    pub fn get(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Park a token on a connection while its join request waits.
    pub fn request(&mut self, connection_id: ConnectionId, session_token: &str) {
        self.open(connection_id).requested_token = Some(session_token.to_string());
    }

    /// Token a connection is waiting to be accepted under.
    pub fn requested_by(&self, connection_id: ConnectionId) -> Option<&str> {
        self.get(connection_id)
            .and_then(|c| c.requested_token.as_deref())
    }

    pub fn clear_request(&mut self, connection_id: ConnectionId) {
        if let Some(conn) = self.connections.get_mut(&connection_id) {
            conn.requested_token = None;
        }
    }

    /// Session token of a connection.
    pub fn session_of(&self, connection_id: ConnectionId) -> Option<&str> {
        self.get(connection_id)
            .and_then(|c| c.session_token.as_deref())
    }

    /// Current connection of a session token.
    pub fn connection_for(&self, session_token: &str) -> Option<ConnectionId> {
        self.sessions.get(session_token).copied()
    }

    /// Drop a connection. The session token is only unbound if it still
    /// points at this connection.
    pub fn close(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let conn = self.connections.remove(&connection_id)?;
        if let Some(token) = &conn.session_token {
            if self.sessions.get(token) == Some(&connection_id) {
                self.sessions.remove(token);
            }
        }
        Some(conn)
    }

    pub fn count(&self) -> usize {
        self.connections.len()
    }
}
