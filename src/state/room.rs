//! Rooms and the room store.
//!
//! A room is the unit of play: a host, players (held by the room's [`Game`]),
//! spectators and the queue of join requests waiting for the host. Everyone
//! is keyed by session token, so a client that comes back on a new
//! connection finds its old seat and scores.
//!
//! The [`RoomStore`] hands out each room behind its own mutex. Holding that
//! lock for a whole transition keeps actions on one room totally ordered
//! while different rooms proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::connection::ConnectionId;
use super::game::{Game, GameError, Player, RoundRules};
use super::phrases::Phrase;
use super::session::Role;
use super::wheel::WheelPattern;

/// Characters used in generated room codes (no 0/O, 1/I).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Longest custom room code accepted.
pub const MAX_CODE_LENGTH: usize = 12;

/// Shortest custom room code accepted.
pub const MIN_CODE_LENGTH: usize = 3;

/// A spectator. Watches, never takes a turn.
#[derive(Debug, Clone)]
pub struct Spectator {
    pub session_token: String,
    pub connection_id: Option<ConnectionId>,
    pub name: String,
}

/// A join or spectate request waiting for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub connection_id: ConnectionId,
    pub player_name: String,
    pub session_token: String,
    pub role: Role,
    /// The token already belongs to someone in the room
    pub is_reconnection: bool,
    pub requested_at: DateTime<Utc>,
}

/// What happened to a join attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The host came back; re-attached without approval
    Rejoined { role: Role },
    /// Waiting for the host
    Queued(JoinRequest),
}

/// A request the host accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub request: JoinRequest,
    /// Role the session actually has in the room
    pub role: Role,
    /// The match had already started
    pub in_progress: bool,
}

/// Room state.
#[derive(Debug)]
pub struct Room {
    /// Upper-case room code
    pub code: String,

    /// Session token of the host
    pub host_token: String,

    /// Match state, including the players
    pub game: Game,

    spectators: Vec<Spectator>,

    /// Join requests waiting for the host, oldest first
    pending: Vec<JoinRequest>,

    /// Maximum players allowed
    pub max_players: usize,

    /// Next wheel pattern to hand out
    pattern_cursor: usize,

    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room with its host as the first player.
    pub fn new(
        code: String,
        host: Player,
        total_rounds: u32,
        rules: RoundRules,
        max_players: usize,
    ) -> Self {
        Self {
            code,
            host_token: host.session_token.clone(),
            game: Game::hosted_by(host, total_rounds, rules),
            spectators: Vec::new(),
            pending: Vec::new(),
            max_players,
            pattern_cursor: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_host(&self, session_token: &str) -> bool {
        self.host_token == session_token
    }

    /// Check if the match has started (it may also be over).
    pub fn in_progress(&self) -> bool {
        self.game.phase.is_started()
    }

    pub fn is_full(&self) -> bool {
        self.game.player_count() >= self.max_players
    }

    pub fn is_empty(&self) -> bool {
        self.game.player_count() == 0 && self.spectators.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        self.game.players()
    }

    pub fn spectators(&self) -> &[Spectator] {
        &self.spectators
    }

    pub fn pending(&self) -> &[JoinRequest] {
        &self.pending
    }

    pub fn host_name(&self) -> Option<&str> {
        self.game
            .get_player(&self.host_token)
            .map(|p| p.name.as_str())
    }

    /// Role a session token has in this room.
    pub fn role_of(&self, session_token: &str) -> Option<Role> {
        if self.game.has_player(session_token) {
            Some(Role::Player)
        } else if self.spectators.iter().any(|s| s.session_token == session_token) {
            Some(Role::Spectator)
        } else {
            None
        }
    }

    /// Handle a join or spectate request.
    ///
    /// The host is re-attached at once. Everybody else is queued for the
    /// host; a second request from the same token replaces the first.
    pub fn request_join(
        &mut self,
        connection_id: ConnectionId,
        player_name: &str,
        session_token: &str,
        role: Role,
    ) -> Result<JoinOutcome, RoomError> {
        if self.is_host(session_token) {
            if let Some(role) = self.attach(session_token, connection_id) {
                return Ok(JoinOutcome::Rejoined { role });
            }
        }

        let existing = self.role_of(session_token);
        if existing.is_none() && role == Role::Player && self.is_full() {
            return Err(RoomError::Full);
        }

        let request = JoinRequest {
            connection_id,
            player_name: player_name.trim().to_string(),
            session_token: session_token.to_string(),
            role: existing.unwrap_or(role),
            is_reconnection: existing.is_some(),
            requested_at: Utc::now(),
        };
        self.pending.retain(|r| r.session_token != session_token);
        self.pending.push(request.clone());
        debug!(room = %self.code, player = %request.player_name, reconnection = request.is_reconnection, "join request queued");
        Ok(JoinOutcome::Queued(request))
    }

    /// Host accepts a queued request.
    pub fn accept(&mut self, host_token: &str, session_token: &str) -> Result<Accepted, RoomError> {
        if !self.is_host(host_token) {
            return Err(RoomError::NotHost);
        }
        let idx = self
            .pending
            .iter()
            .position(|r| r.session_token == session_token)
            .ok_or(RoomError::NoSuchRequest)?;

        let existing = self.role_of(session_token);
        if existing.is_none() && self.pending[idx].role == Role::Player && self.is_full() {
            return Err(RoomError::Full);
        }

        let request = self.pending.remove(idx);
        let role = match existing {
            Some(_) => self
                .attach(session_token, request.connection_id)
                .unwrap_or(Role::Player),
            None => {
                match request.role {
                    Role::Player => self.game.add_player(Player::new(
                        session_token,
                        request.player_name.clone(),
                        Some(request.connection_id),
                    ))?,
                    Role::Spectator => self.spectators.push(Spectator {
                        session_token: session_token.to_string(),
                        connection_id: Some(request.connection_id),
                        name: request.player_name.clone(),
                    }),
                }
                request.role
            }
        };

        info!(room = %self.code, player = %request.player_name, ?role, reconnection = existing.is_some(), "join request accepted");
        Ok(Accepted {
            request,
            role,
            in_progress: self.in_progress(),
        })
    }

    /// Host turns a queued request down. Nothing else in the room changes.
    pub fn reject(&mut self, host_token: &str, session_token: &str) -> Result<JoinRequest, RoomError> {
        if !self.is_host(host_token) {
            return Err(RoomError::NotHost);
        }
        let idx = self
            .pending
            .iter()
            .position(|r| r.session_token == session_token)
            .ok_or(RoomError::NoSuchRequest)?;
        let request = self.pending.remove(idx);
        info!(room = %self.code, player = %request.player_name, "join request rejected");
        Ok(request)
    }

    /// Point a member's record at a new connection.
    pub fn attach(&mut self, session_token: &str, connection_id: ConnectionId) -> Option<Role> {
        if self.game.attach_connection(session_token, connection_id) {
            return Some(Role::Player);
        }
        let spectator = self
            .spectators
            .iter_mut()
            .find(|s| s.session_token == session_token)?;
        spectator.connection_id = Some(connection_id);
        Some(Role::Spectator)
    }

    /// A connection dropped. Seats, scores and turn are kept.
    pub fn detach(&mut self, connection_id: ConnectionId) -> Option<String> {
        if let Some(player) = self.game.detach_connection(connection_id) {
            return Some(player.name.clone());
        }
        let spectator = self
            .spectators
            .iter_mut()
            .find(|s| s.connection_id == Some(connection_id))?;
        spectator.connection_id = None;
        Some(spectator.name.clone())
    }

    /// Remove a member or their pending request.
    ///
    /// If the host leaves, the next player becomes host.
    pub fn leave(&mut self, session_token: &str) -> Option<Role> {
        self.pending.retain(|r| r.session_token != session_token);

        let role = if self.game.remove_player(session_token).is_some() {
            Role::Player
        } else {
            let idx = self
                .spectators
                .iter()
                .position(|s| s.session_token == session_token)?;
            self.spectators.remove(idx);
            Role::Spectator
        };

        if self.is_host(session_token) {
            if let Some(next) = self.game.players().first() {
                self.host_token = next.session_token.clone();
                info!(room = %self.code, host = %next.name, "host transferred");
            }
        }
        Some(role)
    }

    /// Start the match. Host only.
    pub fn start(
        &mut self,
        host_token: &str,
        phrase: Phrase,
        wheel: WheelPattern,
    ) -> Result<(), RoomError> {
        if !self.is_host(host_token) {
            return Err(RoomError::NotHost);
        }
        self.game.start(phrase, wheel)?;
        Ok(())
    }

    /// Next wheel pattern for this room, cycling through `patterns`.
    pub fn next_wheel(&mut self, patterns: &[WheelPattern]) -> Option<WheelPattern> {
        if patterns.is_empty() {
            return None;
        }
        let wheel = patterns[self.pattern_cursor % patterns.len()].clone();
        self.pattern_cursor = (self.pattern_cursor + 1) % patterns.len();
        Some(wheel)
    }

    /// Live connections of everyone in the room.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.game
            .players()
            .iter()
            .filter_map(|p| p.connection_id)
            .chain(self.spectators.iter().filter_map(|s| s.connection_id))
            .collect()
    }

    pub fn host_connection(&self) -> Option<ConnectionId> {
        self.game
            .get_player(&self.host_token)
            .and_then(|p| p.connection_id)
    }

    /// Convert to JSON for sending to clients.
    pub fn to_json(&self) -> serde_json::Value {
        let players: Vec<serde_json::Value> = self
            .game
            .players()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "connectionId": p.connection_id,
                    "roundScore": p.round_score,
                    "totalScore": p.total_score,
                    "connected": p.is_connected(),
                    "isHost": self.is_host(&p.session_token)
                })
            })
            .collect();

        let spectators: Vec<serde_json::Value> = self
            .spectators
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "connected": s.connection_id.is_some()
                })
            })
            .collect();

        serde_json::json!({
            "roomCode": self.code,
            "host": self.host_name(),
            "players": players,
            "spectators": spectators,
            "pendingRequests": self.pending.len(),
            "maxPlayers": self.max_players,
            "totalRounds": self.game.total_rounds,
            "currentRound": self.game.current_round,
            "inProgress": self.in_progress(),
            "phase": self.game.phase.as_str()
        })
    }
}

/// Room errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomError {
    #[error("Room {0} not found")]
    NotFound(String),
    #[error("Room code {0} is already in use")]
    CodeTaken(String),
    #[error("Room codes are 3 to 12 letters or digits")]
    InvalidCode,
    #[error("Room is full")]
    Full,
    #[error("Only the host can do that")]
    NotHost,
    #[error("No pending request from that player")]
    NoSuchRequest,
    #[error("Not a member of this room")]
    NotMember,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A room behind its own lock.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Canonical form of a custom room code.
pub fn normalize_code(code: &str) -> Result<String, RoomError> {
    let code = code.trim().to_uppercase();
    let len = code.chars().count();
    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&len)
        || !code.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(RoomError::InvalidCode);
    }
    Ok(code)
}

/// Random room code from an unambiguous alphabet.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// All active rooms, by code.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: RwLock<HashMap<String, SharedRoom>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room under a custom code or a fresh random one.
    ///
    /// A custom code that is already active is refused; random codes are
    /// redrawn until unique.
    pub fn create<R, F>(
        &self,
        custom_code: Option<&str>,
        rng: &mut R,
        code_len: usize,
        build: F,
    ) -> Result<(String, SharedRoom), RoomError>
    where
        R: Rng + ?Sized,
        F: FnOnce(String) -> Room,
    {
        let mut rooms = self.rooms.write();

        let code = match custom_code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(custom) => {
                let code = normalize_code(custom)?;
                if rooms.contains_key(&code) {
                    return Err(RoomError::CodeTaken(code));
                }
                code
            }
            None => loop {
                let code = generate_code(rng, code_len);
                if !rooms.contains_key(&code) {
                    break code;
                }
            },
        };

        let room = Arc::new(Mutex::new(build(code.clone())));
        rooms.insert(code.clone(), Arc::clone(&room));
        info!(room = %code, "room created");
        Ok((code, room))
    }

    /// Look up a room. Codes are case-insensitive.
    pub fn get(&self, code: &str) -> Option<SharedRoom> {
        self.rooms.read().get(&code.trim().to_uppercase()).cloned()
    }

    /// Run `f` with the room locked.
    pub fn with_room<T>(&self, code: &str, f: impl FnOnce(&mut Room) -> T) -> Result<T, RoomError> {
        let room = self
            .get(code)
            .ok_or_else(|| RoomError::NotFound(code.trim().to_uppercase()))?;
        let mut guard = room.lock();
        Ok(f(&mut guard))
    }

    /// Remove a room if nobody is left in it.
    pub fn remove_if_empty(&self, code: &str) -> bool {
        let mut rooms = self.rooms.write();
        let key = code.trim().to_uppercase();
        let empty = rooms.get(&key).is_some_and(|r| r.lock().is_empty());
        if empty {
            rooms.remove(&key);
            info!(room = %key, "empty room removed");
        }
        empty
    }

    pub fn codes(&self) -> Vec<String> {
        self.rooms.read().keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.rooms.read().len()
    }
}
