//! Wire messages.
//!
//! Everything a transport needs to move between clients and the
//! [`GameServer`](super::server::GameServer): requests in, an [`Ack`] back to
//! the caller, and [`ServerEvent`]s pushed to one connection or a whole room.
//! All messages are JSON objects tagged by a `type` field.

use serde::{Deserialize, Serialize};

use super::connection::ConnectionId;
use super::game::{GameSnapshot, Standing};
use super::room::JoinRequest;

/// Requests sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientRequest {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        player_name: String,
        total_rounds: u32,
        #[serde(default)]
        room_code: Option<String>,
        session_token: String,
    },

    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_code: String,
        player_name: String,
        session_token: String,
    },

    #[serde(rename_all = "camelCase")]
    JoinAsSpectator {
        room_code: String,
        player_name: String,
        session_token: String,
    },

    /// Host accepts the request queued under `session_token`
    #[serde(rename_all = "camelCase")]
    AcceptJoinRequest {
        room_code: String,
        session_token: String,
    },

    /// Host rejects the request queued under `session_token`
    #[serde(rename_all = "camelCase")]
    RejectJoinRequest {
        room_code: String,
        session_token: String,
        #[serde(default)]
        reason: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    StartGame { room_code: String },

    #[serde(rename_all = "camelCase")]
    SpinWheel { room_code: String },

    #[serde(rename_all = "camelCase")]
    PlayConsonant { room_code: String, letter: String },

    #[serde(rename_all = "camelCase")]
    PlayVowel { room_code: String, letter: String },

    #[serde(rename_all = "camelCase")]
    TrySolution { room_code: String, text: String },

    #[serde(rename_all = "camelCase")]
    PassTurn { room_code: String },

    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_code: String },
}

impl ClientRequest {
    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateRoom { .. } => "createRoom",
            Self::JoinRoom { .. } => "joinRoom",
            Self::JoinAsSpectator { .. } => "joinAsSpectator",
            Self::AcceptJoinRequest { .. } => "acceptJoinRequest",
            Self::RejectJoinRequest { .. } => "rejectJoinRequest",
            Self::StartGame { .. } => "startGame",
            Self::SpinWheel { .. } => "spinWheel",
            Self::PlayConsonant { .. } => "playConsonant",
            Self::PlayVowel { .. } => "playVowel",
            Self::TrySolution { .. } => "trySolution",
            Self::PassTurn { .. } => "passTurn",
            Self::LeaveRoom { .. } => "leaveRoom",
        }
    }
}

/// Error categories reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidInput,
    NotYourTurn,
    WrongPhase,
    RoomNotFound,
    AccessDenied,
    Conflict,
    Internal,
}

/// Direct reply to a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// The request is waiting for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            error_kind: Some(kind),
            ..Default::default()
        }
    }

    /// Not joined yet: the host has to decide.
    pub fn pending(room_code: impl Into<String>) -> Self {
        Self {
            ok: false,
            pending: Some(true),
            room_code: Some(room_code.into()),
            ..Default::default()
        }
    }

    pub fn with_room(mut self, room_code: impl Into<String>, room: serde_json::Value) -> Self {
        self.room_code = Some(room_code.into());
        self.room = Some(room);
        self
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Room membership or settings changed
    RoomUpdate { room: serde_json::Value },

    /// A join request waiting for the host (sent to the host only)
    JoinRequest { request: JoinRequest },

    #[serde(rename_all = "camelCase")]
    JoinRequestAccepted {
        room: serde_json::Value,
        room_code: String,
        player_name: String,
        /// Skip the lobby, the match is already running
        in_progress: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_state: Option<GameSnapshot>,
    },

    JoinRequestRejected { message: String },

    #[serde(rename_all = "camelCase")]
    GameStart {
        room: serde_json::Value,
        room_code: String,
        game_state: GameSnapshot,
    },

    #[serde(rename_all = "camelCase")]
    GameStateUpdate { game_state: GameSnapshot },

    /// Round solved; the next one starts after `countdown` seconds
    #[serde(rename_all = "camelCase")]
    RoundWon { winner_name: String, countdown: u64 },

    GameOver { standings: Vec<Standing> },
}

impl ServerEvent {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Who an event goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Connection(ConnectionId),
    /// Every connected member of a room, spectators included
    Room(String),
}

/// An event and where to deliver it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub recipient: Recipient,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn to_connection(connection_id: ConnectionId, event: ServerEvent) -> Self {
        Self {
            recipient: Recipient::Connection(connection_id),
            event,
        }
    }

    pub fn to_room(room_code: impl Into<String>, event: ServerEvent) -> Self {
        Self {
            recipient: Recipient::Room(room_code.into()),
            event,
        }
    }
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Reply to the caller
    pub ack: Ack,
    /// Events to deliver, in order
    pub outbound: Vec<Outbound>,
}

impl Dispatch {
    pub fn reply(ack: Ack) -> Self {
        Self {
            ack,
            outbound: Vec::new(),
        }
    }

    pub fn with(mut self, outbound: Outbound) -> Self {
        self.outbound.push(outbound);
        self
    }

    /// Events addressed to a recipient.
    pub fn events_for<'a>(&'a self, recipient: &Recipient) -> impl Iterator<Item = &'a ServerEvent> + 'a {
        let recipient = recipient.clone();
        self.outbound
            .iter()
            .filter(move |o| o.recipient == recipient)
            .map(|o| &o.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_requests() {
        let create = ClientRequest::from_json(
            r#"{"type":"createRoom","playerName":"Anna","totalRounds":3,"sessionToken":"tok"}"#,
        )
        .unwrap();
        assert_eq!(
            create,
            ClientRequest::CreateRoom {
                player_name: "Anna".to_string(),
                total_rounds: 3,
                room_code: None,
                session_token: "tok".to_string(),
            }
        );
        assert_eq!(create.name(), "createRoom");

        let consonant =
            ClientRequest::from_json(r#"{"type":"playConsonant","roomCode":"ABCDE","letter":"r"}"#)
                .unwrap();
        assert_eq!(
            consonant,
            ClientRequest::PlayConsonant {
                room_code: "ABCDE".to_string(),
                letter: "r".to_string(),
            }
        );

        assert!(ClientRequest::from_json(r#"{"type":"fly","roomCode":"A"}"#).is_err());
        assert!(ClientRequest::from_json(r#"{"type":"spinWheel"}"#).is_err());
    }

    #[test]
    fn test_ack_shapes() {
        assert_eq!(serde_json::to_value(Ack::ok()).unwrap(), json!({"ok": true}));

        assert_eq!(
            serde_json::to_value(Ack::pending("ABCDE")).unwrap(),
            json!({"ok": false, "pending": true, "roomCode": "ABCDE"})
        );

        let ack = Ack::error(ErrorKind::NotYourTurn, "It's not your turn");
        assert_eq!(
            serde_json::to_value(ack).unwrap(),
            json!({"ok": false, "error": "It's not your turn", "errorKind": "notYourTurn"})
        );
    }

    #[test]
    fn test_event_tags() {
        let event = ServerEvent::RoundWon {
            winner_name: "Anna".to_string(),
            countdown: 7,
        };
        assert_eq!(
            event.to_json(),
            json!({"type": "roundWon", "winnerName": "Anna", "countdown": 7})
        );

        let event = ServerEvent::JoinRequestRejected {
            message: "no".to_string(),
        };
        assert_eq!(event.to_json()["type"], "joinRequestRejected");
    }

    #[test]
    fn test_dispatch_events_for() {
        let conn = uuid::Uuid::new_v4();
        let dispatch = Dispatch::reply(Ack::ok())
            .with(Outbound::to_room("ABCDE", ServerEvent::RoomUpdate { room: json!({}) }))
            .with(Outbound::to_connection(
                conn,
                ServerEvent::JoinRequestRejected {
                    message: "no".to_string(),
                },
            ));

        let direct = Recipient::Connection(conn);
        assert_eq!(dispatch.events_for(&direct).count(), 1);
        let room = Recipient::Room("ABCDE".to_string());
        assert_eq!(dispatch.events_for(&room).count(), 1);
    }
}
