//! Session state machine.
//!
//! Tracks where a session token is in the system, which is what decides the
//! screen its client shows.
//!
//! # State Diagram
//!
//! ```text
//! ┌──────────────┐
//! │ Disconnected │◀─────────────────────────────────────────┐
//! └──────┬───────┘                                          │
//!        │ connect                                          │ disconnect
//!        ▼                                                  │ (from any)
//! ┌──────────────┐  request_join  ┌──────────────────┐      │
//! │  Connected   │───────────────▶│ AwaitingApproval │      │
//! └──┬───────────┘◀── rejected ───└────────┬─────────┘      │
//!    │    ▲                                │ accepted       │
//!    │    │ leave                          ├──────────┐     │
//!    │    │                     not started│          │started
//!    │ host_room / rejoin                  ▼          ▼     │
//!    │    │                        ┌─────────┐ start ┌────────┐
//!    └────┼───────────────────────▶│ InLobby │──────▶│ InGame │
//!         │                        └─────────┘       └────────┘
//!         └──────────────────────────────┴────────────────┘
//! ```
//!
//! An accepted request for a match that is already running goes straight to
//! `InGame`, skipping the lobby.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a session takes part as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Spectator,
}

/// Client screen for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Menu,
    Pending,
    Lobby,
    Game,
}

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionLocation {
    /// No live connection
    #[default]
    Disconnected,

    /// Connected, not in any room
    Connected,

    /// Waiting for the host to accept a join request
    AwaitingApproval { room_code: String, role: Role },

    /// In a room whose match has not started
    InLobby { room_code: String, role: Role },

    /// In a room with a running (or finished) match
    InGame { room_code: String, role: Role },
}

impl SessionLocation {
    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }

    pub fn room_code(&self) -> Option<&str> {
        match self {
            Self::AwaitingApproval { room_code, .. }
            | Self::InLobby { room_code, .. }
            | Self::InGame { room_code, .. } => Some(room_code),
            _ => None,
        }
    }

    pub fn view(&self) -> View {
        match self {
            Self::Disconnected | Self::Connected => View::Menu,
            Self::AwaitingApproval { .. } => View::Pending,
            Self::InLobby { .. } => View::Lobby,
            Self::InGame { .. } => View::Game,
        }
    }
}

impl fmt::Display for SessionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connected => write!(f, "Connected"),
            Self::AwaitingApproval { room_code, .. } => write!(f, "AwaitingApproval({})", room_code),
            Self::InLobby { room_code, .. } => write!(f, "InLobby({})", room_code),
            Self::InGame { room_code, .. } => write!(f, "InGame({})", room_code),
        }
    }
}

/// State transition events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connect,
    Disconnect,
    /// Created a room and became its host
    HostRoom { room_code: String },
    /// Re-attached to a room without approval (the host coming back)
    Rejoin {
        room_code: String,
        role: Role,
        in_progress: bool,
    },
    RequestJoin { room_code: String, role: Role },
    Accepted { in_progress: bool },
    Rejected,
    GameStarted,
    LeaveRoom,
}

/// Error when a state transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transition from {from} via {event:?}: {reason}")]
pub struct InvalidTransition {
    pub from: SessionLocation,
    pub event: SessionEvent,
    pub reason: &'static str,
}

/// Session state machine.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    location: SessionLocation,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state at a specific location (for restoring state).
    pub fn at(location: SessionLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &SessionLocation {
        &self.location
    }

    pub fn view(&self) -> View {
        self.location.view()
    }

    /// Apply an event, returning the new state or an error.
    pub fn apply(&self, event: SessionEvent) -> Result<Self, InvalidTransition> {
        Ok(Self {
            location: self.transition(&event)?,
        })
    }

    /// Apply an event in place.
    pub fn apply_mut(&mut self, event: SessionEvent) -> Result<(), InvalidTransition> {
        self.location = self.transition(&event)?;
        Ok(())
    }

    fn transition(&self, event: &SessionEvent) -> Result<SessionLocation, InvalidTransition> {
        use SessionEvent::*;
        use SessionLocation::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self.location.clone(),
            event: event.clone(),
            reason,
        };

        let placed = |room_code: &str, role: Role, in_progress: bool| {
            let room_code = room_code.to_string();
            if in_progress {
                InGame { room_code, role }
            } else {
                InLobby { room_code, role }
            }
        };

        match (&self.location, event) {
            (Disconnected, Connect) => Ok(Connected),
            (_, Connect) => Err(invalid("Already connected")),

            (Disconnected, Disconnect) => Err(invalid("Already disconnected")),
            (_, Disconnect) => Ok(Disconnected),

            (Disconnected, _) => Err(invalid("Must connect first")),

            (Connected, HostRoom { room_code }) => Ok(InLobby {
                room_code: room_code.clone(),
                role: Role::Player,
            }),
            (_, HostRoom { .. }) => Err(invalid("Must leave the current room first")),

            (
                Connected,
                Rejoin {
                    room_code,
                    role,
                    in_progress,
                },
            ) => Ok(placed(room_code.as_str(), *role, *in_progress)),
            (_, Rejoin { .. }) => Err(invalid("Must leave the current room first")),

            (Connected | AwaitingApproval { .. }, RequestJoin { room_code, role }) => {
                Ok(AwaitingApproval {
                    room_code: room_code.clone(),
                    role: *role,
                })
            }
            (_, RequestJoin { .. }) => Err(invalid("Must leave the current room first")),

            (AwaitingApproval { room_code, role }, Accepted { in_progress }) => {
                Ok(placed(room_code.as_str(), *role, *in_progress))
            }
            (_, Accepted { .. }) => Err(invalid("No pending join request")),

            (AwaitingApproval { .. }, Rejected) => Ok(Connected),
            (_, Rejected) => Err(invalid("No pending join request")),

            (InLobby { room_code, role }, GameStarted) => Ok(InGame {
                room_code: room_code.clone(),
                role: *role,
            }),
            (InGame { .. }, GameStarted) => Err(invalid("Already in a game")),
            (_, GameStarted) => Err(invalid("Not in a room")),

            (AwaitingApproval { .. } | InLobby { .. } | InGame { .. }, LeaveRoom) => Ok(Connected),
            (_, LeaveRoom) => Err(invalid("Not in a room")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> SessionState {
        SessionState::new().apply(SessionEvent::Connect).unwrap()
    }

    fn request(room: &str, role: Role) -> SessionEvent {
        SessionEvent::RequestJoin {
            room_code: room.to_string(),
            role,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert!(!state.location().is_connected());
        assert_eq!(state.view(), View::Menu);
    }

    #[test]
    fn test_host_flow() {
        let mut state = connected();
        state
            .apply_mut(SessionEvent::HostRoom {
                room_code: "ABCDE".to_string(),
            })
            .unwrap();
        assert_eq!(state.view(), View::Lobby);
        assert_eq!(state.location().room_code(), Some("ABCDE"));

        state.apply_mut(SessionEvent::GameStarted).unwrap();
        assert_eq!(state.view(), View::Game);

        state.apply_mut(SessionEvent::LeaveRoom).unwrap();
        assert_eq!(*state.location(), SessionLocation::Connected);
    }

    #[test]
    fn test_accept_before_start_goes_to_lobby() {
        let mut state = connected();
        state.apply_mut(request("ABCDE", Role::Player)).unwrap();
        assert_eq!(state.view(), View::Pending);

        state
            .apply_mut(SessionEvent::Accepted { in_progress: false })
            .unwrap();
        assert_eq!(
            *state.location(),
            SessionLocation::InLobby {
                room_code: "ABCDE".to_string(),
                role: Role::Player
            }
        );
    }

    #[test]
    fn test_accept_during_match_skips_lobby() {
        let mut state = connected();
        state.apply_mut(request("ABCDE", Role::Spectator)).unwrap();
        state
            .apply_mut(SessionEvent::Accepted { in_progress: true })
            .unwrap();
        assert_eq!(
            *state.location(),
            SessionLocation::InGame {
                room_code: "ABCDE".to_string(),
                role: Role::Spectator
            }
        );
    }

    #[test]
    fn test_reject_and_disconnect() {
        let mut state = connected();
        state.apply_mut(request("ABCDE", Role::Player)).unwrap();
        state.apply_mut(SessionEvent::Rejected).unwrap();
        assert_eq!(state.view(), View::Menu);

        state.apply_mut(request("ABCDE", Role::Player)).unwrap();
        state.apply_mut(SessionEvent::Disconnect).unwrap();
        assert!(!state.location().is_connected());

        // A dropped client reconnects and asks to rejoin
        state.apply_mut(SessionEvent::Connect).unwrap();
        state
            .apply_mut(SessionEvent::Rejoin {
                room_code: "ABCDE".to_string(),
                role: Role::Player,
                in_progress: true,
            })
            .unwrap();
        assert_eq!(state.view(), View::Game);
    }

    #[test]
    fn test_invalid_transitions() {
        let state = SessionState::new();
        assert!(state.apply(request("ABCDE", Role::Player)).is_err());

        let connected = connected();
        assert!(connected.apply(SessionEvent::Connect).is_err());
        assert!(connected
            .apply(SessionEvent::Accepted { in_progress: true })
            .is_err());
        assert!(connected.apply(SessionEvent::GameStarted).is_err());

        let err = connected.apply(SessionEvent::LeaveRoom).unwrap_err();
        assert_eq!(err.reason, "Not in a room");
        assert!(err.to_string().starts_with("Invalid transition from Connected"));
    }
}
