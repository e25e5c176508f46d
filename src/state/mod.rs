//! State management module for WordWheel.
//!
//! This module provides the core state types and the dispatcher:
//!
//! - `text` - Normalization, board layout and masking
//! - `wheel` - Wheel patterns and spin resolution
//! - `game` - Round state machine and scoring
//! - `room` - Rooms, join requests and the room store
//! - `connection` - Transport connection tracking
//! - `session` - Session state machine (which screen is each client on?)
//! - `phrases` - Phrase supply
//! - `config` - Game configuration
//! - `protocol` - Wire requests, replies and events
//! - `server` - Request dispatcher tying everything together
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                             GameServer                               │
//! │                                                                      │
//! │  ┌───────────────────┐  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │ ConnectionManager │  │    RoomStore     │  │  SessionState    │  │
//! │  │                   │  │                  │  │  (per token)     │  │
//! │  │ connection id →   │  │ code →           │  │                  │  │
//! │  │   Connection      │  │   Mutex<Room>    │  │ Connected ──▶    │  │
//! │  │                   │  │                  │  │ AwaitingApproval │  │
//! │  │ session token →   │  │ Room ──▶ Game    │  │ ──▶ InLobby ──▶  │  │
//! │  │   connection id   │  │   (players,      │  │ InGame           │  │
//! │  │                   │  │    board, wheel) │  │                  │  │
//! │  └───────────────────┘  └──────────────────┘  └──────────────────┘  │
//! │                                                                      │
//! │  ClientRequest ──▶ handle() ──▶ Dispatch { Ack, Vec<Outbound> }      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use wordwheel_state::state::{
//!     game::{Game, Player, RoundRules},
//!     phrases::Phrase,
//!     wheel::WheelPattern,
//! };
//!
//! let mut game = Game::new(3, RoundRules::default());
//! game.add_player(Player::new("token-a", "Anna", None))?;
//! game.start(
//!     Phrase::new("PROVERBIO", "CHI VA PIANO"),
//!     WheelPattern::parse(&["300", "PASSA", "BANCAROTTA", "X2"])?,
//! )?;
//! let spin = game.spin("token-a", 45.0)?;
//! ```

pub mod config;
pub mod connection;
pub mod game;
pub mod phrases;
pub mod protocol;
pub mod room;
pub mod server;
pub mod session;
pub mod text;
pub mod wheel;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use connection::{Connection, ConnectionId, ConnectionManager};
pub use game::{
    Game, GameError, GameMessage, GameSnapshot, LetterPlay, MessageKind, Phase, Player,
    PlayerView, RoundChange, RoundRules, SolveResult, Standing,
};
pub use phrases::{Phrase, PhraseDeck, PhraseSource};
pub use protocol::{Ack, ClientRequest, Dispatch, ErrorKind, Outbound, Recipient, ServerEvent};
pub use room::{
    Accepted, JoinOutcome, JoinRequest, Room, RoomError, RoomStore, SharedRoom, Spectator,
};
pub use server::{GameServer, ServerError};
pub use session::{InvalidTransition, Role, SessionEvent, SessionLocation, SessionState, View};
pub use text::{normalize, Board, Position, RevealedSet};
pub use wheel::{Outcome, Segment, SpinResult, WheelError, WheelPattern};
