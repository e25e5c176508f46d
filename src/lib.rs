//! WordWheel State Library
//!
//! This crate provides the authoritative state for WordWheel, a multiplayer
//! wheel-and-letters phrase guessing game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Text & Board Engine** - Accent and case insensitive normalization,
//!   word-wrapped board layout and letter masking.
//!
//! - **Wheel Resolver** - Turns a stop angle into a segment and an outcome
//!   (points, pass, bankrupt, double, or a custom label).
//!
//! - **Round State Machine** - Turns, letter plays, vowel purchases, solves and
//!   round rollover with validated phase transitions.
//!
//! - **Rooms & Sessions** - Host approved joins, spectators, reconnection by
//!   session token and a per-room lock.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Actions that are not allowed in
//!    the current phase are rejected with clear errors and change nothing.
//!
//! 2. **Identity is the session token** - Connections come and go; scores and
//!    turn order follow the token.
//!
//! 3. **No networking** - This crate is pure state, no WebSocket or HTTP.
//!
//! 4. **Serialization-ready** - Requests, replies and events are JSON via serde.
//!
//! # Example
//!
//! ```rust
//! use wordwheel_state::{ClientRequest, GameConfig, GameServer, ServerEvent};
//! use uuid::Uuid;
//!
//! let server = GameServer::with_seed(GameConfig::default(), 7).unwrap();
//!
//! let host = Uuid::new_v4();
//! server.connect(host);
//! let created = server.handle(host, ClientRequest::CreateRoom {
//!     player_name: "Anna".to_string(),
//!     total_rounds: 2,
//!     room_code: Some("sala1".to_string()),
//!     session_token: "token-anna".to_string(),
//! });
//! assert!(created.ack.ok);
//! assert_eq!(created.ack.room_code.as_deref(), Some("SALA1"));
//!
//! let started = server.handle(host, ClientRequest::StartGame {
//!     room_code: "SALA1".to_string(),
//! });
//! assert!(started.ack.ok);
//! assert!(matches!(started.outbound[0].event, ServerEvent::GameStart { .. }));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
