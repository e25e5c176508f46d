//! Request dispatcher.
//!
//! [`GameServer`] owns every room and connection and turns each
//! [`ClientRequest`] into an [`Ack`] plus the events to push. It does no I/O:
//! a transport feeds it requests and connection changes, delivers the
//! returned [`Outbound`]s and calls [`GameServer::tick`] periodically so that
//! between-rounds countdowns advance.
//!
//! Locks are taken in one direction only: a room's mutex first, then the
//! connection table, the session table, the phrase source or the RNG. The
//! room map lock is never requested while a room is held.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::{ConfigError, GameConfig};
use super::connection::{ConnectionId, ConnectionManager};
use super::game::{GameError, Phase, Player, RoundChange, RoundRules, SolveResult};
use super::phrases::{PhraseDeck, PhraseSource};
use super::protocol::{Ack, ClientRequest, Dispatch, ErrorKind, Outbound, Recipient, ServerEvent};
use super::room::{JoinOutcome, Room, RoomError, RoomStore, SharedRoom};
use super::session::{Role, SessionEvent, SessionLocation, SessionState};
use super::wheel::random_stop_angle;

const DEFAULT_REJECT_MESSAGE: &str = "The host declined your request";

/// Authoritative game server.
pub struct GameServer {
    config: GameConfig,
    rules: RoundRules,
    rooms: RoomStore,
    connections: Mutex<ConnectionManager>,
    /// Location of every session token seen so far
    sessions: Mutex<HashMap<String, SessionState>>,
    phrases: Mutex<Box<dyn PhraseSource>>,
    rng: Mutex<StdRng>,
}

impl GameServer {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let phrases = PhraseDeck::new(config.phrases.clone());
        Self::build(config, Box::new(phrases), StdRng::from_entropy())
    }

    /// Server with reproducible room codes, spins and phrase order.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let phrases = PhraseDeck::with_seed(config.phrases.clone(), seed);
        Self::build(config, Box::new(phrases), StdRng::seed_from_u64(seed))
    }

    fn build(
        config: GameConfig,
        phrases: Box<dyn PhraseSource>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules: RoundRules::from(&config),
            config,
            rooms: RoomStore::new(),
            connections: Mutex::new(ConnectionManager::new()),
            sessions: Mutex::new(HashMap::new()),
            phrases: Mutex::new(phrases),
            rng: Mutex::new(rng),
        })
    }

    /// Replace the phrase source.
    pub fn with_phrase_source(mut self, source: impl PhraseSource + 'static) -> Self {
        self.phrases = Mutex::new(Box::new(source));
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    /// Where a session currently is.
    pub fn session_location(&self, session_token: &str) -> Option<SessionLocation> {
        self.sessions
            .lock()
            .get(session_token)
            .map(|s| s.location().clone())
    }

    /// Register a new transport connection.
    pub fn connect(&self, connection_id: ConnectionId) {
        let mut connections = self.connections.lock();
        connections.open(connection_id);
        debug!(connection = %connection_id, open = connections.count(), "connection opened");
    }

    /// A transport connection closed.
    ///
    /// The member's seat, scores and turn are kept; only the connection is
    /// forgotten. The room is told even when the token already moved to a
    /// newer connection, in case the seat still points here.
    pub fn disconnect(&self, connection_id: ConnectionId) -> Vec<Outbound> {
        let (closed, orphaned) = {
            let mut connections = self.connections.lock();
            let Some(closed) = connections.close(connection_id) else {
                return Vec::new();
            };
            // The session only goes offline if no other connection carries it
            let orphaned = closed
                .session_token
                .as_deref()
                .or(closed.requested_token.as_deref())
                .filter(|token| connections.connection_for(token).is_none())
                .map(str::to_string);
            (closed, orphaned)
        };
        debug!(connection = %connection_id, "connection closed");

        if let Some(token) = orphaned {
            self.move_session(&token, SessionEvent::Disconnect, SessionLocation::Disconnected);
        }

        let Some(shared) = closed.room_code.and_then(|code| self.rooms.get(&code)) else {
            return Vec::new();
        };
        let mut room = shared.lock();
        let Some(name) = room.detach(connection_id) else {
            return Vec::new();
        };
        info!(room = %room.code, player = %name, "member disconnected");

        let mut outbound = vec![room_update(&room)];
        if room.in_progress() {
            outbound.push(state_update(&room));
        }
        outbound
    }

    /// Connections an outbound event should reach.
    pub fn recipients(&self, recipient: &Recipient) -> Vec<ConnectionId> {
        match recipient {
            Recipient::Connection(id) => vec![*id],
            Recipient::Room(code) => self
                .rooms
                .get(code)
                .map(|room| room.lock().connection_ids())
                .unwrap_or_default(),
        }
    }

    /// Advance every room whose between-rounds countdown has run out.
    pub fn tick(&self, now: DateTime<Utc>) -> Vec<Outbound> {
        let mut outbound = Vec::new();

        for code in self.rooms.codes() {
            let Some(shared) = self.rooms.get(&code) else {
                continue;
            };
            let mut room = shared.lock();
            if !room.game.round_countdown_elapsed(now) {
                continue;
            }
            let Some(wheel) = room.next_wheel(&self.config.wheel_patterns) else {
                warn!(room = %code, "no wheel patterns, round not advanced");
                continue;
            };
            let phrase = self.phrases.lock().next_phrase();

            match room.game.next_round(phrase, wheel) {
                Ok(RoundChange::Started { round }) => {
                    info!(room = %code, round, "round started");
                    outbound.push(state_update(&room));
                }
                Ok(RoundChange::GameOver) => {
                    info!(room = %code, "match over");
                    outbound.push(state_update(&room));
                    outbound.push(Outbound::to_room(
                        code.as_str(),
                        ServerEvent::GameOver {
                            standings: room.game.standings(),
                        },
                    ));
                }
                Err(err) => warn!(room = %code, error = %err, "could not advance round"),
            }
        }

        outbound
    }

    /// Handle one client request.
    pub fn handle(&self, connection_id: ConnectionId, request: ClientRequest) -> Dispatch {
        self.connections.lock().open(connection_id).touch();
        let name = request.name();

        let result = match request {
            ClientRequest::CreateRoom {
                player_name,
                total_rounds,
                room_code,
                session_token,
            } => self.create_room(
                connection_id,
                &player_name,
                total_rounds,
                room_code.as_deref(),
                &session_token,
            ),
            ClientRequest::JoinRoom {
                room_code,
                player_name,
                session_token,
            } => self.join_room(connection_id, &room_code, &player_name, &session_token, Role::Player),
            ClientRequest::JoinAsSpectator {
                room_code,
                player_name,
                session_token,
            } => self.join_room(
                connection_id,
                &room_code,
                &player_name,
                &session_token,
                Role::Spectator,
            ),
            ClientRequest::AcceptJoinRequest {
                room_code,
                session_token,
            } => self.accept_join(connection_id, &room_code, &session_token),
            ClientRequest::RejectJoinRequest {
                room_code,
                session_token,
                reason,
            } => self.reject_join(connection_id, &room_code, &session_token, reason.as_deref()),
            ClientRequest::StartGame { room_code } => self.start_game(connection_id, &room_code),
            ClientRequest::SpinWheel { room_code } => self.spin_wheel(connection_id, &room_code),
            ClientRequest::PlayConsonant { room_code, letter } => {
                self.play_consonant(connection_id, &room_code, &letter)
            }
            ClientRequest::PlayVowel { room_code, letter } => {
                self.play_vowel(connection_id, &room_code, &letter)
            }
            ClientRequest::TrySolution { room_code, text } => {
                self.try_solution(connection_id, &room_code, &text)
            }
            ClientRequest::PassTurn { room_code } => self.pass_turn(connection_id, &room_code),
            ClientRequest::LeaveRoom { room_code } => self.leave_room(connection_id, &room_code),
        };

        result.unwrap_or_else(|err| {
            debug!(connection = %connection_id, request = name, error = %err, "request rejected");
            Dispatch::reply(Ack::error(err.kind(), err.to_string()))
        })
    }

    // ---- rooms and membership ----

    fn create_room(
        &self,
        connection_id: ConnectionId,
        player_name: &str,
        total_rounds: u32,
        room_code: Option<&str>,
        session_token: &str,
    ) -> Result<Dispatch, ServerError> {
        let player_name = required(player_name, "player name is required")?;
        let session_token = required(session_token, "session token is required")?;
        if total_rounds == 0 || total_rounds > self.config.max_total_rounds {
            return Err(ServerError::InvalidInput("total rounds is out of range"));
        }

        // Drawn up front so the RNG is not held across the room map lock
        let mut code_rng = StdRng::seed_from_u64(self.rng.lock().gen());
        let host = Player::new(session_token, player_name, Some(connection_id));
        let (code, shared) = self.rooms.create(
            room_code,
            &mut code_rng,
            self.config.room_code_length,
            |code| {
                Room::new(
                    code,
                    host,
                    total_rounds,
                    self.rules.clone(),
                    self.config.max_players,
                )
            },
        )?;

        self.identify(connection_id, session_token);
        self.connections
            .lock()
            .set_room(connection_id, Some(code.clone()));
        self.move_session(
            session_token,
            SessionEvent::HostRoom {
                room_code: code.clone(),
            },
            SessionLocation::InLobby {
                room_code: code.clone(),
                role: Role::Player,
            },
        );

        let room = shared.lock();
        info!(room = %code, host = %player_name, total_rounds, "room hosted");
        Ok(Dispatch::reply(
            Ack::ok()
                .with_room(code.as_str(), room.to_json())
                .with_player_name(player_name),
        )
        .with(room_update(&room)))
    }

    fn join_room(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        player_name: &str,
        session_token: &str,
        role: Role,
    ) -> Result<Dispatch, ServerError> {
        let player_name = required(player_name, "player name is required")?;
        let session_token = required(session_token, "session token is required")?;
        let shared = self.room(room_code)?;
        let mut room = shared.lock();
        let code = room.code.clone();

        match room.request_join(connection_id, player_name, session_token, role)? {
            JoinOutcome::Rejoined { role } => {
                let in_progress = room.in_progress();
                self.identify(connection_id, session_token);
                self.connections
                    .lock()
                    .set_room(connection_id, Some(code.clone()));
                self.move_session(
                    session_token,
                    SessionEvent::Rejoin {
                        room_code: code.clone(),
                        role,
                        in_progress,
                    },
                    placed(&code, role, in_progress),
                );
                info!(room = %code, player = %player_name, "host reattached");

                let mut dispatch = Dispatch::reply(
                    Ack::ok()
                        .with_room(code.as_str(), room.to_json())
                        .with_player_name(player_name),
                )
                .with(room_update(&room));
                if in_progress {
                    dispatch = dispatch.with(Outbound::to_connection(
                        connection_id,
                        ServerEvent::GameStateUpdate {
                            game_state: room.game.snapshot(),
                        },
                    ));
                }
                // Requests that arrived while the host was away
                for request in room.pending() {
                    dispatch = dispatch.with(Outbound::to_connection(
                        connection_id,
                        ServerEvent::JoinRequest {
                            request: request.clone(),
                        },
                    ));
                }
                Ok(dispatch)
            }
            JoinOutcome::Queued(request) => {
                // The token is not bound until the host accepts
                let live = {
                    let mut connections = self.connections.lock();
                    connections.request(connection_id, session_token);
                    connections.connection_for(session_token).is_some()
                };
                // A member already connected elsewhere stays where they are
                if !live {
                    self.mark_connected(session_token);
                    self.move_session(
                        session_token,
                        SessionEvent::RequestJoin {
                            room_code: code.clone(),
                            role: request.role,
                        },
                        SessionLocation::AwaitingApproval {
                            room_code: code.clone(),
                            role: request.role,
                        },
                    );
                }

                let mut dispatch =
                    Dispatch::reply(Ack::pending(code.as_str()).with_player_name(player_name));
                if let Some(host) = room.host_connection() {
                    dispatch = dispatch
                        .with(Outbound::to_connection(host, ServerEvent::JoinRequest { request }));
                }
                Ok(dispatch)
            }
        }
    }

    fn accept_join(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        requester: &str,
    ) -> Result<Dispatch, ServerError> {
        let host_token = self.actor(connection_id)?;
        let shared = self.room(room_code)?;
        let mut room = shared.lock();
        let code = room.code.clone();

        let accepted = room.accept(&host_token, requester)?;
        let in_progress = accepted.in_progress;
        let asking = accepted.request.connection_id;

        // The asking connection may have closed while the host decided
        let still_waiting = self.connections.lock().requested_by(asking) == Some(requester);
        let target = if still_waiting {
            self.identify(asking, requester);
            Some(asking)
        } else {
            self.connections.lock().connection_for(requester)
        };
        match target {
            Some(current) => {
                room.attach(requester, current);
                self.connections.lock().set_room(current, Some(code.clone()));
            }
            None => {
                room.detach(asking);
            }
        }
        self.move_session(
            requester,
            SessionEvent::Accepted { in_progress },
            placed(&code, accepted.role, in_progress),
        );

        let room_json = room.to_json();
        let mut dispatch =
            Dispatch::reply(Ack::ok().with_room(code.as_str(), room_json.clone()));
        if let Some(current) = target {
            dispatch = dispatch.with(Outbound::to_connection(
                current,
                ServerEvent::JoinRequestAccepted {
                    room: room_json.clone(),
                    room_code: code.clone(),
                    player_name: accepted.request.player_name.clone(),
                    in_progress,
                    game_state: in_progress.then(|| room.game.snapshot()),
                },
            ));
        }
        dispatch = dispatch.with(Outbound::to_room(
            code.as_str(),
            ServerEvent::RoomUpdate { room: room_json },
        ));
        if in_progress && accepted.role == Role::Player {
            dispatch = dispatch.with(state_update(&room));
        }
        Ok(dispatch)
    }

    fn reject_join(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        requester: &str,
        reason: Option<&str>,
    ) -> Result<Dispatch, ServerError> {
        let host_token = self.actor(connection_id)?;
        let shared = self.room(room_code)?;
        let mut room = shared.lock();
        let request = room.reject(&host_token, requester)?;

        let (still_waiting, live) = {
            let mut connections = self.connections.lock();
            let waiting = connections.requested_by(request.connection_id) == Some(requester);
            if waiting {
                connections.clear_request(request.connection_id);
            }
            (waiting, connections.connection_for(requester).is_some())
        };
        if !live {
            self.move_session(requester, SessionEvent::Rejected, SessionLocation::Connected);
        }

        let message = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REJECT_MESSAGE)
            .to_string();

        let mut dispatch = Dispatch::reply(Ack::ok());
        if still_waiting {
            dispatch = dispatch.with(Outbound::to_connection(
                request.connection_id,
                ServerEvent::JoinRequestRejected { message },
            ));
        }
        Ok(dispatch)
    }

    fn leave_room(&self, connection_id: ConnectionId, room_code: &str) -> Result<Dispatch, ServerError> {
        let token = self.actor(connection_id)?;
        let shared = self.room(room_code)?;

        let (code, dispatch) = {
            let mut room = shared.lock();
            let has_request = room.pending().iter().any(|r| r.session_token == token);
            if room.role_of(&token).is_none() && !has_request {
                return Err(RoomError::NotMember.into());
            }
            let role = room.leave(&token);
            info!(room = %room.code, ?role, "member left");

            let mut dispatch = Dispatch::reply(Ack::ok()).with(room_update(&room));
            if room.in_progress() && role == Some(Role::Player) {
                dispatch = dispatch.with(state_update(&room));
            }
            (room.code.clone(), dispatch)
        };

        self.connections.lock().set_room(connection_id, None);
        self.move_session(&token, SessionEvent::LeaveRoom, SessionLocation::Connected);
        self.rooms.remove_if_empty(&code);
        Ok(dispatch)
    }

    // ---- match ----

    fn start_game(&self, connection_id: ConnectionId, room_code: &str) -> Result<Dispatch, ServerError> {
        let token = self.actor(connection_id)?;
        let shared = self.room(room_code)?;
        let mut room = shared.lock();

        if !room.is_host(&token) {
            return Err(RoomError::NotHost.into());
        }
        if room.game.phase != Phase::Lobby {
            return Err(GameError::WrongPhase(room.game.phase).into());
        }
        let wheel = room
            .next_wheel(&self.config.wheel_patterns)
            .ok_or(ServerError::NoWheelPatterns)?;
        let phrase = self.phrases.lock().next_phrase();
        room.start(&token, phrase, wheel)?;

        let code = room.code.clone();
        let members: Vec<(String, Role)> = room
            .players()
            .iter()
            .map(|p| (p.session_token.clone(), Role::Player))
            .chain(
                room.spectators()
                    .iter()
                    .map(|s| (s.session_token.clone(), Role::Spectator)),
            )
            .collect();
        for (member, role) in members {
            self.move_session(
                &member,
                SessionEvent::GameStarted,
                SessionLocation::InGame {
                    room_code: code.clone(),
                    role,
                },
            );
        }
        info!(room = %code, players = room.players().len(), "match started");

        Ok(Dispatch::reply(Ack::ok()).with(Outbound::to_room(
            code.as_str(),
            ServerEvent::GameStart {
                room: room.to_json(),
                room_code: code.clone(),
                game_state: room.game.snapshot(),
            },
        )))
    }

    fn spin_wheel(&self, connection_id: ConnectionId, room_code: &str) -> Result<Dispatch, ServerError> {
        self.with_member_room(connection_id, room_code, |room, token| {
            let angle = random_stop_angle(&mut *self.rng.lock());
            let spin = room.game.spin(token, angle)?;
            info!(
                room = %room.code,
                outcome = spin.outcome.as_str(),
                segment = spin.segment_index,
                phase = %room.game.phase,
                "wheel spun"
            );
            Ok(Dispatch::reply(Ack::ok()).with(state_update(room)))
        })
    }

    fn play_consonant(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        letter: &str,
    ) -> Result<Dispatch, ServerError> {
        self.with_member_room(connection_id, room_code, |room, token| {
            let play = room.game.play_consonant(token, letter)?;
            debug!(
                room = %room.code,
                letter = %play.letter,
                count = play.count,
                gained = play.gained,
                burned = play.burned,
                "consonant played"
            );
            Ok(Dispatch::reply(Ack::ok()).with(state_update(room)))
        })
    }

    fn play_vowel(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        letter: &str,
    ) -> Result<Dispatch, ServerError> {
        self.with_member_room(connection_id, room_code, |room, token| {
            let play = room.game.buy_vowel(token, letter)?;
            debug!(room = %room.code, letter = %play.letter, count = play.count, "vowel bought");
            Ok(Dispatch::reply(Ack::ok()).with(state_update(room)))
        })
    }

    fn try_solution(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        text: &str,
    ) -> Result<Dispatch, ServerError> {
        self.with_member_room(connection_id, room_code, |room, token| {
            let dispatch = Dispatch::reply(Ack::ok());
            match room.game.try_solve(token, text)? {
                SolveResult::Solved {
                    winner,
                    credited,
                    countdown,
                } => {
                    info!(room = %room.code, player = %winner, credited, round = room.game.current_round, "round solved");
                    Ok(dispatch.with(state_update(room)).with(Outbound::to_room(
                        room.code.as_str(),
                        ServerEvent::RoundWon {
                            winner_name: winner,
                            countdown: countdown.as_secs(),
                        },
                    )))
                }
                SolveResult::Wrong => {
                    debug!(room = %room.code, "wrong solution");
                    Ok(dispatch.with(state_update(room)))
                }
            }
        })
    }

    fn pass_turn(&self, connection_id: ConnectionId, room_code: &str) -> Result<Dispatch, ServerError> {
        self.with_member_room(connection_id, room_code, |room, token| {
            room.game.pass_turn(token)?;
            Ok(Dispatch::reply(Ack::ok()).with(state_update(room)))
        })
    }

    // ---- helpers ----

    fn room(&self, room_code: &str) -> Result<SharedRoom, ServerError> {
        self.rooms
            .get(room_code)
            .ok_or_else(|| RoomError::NotFound(room_code.trim().to_uppercase()).into())
    }

    /// Session token bound to a connection.
    fn actor(&self, connection_id: ConnectionId) -> Result<String, ServerError> {
        self.connections
            .lock()
            .session_of(connection_id)
            .map(str::to_string)
            .ok_or(ServerError::NotIdentified)
    }

    /// Run a game action with the room locked.
    fn with_member_room<T>(
        &self,
        connection_id: ConnectionId,
        room_code: &str,
        f: impl FnOnce(&mut Room, &str) -> Result<T, ServerError>,
    ) -> Result<T, ServerError> {
        let token = self.actor(connection_id)?;
        let shared = self.room(room_code)?;
        let mut room = shared.lock();
        f(&mut room, &token)
    }

    /// Bind a token to a connection and mark its session connected.
    fn identify(&self, connection_id: ConnectionId, session_token: &str) {
        if let Some(previous) = self.connections.lock().bind(connection_id, session_token) {
            debug!(connection = %connection_id, replaced = %previous, "session moved to a new connection");
        }
        self.mark_connected(session_token);
    }

    /// Bring a session online, creating it on first sight.
    fn mark_connected(&self, session_token: &str) {
        let mut sessions = self.sessions.lock();
        let state = sessions.entry(session_token.to_string()).or_default();
        if state.location().is_connected() {
            return;
        }
        if let Err(err) = state.apply_mut(SessionEvent::Connect) {
            debug!(error = %err, "session out of step, resetting");
            *state = SessionState::at(SessionLocation::Connected);
        }
    }

    /// Apply a session event, falling back to `fallback` if the session was
    /// out of step. Disconnected sessions stay put.
    fn move_session(&self, session_token: &str, event: SessionEvent, fallback: SessionLocation) {
        let mut sessions = self.sessions.lock();
        let Some(state) = sessions.get_mut(session_token) else {
            return;
        };
        if !state.location().is_connected() {
            return;
        }
        if let Err(err) = state.apply_mut(event) {
            debug!(error = %err, "session out of step, resetting");
            *state = SessionState::at(fallback);
        }
    }
}

fn required<'a>(value: &'a str, what: &'static str) -> Result<&'a str, ServerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServerError::InvalidInput(what));
    }
    Ok(value)
}

fn placed(room_code: &str, role: Role, in_progress: bool) -> SessionLocation {
    let room_code = room_code.to_string();
    if in_progress {
        SessionLocation::InGame { room_code, role }
    } else {
        SessionLocation::InLobby { room_code, role }
    }
}

fn room_update(room: &Room) -> Outbound {
    Outbound::to_room(
        room.code.as_str(),
        ServerEvent::RoomUpdate {
            room: room.to_json(),
        },
    )
}

fn state_update(room: &Room) -> Outbound {
    Outbound::to_room(
        room.code.as_str(),
        ServerEvent::GameStateUpdate {
            game_state: room.game.snapshot(),
        },
    )
}

/// Errors returned to clients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Join or create a room first")]
    NotIdentified,
    #[error("No wheel patterns configured")]
    NoWheelPatterns,
    #[error(transparent)]
    Room(#[from] RoomError),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotIdentified => ErrorKind::AccessDenied,
            Self::NoWheelPatterns => ErrorKind::Internal,
            Self::Room(err) => room_error_kind(err),
            Self::Game(err) => game_error_kind(err),
        }
    }
}

fn room_error_kind(err: &RoomError) -> ErrorKind {
    match err {
        RoomError::NotFound(_) => ErrorKind::RoomNotFound,
        RoomError::InvalidCode => ErrorKind::InvalidInput,
        RoomError::CodeTaken(_) | RoomError::Full | RoomError::NoSuchRequest => ErrorKind::Conflict,
        RoomError::NotHost | RoomError::NotMember => ErrorKind::AccessDenied,
        RoomError::Game(err) => game_error_kind(err),
    }
}

fn game_error_kind(err: &GameError) -> ErrorKind {
    match err {
        GameError::InvalidInput(_)
        | GameError::InsufficientScore { .. }
        | GameError::LetterAlreadyUsed(_) => ErrorKind::InvalidInput,
        GameError::NotYourTurn => ErrorKind::NotYourTurn,
        GameError::WrongPhase(_) | GameError::NotEnoughPlayers => ErrorKind::WrongPhase,
        GameError::NotPlayer => ErrorKind::AccessDenied,
        GameError::AlreadyPlayer => ErrorKind::Conflict,
        GameError::Wheel(_) => ErrorKind::Internal,
    }
}
