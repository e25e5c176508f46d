//! Round state machine.
//!
//! A [`Game`] is the authoritative match state of one room: players in turn
//! order, their scores, the phrase on the board and the phase of the current
//! round.
//!
//! # Phases
//!
//! ```text
//!  Lobby ──start──▶ MustSpin ──spin(points|double)──▶ AwaitingConsonant
//!                    ▲  │ ▲                                  │
//!                    │  │ └──── consonant / pass / miss ─────┘
//!                    │  │
//!                    │  └── correct solution ──▶ BetweenRounds
//!                    │                               │ next_round
//!                    └───────────────────────────────┤
//!                                                    ▼
//!                                              GameOver (after last round)
//! ```
//!
//! Every action is checked in the same order: the phase must accept actions
//! at all, the actor must be a player, it must be their turn, the phase must
//! accept this action, and only then is the input validated. A rejected
//! action never changes state.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GameConfig;
use super::connection::ConnectionId;
use super::phrases::Phrase;
use super::text::{self, Board, Position, RevealedSet};
use super::wheel::{Outcome, SpinResult, WheelError, WheelPattern};

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Match created but not started
    #[default]
    Lobby,
    /// Current player must spin (or buy a vowel, solve, pass)
    MustSpin,
    /// Wheel landed on points or double; current player picks a consonant
    AwaitingConsonant,
    /// Round solved, waiting for the countdown
    BetweenRounds,
    /// All rounds played
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lobby => "lobby",
            Self::MustSpin => "must-spin",
            Self::AwaitingConsonant => "awaiting-consonant",
            Self::BetweenRounds => "between-rounds",
            Self::GameOver => "game-over",
        }
    }

    /// Check if players can act.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::MustSpin | Self::AwaitingConsonant)
    }

    /// Check if the match has started.
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::Lobby)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player in the match. Identified by session token, never by connection.
#[derive(Debug, Clone)]
pub struct Player {
    pub session_token: String,
    /// Current connection, `None` while disconnected
    pub connection_id: Option<ConnectionId>,
    pub name: String,
    /// Reset at the start of every round
    pub round_score: u32,
    /// Kept across rounds, zeroed by bankrupt
    pub total_score: u32,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        session_token: impl Into<String>,
        name: impl Into<String>,
        connection_id: Option<ConnectionId>,
    ) -> Self {
        Self {
            session_token: session_token.into(),
            connection_id,
            name: name.into(),
            round_score: 0,
            total_score: 0,
            joined_at: Utc::now(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_id.is_some()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            name: self.name.clone(),
            connection_id: self.connection_id,
            round_score: self.round_score,
            total_score: self.total_score,
            connected: self.is_connected(),
        }
    }
}

/// Scoring and layout rules of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRules {
    pub vowel_cost: u32,
    pub solve_bonus: u32,
    pub countdown: Duration,
    pub board_columns: usize,
    pub board_rows: usize,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for RoundRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            vowel_cost: config.vowel_cost,
            solve_bonus: config.solve_bonus,
            countdown: config.round_countdown(),
            board_columns: config.board_columns,
            board_rows: config.board_rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

/// Banner text describing the last thing that happened.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
}

impl GameMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Result of a consonant or vowel play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPlay {
    pub letter: char,
    /// Occurrences in the phrase
    pub count: usize,
    /// Points added (consonants only)
    pub gained: u32,
    /// Letter had already been called this round
    pub burned: bool,
}

impl LetterPlay {
    pub fn is_hit(&self) -> bool {
        !self.burned && self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Solved {
        winner: String,
        credited: u32,
        countdown: Duration,
    },
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundChange {
    Started { round: u32 },
    GameOver,
}

/// Final ranking entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub name: String,
    pub total_score: u32,
}

/// Match state of one room.
#[derive(Debug, Clone)]
pub struct Game {
    /// Players in turn order
    players: Vec<Player>,

    /// Index into `players` of whoever holds the turn
    pub current_player_index: usize,

    /// Current round (1-indexed, 0 before the match starts)
    pub current_round: u32,

    pub total_rounds: u32,

    pub phase: Phase,

    pub phrase: Option<Phrase>,

    pub wheel: Option<WheelPattern>,

    board: Board,

    pub revealed: RevealedSet,

    /// Letters called this round, hit or miss
    pub used_letters: BTreeSet<char>,

    /// Current player's next consonant hit doubles their round score first
    pub pending_double: bool,

    /// Value of the last points segment landed on
    pub last_spin_target: Option<u32>,

    pub last_spin: Option<SpinResult>,

    /// Cells uncovered by the last reveal, in animation order
    pub last_reveal: Vec<Position>,

    pub round_winner: Option<String>,

    /// When the between-rounds countdown runs out
    pub next_round_at: Option<DateTime<Utc>>,

    pub message: GameMessage,

    rules: RoundRules,
}

impl Game {
    pub fn new(total_rounds: u32, rules: RoundRules) -> Self {
        Self {
            players: Vec::new(),
            current_player_index: 0,
            current_round: 0,
            total_rounds,
            phase: Phase::Lobby,
            phrase: None,
            wheel: None,
            board: Board::new("", rules.board_columns, rules.board_rows),
            revealed: RevealedSet::new(),
            used_letters: BTreeSet::new(),
            pending_double: false,
            last_spin_target: None,
            last_spin: None,
            last_reveal: Vec::new(),
            round_winner: None,
            next_round_at: None,
            message: GameMessage::new(MessageKind::Info, "Waiting for the host to start"),
            rules,
        }
    }

    /// New game whose first seat belongs to the host.
    pub fn hosted_by(host: Player, total_rounds: u32, rules: RoundRules) -> Self {
        let mut game = Self::new(total_rounds, rules);
        game.players.push(host);
        game
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    // ---- players ----

    /// Add a player at the end of the turn order.
    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.has_player(&player.session_token) {
            return Err(GameError::AlreadyPlayer);
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player, keeping the turn index in range.
    pub fn remove_player(&mut self, session_token: &str) -> Option<Player> {
        let idx = self.player_index(session_token)?;
        let player = self.players.remove(idx);

        if self.players.is_empty() {
            self.current_player_index = 0;
            if self.phase.is_active() {
                self.phase = Phase::GameOver;
            }
        } else if idx < self.current_player_index {
            self.current_player_index -= 1;
        } else if idx == self.current_player_index {
            if self.current_player_index >= self.players.len() {
                self.current_player_index = 0;
            }
            if self.phase.is_active() {
                self.phase = Phase::MustSpin;
                self.pending_double = false;
            }
        }

        Some(player)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_index(&self, session_token: &str) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.session_token == session_token)
    }

    pub fn has_player(&self, session_token: &str) -> bool {
        self.player_index(session_token).is_some()
    }

    pub fn get_player(&self, session_token: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.session_token == session_token)
    }

    pub fn get_player_mut(&mut self, session_token: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.session_token == session_token)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn is_player_turn(&self, session_token: &str) -> bool {
        self.current_player()
            .is_some_and(|p| p.session_token == session_token)
    }

    /// Point a player record at a new connection.
    pub fn attach_connection(&mut self, session_token: &str, connection_id: ConnectionId) -> bool {
        match self.get_player_mut(session_token) {
            Some(p) => {
                p.connection_id = Some(connection_id);
                true
            }
            None => false,
        }
    }

    /// Forget a dropped connection. The player keeps their seat and turn.
    pub fn detach_connection(&mut self, connection_id: ConnectionId) -> Option<&Player> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.connection_id == Some(connection_id))?;
        player.connection_id = None;
        Some(player)
    }

    /// Players sorted by total score, best first.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing {
                name: p.name.clone(),
                total_score: p.total_score,
            })
            .collect();
        standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        standings
    }

    // ---- round lifecycle ----

    /// Start round 1.
    pub fn start(&mut self, phrase: Phrase, wheel: WheelPattern) -> Result<(), GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::WrongPhase(self.phase));
        }
        if self.players.is_empty() {
            return Err(GameError::NotEnoughPlayers);
        }
        self.current_round = 1;
        self.current_player_index = 0;
        self.begin_round(phrase, wheel);
        Ok(())
    }

    /// Leave the between-rounds pause: next round or game over.
    pub fn next_round(
        &mut self,
        phrase: Phrase,
        wheel: WheelPattern,
    ) -> Result<RoundChange, GameError> {
        if self.phase != Phase::BetweenRounds {
            return Err(GameError::WrongPhase(self.phase));
        }
        self.current_round += 1;
        self.next_round_at = None;

        if self.current_round > self.total_rounds {
            self.phase = Phase::GameOver;
            self.pending_double = false;
            let text = match self.standings().first() {
                Some(best) => format!("Game over! {} wins with {}", best.name, best.total_score),
                None => "Game over!".to_string(),
            };
            self.message = GameMessage::new(MessageKind::Success, text);
            return Ok(RoundChange::GameOver);
        }

        self.begin_round(phrase, wheel);
        Ok(RoundChange::Started {
            round: self.current_round,
        })
    }

    /// Check if the between-rounds countdown has run out.
    pub fn round_countdown_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.phase == Phase::BetweenRounds && self.next_round_at.is_some_and(|at| now >= at)
    }

    fn begin_round(&mut self, phrase: Phrase, wheel: WheelPattern) {
        for p in &mut self.players {
            p.round_score = 0;
        }
        if self.current_player_index >= self.players.len() {
            self.current_player_index = 0;
        }
        self.board = Board::new(&phrase.text, self.rules.board_columns, self.rules.board_rows);
        self.revealed.clear();
        self.used_letters.clear();
        self.pending_double = false;
        self.last_spin_target = None;
        self.last_spin = None;
        self.last_reveal.clear();
        self.round_winner = None;
        self.next_round_at = None;
        self.message = GameMessage::new(
            MessageKind::Info,
            format!(
                "Round {} of {}: {}",
                self.current_round, self.total_rounds, phrase.category
            ),
        );
        self.phrase = Some(phrase);
        self.wheel = Some(wheel);
        self.phase = Phase::MustSpin;
    }

    fn advance_turn(&mut self) {
        if !self.players.is_empty() {
            self.current_player_index = (self.current_player_index + 1) % self.players.len();
        }
        self.pending_double = false;
        self.phase = Phase::MustSpin;
    }

    fn reveal(&mut self, letter: char) {
        self.revealed.insert(letter);
        self.last_reveal = self.board.occurrences(letter);
    }

    /// Validate who is acting and when. Returns the actor's index.
    fn begin_action(&self, session_token: &str, allowed: &[Phase]) -> Result<usize, GameError> {
        if !self.phase.is_active() {
            return Err(GameError::WrongPhase(self.phase));
        }
        let idx = self
            .player_index(session_token)
            .ok_or(GameError::NotPlayer)?;
        if idx != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }
        if !allowed.contains(&self.phase) {
            return Err(GameError::WrongPhase(self.phase));
        }
        Ok(idx)
    }

    fn phrase_text(&self) -> &str {
        self.phrase.as_ref().map(|p| p.text.as_str()).unwrap_or("")
    }

    // ---- actions ----

    /// Apply a spin that stopped at `angle`.
    pub fn spin(&mut self, session_token: &str, angle: f64) -> Result<SpinResult, GameError> {
        let idx = self.begin_action(session_token, &[Phase::MustSpin])?;
        let wheel = self.wheel.as_ref().ok_or(GameError::WrongPhase(self.phase))?;
        let result = wheel.resolve(angle)?;
        let name = self.players[idx].name.clone();

        match &result.outcome {
            Outcome::Points { value } => {
                self.last_spin_target = Some(*value);
                self.phase = Phase::AwaitingConsonant;
                self.message = GameMessage::new(
                    MessageKind::Info,
                    format!("{name} spun {value}: call a consonant"),
                );
            }
            Outcome::Double => {
                self.pending_double = true;
                self.phase = Phase::AwaitingConsonant;
                self.message = GameMessage::new(
                    MessageKind::Success,
                    format!("{name} spun X2: the next good consonant doubles the round score"),
                );
            }
            Outcome::Pass => {
                self.advance_turn();
                self.message =
                    GameMessage::new(MessageKind::Warning, format!("{name} spun PASS"));
            }
            Outcome::Bankrupt => {
                let player = &mut self.players[idx];
                player.round_score = 0;
                player.total_score = 0;
                self.advance_turn();
                self.message =
                    GameMessage::new(MessageKind::Danger, format!("{name} went bankrupt"));
            }
            Outcome::Custom { label } => {
                self.message = GameMessage::new(
                    MessageKind::Info,
                    format!("{name} spun {label}: spin again"),
                );
            }
        }

        self.last_spin = Some(result.clone());
        Ok(result)
    }

    /// Call a consonant after a points or double spin.
    pub fn play_consonant(
        &mut self,
        session_token: &str,
        letter: &str,
    ) -> Result<LetterPlay, GameError> {
        let idx = self.begin_action(session_token, &[Phase::AwaitingConsonant])?;
        let letter = text::parse_single_letter(letter)
            .ok_or(GameError::InvalidInput("a consonant is a single letter"))?;
        if text::is_vowel(letter) {
            return Err(GameError::InvalidInput("vowels must be bought"));
        }
        let name = self.players[idx].name.clone();

        if self.used_letters.contains(&letter) {
            self.advance_turn();
            self.message = GameMessage::new(
                MessageKind::Warning,
                format!("{letter} was already called: turn passes"),
            );
            return Ok(LetterPlay {
                letter,
                count: 0,
                gained: 0,
                burned: true,
            });
        }
        self.used_letters.insert(letter);

        let count = text::count_letter(self.phrase_text(), letter);
        if count == 0 {
            self.advance_turn();
            self.last_reveal.clear();
            self.message = GameMessage::new(
                MessageKind::Warning,
                format!("No {letter} in the phrase"),
            );
            return Ok(LetterPlay {
                letter,
                count,
                gained: 0,
                burned: false,
            });
        }

        let gained = (count as u32).saturating_mul(self.last_spin_target.unwrap_or(0));
        let doubled = self.pending_double;
        let player = &mut self.players[idx];
        if doubled {
            player.round_score = player.round_score.saturating_mul(2);
        }
        player.round_score = player.round_score.saturating_add(gained);
        self.pending_double = false;
        self.reveal(letter);
        self.phase = Phase::MustSpin;
        self.message = GameMessage::new(
            MessageKind::Success,
            format!(
                "{count} × {letter} for {name}: +{gained}{}",
                if doubled { " after doubling" } else { "" }
            ),
        );

        Ok(LetterPlay {
            letter,
            count,
            gained,
            burned: false,
        })
    }

    /// Buy a vowel. The cost is paid even if the vowel is not in the phrase.
    pub fn buy_vowel(&mut self, session_token: &str, letter: &str) -> Result<LetterPlay, GameError> {
        let idx = self.begin_action(session_token, &[Phase::MustSpin])?;
        let letter = text::parse_single_letter(letter)
            .ok_or(GameError::InvalidInput("a vowel is a single letter"))?;
        if !text::is_vowel(letter) {
            return Err(GameError::InvalidInput("only vowels can be bought"));
        }
        let cost = self.rules.vowel_cost;
        let have = self.players[idx].round_score;
        if have < cost {
            return Err(GameError::InsufficientScore { have, need: cost });
        }
        if self.used_letters.contains(&letter) {
            return Err(GameError::LetterAlreadyUsed(letter));
        }

        self.players[idx].round_score = have - cost;
        self.used_letters.insert(letter);

        let count = text::count_letter(self.phrase_text(), letter);
        if count > 0 {
            self.reveal(letter);
            self.message = GameMessage::new(
                MessageKind::Success,
                format!("{count} × {letter}"),
            );
        } else {
            self.last_reveal.clear();
            self.message = GameMessage::new(
                MessageKind::Warning,
                format!("No {letter} in the phrase"),
            );
        }
        self.phase = Phase::MustSpin;

        Ok(LetterPlay {
            letter,
            count,
            gained: 0,
            burned: false,
        })
    }

    /// Guess the whole phrase.
    pub fn try_solve(&mut self, session_token: &str, guess: &str) -> Result<SolveResult, GameError> {
        let idx = self.begin_action(session_token, &[Phase::MustSpin])?;
        if guess.trim().is_empty() {
            return Err(GameError::InvalidInput("the solution is empty"));
        }

        let expected = squash(&text::normalize(self.phrase_text()));
        if squash(&text::normalize(guess)) != expected {
            let name = self.players[idx].name.clone();
            self.advance_turn();
            self.message =
                GameMessage::new(MessageKind::Warning, format!("{name}: wrong solution"));
            return Ok(SolveResult::Wrong);
        }

        let bonus = self.rules.solve_bonus;
        let player = &mut self.players[idx];
        let credited = player.round_score.saturating_add(bonus);
        player.total_score = player.total_score.saturating_add(credited);
        let winner = player.name.clone();

        let hidden: Vec<char> = text::phrase_letters(self.phrase_text())
            .into_iter()
            .filter(|l| !self.revealed.contains(*l))
            .collect();
        let mut uncovered: Vec<Position> = hidden
            .iter()
            .flat_map(|l| self.board.occurrences(*l))
            .collect();
        uncovered.sort();
        self.revealed.extend(hidden);
        self.last_reveal = uncovered;

        let countdown = self.rules.countdown;
        self.pending_double = false;
        self.round_winner = Some(winner.clone());
        self.next_round_at = chrono::Duration::from_std(countdown)
            .ok()
            .map(|d| Utc::now() + d);
        self.phase = Phase::BetweenRounds;
        self.message = GameMessage::new(
            MessageKind::Success,
            format!("{winner} solved it! +{credited}"),
        );

        Ok(SolveResult::Solved {
            winner,
            credited,
            countdown,
        })
    }

    /// Give up the turn without spinning.
    pub fn pass_turn(&mut self, session_token: &str) -> Result<(), GameError> {
        let idx = self.begin_action(
            session_token,
            &[Phase::MustSpin, Phase::AwaitingConsonant],
        )?;
        let name = self.players[idx].name.clone();
        self.advance_turn();
        self.message = GameMessage::new(MessageKind::Info, format!("{name} passed"));
        Ok(())
    }

    // ---- views ----

    /// Board rows with unrevealed letters masked.
    pub fn masked_board(&self) -> Vec<String> {
        self.board.masked(&self.revealed)
    }

    /// Everything clients need to render the match.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.iter().map(Player::view).collect(),
            board: self.masked_board(),
            category: self.phrase.as_ref().map(|p| p.category.clone()),
            revealed_letters: self.revealed.iter().collect(),
            used_letters: self.used_letters.iter().copied().collect(),
            current_player_index: self.current_player_index,
            current_round: self.current_round,
            total_rounds: self.total_rounds,
            wheel_pattern: self.wheel.clone(),
            last_spin_target: self.last_spin_target,
            last_spin: self.last_spin.clone(),
            last_reveal: self.last_reveal.clone(),
            pending_double: self.pending_double,
            awaiting_consonant: self.phase == Phase::AwaitingConsonant,
            game_over: self.phase.is_terminal(),
            phase: self.phase,
            vowel_cost: self.rules.vowel_cost,
            round_winner: self.round_winner.clone(),
            game_message: self.message.clone(),
        }
    }
}

/// Comparison form of a solution: normalized, whitespace collapsed.
fn squash(normalized: &str) -> String {
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub name: String,
    pub connection_id: Option<ConnectionId>,
    pub round_score: u32,
    pub total_score: u32,
    pub connected: bool,
}

/// Public match state, sent after every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<PlayerView>,
    pub board: Vec<String>,
    pub category: Option<String>,
    pub revealed_letters: Vec<char>,
    pub used_letters: Vec<char>,
    pub current_player_index: usize,
    pub current_round: u32,
    pub total_rounds: u32,
    pub wheel_pattern: Option<WheelPattern>,
    pub last_spin_target: Option<u32>,
    pub last_spin: Option<SpinResult>,
    pub last_reveal: Vec<Position>,
    pub pending_double: bool,
    pub awaiting_consonant: bool,
    pub game_over: bool,
    pub phase: Phase,
    pub vowel_cost: u32,
    pub round_winner: Option<String>,
    pub game_message: GameMessage,
}

/// Game errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("It's not your turn")]
    NotYourTurn,
    #[error("Not allowed while the game is in phase {0}")]
    WrongPhase(Phase),
    #[error("Not a player in this game")]
    NotPlayer,
    #[error("Already a player in this game")]
    AlreadyPlayer,
    #[error("Not enough players to start")]
    NotEnoughPlayers,
    #[error("A vowel costs {need}, you have {have}")]
    InsufficientScore { have: u32, need: u32 },
    #[error("{0} has already been called this round")]
    LetterAlreadyUsed(char),
    #[error(transparent)]
    Wheel(#[from] WheelError),
}
