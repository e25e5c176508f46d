//! Full match through the dispatcher: lobby, approvals, two rounds, a dropped
//! connection and the final standings.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;
use wordwheel_state::{
    ClientRequest, ConnectionId, Dispatch, ErrorKind, GameConfig, GameServer, GameSnapshot,
    Phase, Phrase, PhraseSource, Recipient, ServerEvent, SessionLocation, View,
};

/// Hands out phrases in a fixed order.
struct Playlist {
    phrases: Vec<Phrase>,
    next: usize,
}

impl PhraseSource for Playlist {
    fn next_phrase(&mut self) -> Phrase {
        let phrase = self.phrases[self.next % self.phrases.len()].clone();
        self.next += 1;
        phrase
    }
}

fn server() -> GameServer {
    let config = GameConfig::from_json(r#"{"roundCountdownSecs": 5, "maxPlayers": 3}"#).unwrap();
    GameServer::with_seed(config, 42)
        .unwrap()
        .with_phrase_source(Playlist {
            phrases: vec![
                Phrase::new("PROVERBIO", "Chi va piano va sano"),
                Phrase::new("CITTÀ", "L'Aquila"),
            ],
            next: 0,
        })
}

fn request(server: &GameServer, conn: ConnectionId, request: ClientRequest) -> Dispatch {
    let dispatch = server.handle(conn, request);
    assert!(dispatch.ack.ok || dispatch.ack.pending == Some(true), "{:?}", dispatch.ack);
    dispatch
}

fn last_state(outbound: &[wordwheel_state::Outbound]) -> GameSnapshot {
    outbound
        .iter()
        .rev()
        .find_map(|o| match &o.event {
            ServerEvent::GameStateUpdate { game_state } => Some(game_state.clone()),
            ServerEvent::GameStart { game_state, .. } => Some(game_state.clone()),
            _ => None,
        })
        .expect("no game state in outbound events")
}

#[test]
fn two_round_match_with_reconnection() {
    let server = server();
    let anna = Uuid::new_v4();
    let bruno = Uuid::new_v4();
    let carla = Uuid::new_v4();
    for conn in [anna, bruno, carla] {
        server.connect(conn);
    }

    // Anna hosts under a custom code
    let created = request(
        &server,
        anna,
        ClientRequest::CreateRoom {
            player_name: "Anna".to_string(),
            total_rounds: 2,
            room_code: Some(" festa ".to_string()),
            session_token: "tok-anna".to_string(),
        },
    );
    let code = created.ack.room_code.clone().unwrap();
    assert_eq!(code, "FESTA");
    assert_eq!(created.ack.player_name.as_deref(), Some("Anna"));

    // Bruno asks to play, Carla to watch
    let joined = request(
        &server,
        bruno,
        ClientRequest::JoinRoom {
            room_code: "festa".to_string(),
            player_name: "Bruno".to_string(),
            session_token: "tok-bruno".to_string(),
        },
    );
    assert_eq!(joined.ack.pending, Some(true));
    assert_eq!(
        server.session_location("tok-bruno").map(|l| l.view()),
        Some(View::Pending)
    );

    request(
        &server,
        carla,
        ClientRequest::JoinAsSpectator {
            room_code: code.clone(),
            player_name: "Carla".to_string(),
            session_token: "tok-carla".to_string(),
        },
    );

    request(
        &server,
        anna,
        ClientRequest::AcceptJoinRequest {
            room_code: code.clone(),
            session_token: "tok-bruno".to_string(),
        },
    );
    let rejected = request(
        &server,
        anna,
        ClientRequest::RejectJoinRequest {
            room_code: code.clone(),
            session_token: "tok-carla".to_string(),
            reason: Some("Solo giocatori stasera".to_string()),
        },
    );
    let to_carla: Vec<_> = rejected
        .events_for(&Recipient::Connection(carla))
        .collect();
    assert_eq!(
        to_carla,
        vec![&ServerEvent::JoinRequestRejected {
            message: "Solo giocatori stasera".to_string()
        }]
    );
    assert_eq!(server.recipients(&Recipient::Room(code.clone())).len(), 2);

    // Round 1
    let started = request(&server, anna, ClientRequest::StartGame { room_code: code.clone() });
    let state = last_state(&started.outbound);
    assert_eq!(state.phase, Phase::MustSpin);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.category.as_deref(), Some("PROVERBIO"));
    assert!(state.board.iter().all(|row| !row.chars().any(|c| c.is_alphabetic())));

    let ack = server
        .handle(bruno, ClientRequest::PassTurn { room_code: code.clone() })
        .ack;
    assert_eq!(ack.error_kind, Some(ErrorKind::NotYourTurn));

    let passed = request(&server, anna, ClientRequest::PassTurn { room_code: code.clone() });
    assert_eq!(last_state(&passed.outbound).current_player_index, 1);

    let wrong = request(
        &server,
        bruno,
        ClientRequest::TrySolution {
            room_code: code.clone(),
            text: "chi va forte".to_string(),
        },
    );
    assert_eq!(last_state(&wrong.outbound).current_player_index, 0);
    request(&server, anna, ClientRequest::PassTurn { room_code: code.clone() });

    let solved = request(
        &server,
        bruno,
        ClientRequest::TrySolution {
            room_code: code.clone(),
            text: "  CHI  va piano VA SANO ".to_string(),
        },
    );
    let state = last_state(&solved.outbound);
    assert_eq!(state.phase, Phase::BetweenRounds);
    assert_eq!(state.board, vec!["Chi va piano", "va sano"]);
    assert!(solved.outbound.iter().any(|o| o.event
        == ServerEvent::RoundWon {
            winner_name: "Bruno".to_string(),
            countdown: 5
        }));

    // Actions are refused during the countdown
    let ack = server
        .handle(bruno, ClientRequest::SpinWheel { room_code: code.clone() })
        .ack;
    assert_eq!(ack.error_kind, Some(ErrorKind::WrongPhase));

    // Bruno's connection drops during the pause
    server.disconnect(bruno);
    assert_eq!(
        server.session_location("tok-bruno"),
        Some(SessionLocation::Disconnected)
    );

    assert!(server.tick(Utc::now()).is_empty());
    let rolled = server.tick(Utc::now() + Duration::seconds(6));
    let state = last_state(&rolled);
    assert_eq!(state.current_round, 2);
    assert_eq!(state.phase, Phase::MustSpin);
    assert_eq!(state.category.as_deref(), Some("CITTÀ"));
    // The apostrophe is hidden together with its letter
    assert_eq!(state.board, vec!["_______"]);
    // Solver keeps the turn; scores survive the drop
    assert_eq!(state.current_player_index, 1);
    assert!(!state.players[1].connected);
    assert_eq!(state.players[1].total_score, 1000);

    // Bruno comes back on a new connection and is re-approved
    let bruno_again = Uuid::new_v4();
    server.connect(bruno_again);
    let rejoin = request(
        &server,
        bruno_again,
        ClientRequest::JoinRoom {
            room_code: code.clone(),
            player_name: "Bruno".to_string(),
            session_token: "tok-bruno".to_string(),
        },
    );
    let to_host: Vec<_> = rejoin.events_for(&Recipient::Connection(anna)).collect();
    let [ServerEvent::JoinRequest { request: pending }] = to_host.as_slice() else {
        panic!("host should see the request");
    };
    assert!(pending.is_reconnection);

    let accepted = request(
        &server,
        anna,
        ClientRequest::AcceptJoinRequest {
            room_code: code.clone(),
            session_token: "tok-bruno".to_string(),
        },
    );
    let to_bruno: Vec<_> = accepted
        .events_for(&Recipient::Connection(bruno_again))
        .collect();
    let [ServerEvent::JoinRequestAccepted {
        in_progress,
        game_state: Some(game_state),
        ..
    }] = to_bruno.as_slice()
    else {
        panic!("bruno should be routed into the game");
    };
    assert!(*in_progress);
    assert_eq!(game_state.players.len(), 2);
    assert_eq!(game_state.current_player_index, 1);
    assert!(game_state.players[1].connected);
    assert_eq!(
        server.session_location("tok-bruno").map(|l| l.view()),
        Some(View::Game)
    );

    // Round 2, apostrophes and accents don't matter
    let solved = request(
        &server,
        bruno_again,
        ClientRequest::TrySolution {
            room_code: code.clone(),
            text: "laquila".to_string(),
        },
    );
    assert_eq!(last_state(&solved.outbound).board, vec!["L'Aquila"]);

    let finished = server.tick(Utc::now() + Duration::seconds(6));
    assert_eq!(last_state(&finished).phase, Phase::GameOver);
    let standings = finished
        .iter()
        .find_map(|o| match &o.event {
            ServerEvent::GameOver { standings } => Some(standings.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(standings[0].name, "Bruno");
    assert_eq!(standings[0].total_score, 2000);
    assert_eq!(standings[1].total_score, 0);

    // Everybody leaves, the room goes away
    request(&server, anna, ClientRequest::LeaveRoom { room_code: code.clone() });
    request(&server, bruno_again, ClientRequest::LeaveRoom { room_code: code.clone() });
    assert_eq!(server.rooms().count(), 0);
}
