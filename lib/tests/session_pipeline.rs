// lib/tests/session_pipeline.rs

/**
 * The game driven through the turn runtime.
 *
 * What is tested:
 * - Wire bytes and JSON actions reach the engine through `TurnSession::apply`.
 * - Rejected actions keep the same player to move.
 * - `replay` over recorded bytes rebuilds the same public state.
 */
use game_lib::{
    action::GameAction,
    reducer::reducer,
    state::{GamePrivateState, GameState},
    Player,
};
use serde_json::json;
use turn_program::{
    error::ActionError,
    program::{replay, TurnSession},
    traits::{HasTerminalState, TurnActionSerialization},
};

type Session = TurnSession<GameState, GamePrivateState, GameAction>;

#[test]
fn apply_routes_actions_to_the_player_to_move() {
    let mut session = Session::new(reducer, 42);

    let response = session.apply(&[5]).unwrap().unwrap();
    assert_eq!(response["placed"], json!([1, 1, 0]));
    assert_eq!(response["player"], json!("A"));

    let bytes = GameAction::serialize_json(r#"{"action":"Drop","data":[1,1]}"#).unwrap();
    let response = session.apply(&bytes).unwrap().unwrap();
    assert_eq!(response["placed"], json!([1, 1, 1]));
    assert_eq!(response["player"], json!("B"));

    assert_eq!(session.public_state().turn(), Player::A);
    assert_eq!(session.private_state().moves, 2);
    assert_eq!(session.actions(), &[5, 5]);
}

#[test]
fn malformed_bytes_never_reach_the_state() {
    let mut session = Session::new(reducer, 0);
    assert_eq!(session.apply(&[16]), Err(ActionError::OutOfBounds("column")));
    assert_eq!(session.apply(&[1, 2]), Err(ActionError::TrailingBytes(1)));
    assert_eq!(session.public_state(), &GameState::new());
    assert!(session.actions().is_empty());
}

#[test]
fn rejected_drop_keeps_the_turn() {
    let mut session = Session::new(reducer, 0);
    for _ in 0..4 {
        session.apply(&[0]).unwrap();
    }
    let response = session.apply(&[0]).unwrap().unwrap();
    assert_eq!(response["rejected"], json!(true));
    assert_eq!(session.public_state().turn(), Player::A);
    assert_eq!(session.private_state().rejected, 1);
}

#[test]
fn replay_rebuilds_a_finished_game() {
    // A stacks column 0 while B plays column 15.
    let actions = [0, 15, 0, 15, 0, 15, 0];
    let session = replay::<GameState, GamePrivateState, GameAction>(reducer, &actions, 9).unwrap();
    assert!(session.public_state().is_terminal());
    assert_eq!(session.public_state().winner(), Some(Player::A));
    assert_eq!(session.actions(), &actions);
}
