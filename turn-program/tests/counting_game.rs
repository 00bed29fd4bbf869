// turn-program/tests/counting_game.rs

/**
 * Runtime contracts checked against a tiny counting game.
 *
 * Rules of the fixture: players alternately add 1..=3 to a shared total;
 * whoever reaches 10 wins. Adding 0 is a rejected move and keeps the turn.
 *
 * What is tested:
 * - `TurnSession` decodes one action at a time and routes it to the player to move.
 * - `replay` reproduces a session from its recorded bytes.
 * - `run_match` stops on terminal states and on the turn limit.
 * - `verify_agent_actions` flags a recorded action the agent would not pick.
 */
use serde_json::json;
use turn_program::{
    arena::{run_match, verify_agent_actions, MatchConfig},
    context::TurnContext,
    error::{ActionError, ArenaError},
    program::{replay, TurnSession},
    traits::{HasCurrentPlayer, HasTerminalState, TurnActionSerialization},
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Count {
    total: u8,
    to_move: u8,
}

#[derive(Debug, Default)]
struct Tally {
    rejected: u32,
}

struct Add(u8);

impl TurnActionSerialization for Add {
    fn deserialize(action: &[u8]) -> Result<(Self, &[u8]), ActionError> {
        let (&n, rest) = action.split_first().ok_or(ActionError::Empty)?;
        if n > 3 {
            return Err(ActionError::OutOfBounds("step"));
        }
        Ok((Add(n), rest))
    }

    fn serialize_json(json_str: &str) -> Result<Vec<u8>, ActionError> {
        let n: u8 =
            serde_json::from_str(json_str).map_err(|e| ActionError::InvalidJson(e.to_string()))?;
        Ok(vec![n])
    }
}

impl HasTerminalState for Count {
    fn is_terminal(&self) -> bool {
        self.total >= 10
    }
}

impl HasCurrentPlayer for Count {
    fn current_player(&self) -> u8 {
        self.to_move
    }
}

fn reducer(state: &mut Count, tally: &mut Tally, action: &Add, context: &mut TurnContext) {
    if action.0 == 0 || state.is_terminal() {
        tally.rejected += 1;
        *context.client_response() = Some(json!({ "rejected": true }));
        return;
    }
    state.total = (state.total + action.0).min(10);
    if !state.is_terminal() {
        state.to_move = 1 - state.to_move;
    }
    let player = context.player();
    *context.client_response() = Some(json!({ "player": player, "total": state.total }));
}

fn add_three(_: &Count, _: &mut TurnContext) -> u8 {
    3
}

fn add_random(_: &Count, context: &mut TurnContext) -> u8 {
    (context.rand_u32() % 3) as u8 + 1
}

fn add_nothing(_: &Count, _: &mut TurnContext) -> u8 {
    0
}

type Session = TurnSession<Count, Tally, Add>;

#[test]
fn session_routes_actions_by_current_player() {
    let mut session = Session::new(reducer, 1);
    let first = session.apply(&[2]).unwrap().unwrap();
    assert_eq!(first, json!({ "player": 0, "total": 2 }));

    let second = session.apply(&[0]).unwrap().unwrap();
    assert_eq!(second, json!({ "rejected": true }));
    assert_eq!(session.public_state().to_move, 1);

    let third = session.apply(&[3]).unwrap().unwrap();
    assert_eq!(third, json!({ "player": 1, "total": 5 }));
    assert_eq!(session.private_state().rejected, 1);
    assert_eq!(session.actions(), &[2, 0, 3]);
}

#[test]
fn session_rejects_bad_wire_input() {
    let mut session = Session::new(reducer, 1);
    assert_eq!(session.apply(&[]), Err(ActionError::Empty));
    assert_eq!(session.apply(&[9]), Err(ActionError::OutOfBounds("step")));
    assert_eq!(session.apply(&[1, 1]), Err(ActionError::TrailingBytes(1)));
    assert_eq!(session.public_state(), &Count::default());
}

#[test]
fn replay_matches_the_original_session() {
    let config = MatchConfig {
        seed: 5,
        max_turns: 32,
    };
    let played = run_match::<Count, Tally, Add>(reducer, [add_random, add_three], config).unwrap();
    assert!(played.public_state().is_terminal());

    let replayed = replay::<Count, Tally, Add>(reducer, played.actions(), config.seed).unwrap();
    assert_eq!(replayed.public_state(), played.public_state());

    for (player, agent) in [add_random as fn(&Count, &mut TurnContext) -> u8, add_three]
        .into_iter()
        .enumerate()
    {
        verify_agent_actions::<Count, Tally, Add>(reducer, agent, played.actions(), player as u8, config.seed)
            .unwrap();
    }
}

#[test]
fn turn_limit_stops_a_stuck_match() {
    let config = MatchConfig {
        seed: 0,
        max_turns: 7,
    };
    let session = run_match::<Count, Tally, Add>(reducer, [add_nothing, add_three], config).unwrap();
    assert!(!session.public_state().is_terminal());
    assert_eq!(session.actions().len(), 7);
    assert_eq!(session.private_state().rejected, 7);
}

#[test]
fn verifier_reports_the_first_mismatch() {
    let result = verify_agent_actions::<Count, Tally, Add>(reducer, add_three, &[3, 1, 2, 1], 0, 0);
    match result {
        Err(ArenaError::AgentMismatch {
            player,
            turn,
            recorded,
            chosen,
        }) => {
            assert_eq!((player, turn, recorded, chosen), (0, 2, 2, 3));
        }
        other => panic!("expected a mismatch, got {:?}", other.err()),
    }

    assert!(matches!(
        verify_agent_actions::<Count, Tally, Add>(reducer, add_three, &[], 2, 0),
        Err(ArenaError::InvalidPlayer(2))
    ));
}
