use serde_json::{json, Value};
use tracing::warn;
use turn_program::context::TurnContext;

use crate::{
    action::GameAction,
    state::{GamePrivateState, GameState, GameStatus, PlacementResult},
};

fn status_json(status: &GameStatus) -> (Value, Value) {
    match status {
        GameStatus::InProgress => (json!("in_progress"), Value::Null),
        GameStatus::Won { winner, line } => (
            json!({ "won": winner }),
            json!(line.cells.map(|c| c.as_array())),
        ),
        GameStatus::Drawn => (json!("drawn"), Value::Null),
    }
}

pub fn reducer(
    public_state: &mut GameState,
    private_state: &mut GamePrivateState,
    action: &GameAction,
    context: &mut TurnContext,
) {
    *context.client_response() = None;

    match *action {
        GameAction::Drop { x, y } => {
            let player = public_state.turn();
            let result = match public_state.drop(i64::from(x), i64::from(y)) {
                Ok(result) => result,
                Err(err) => {
                    // Decoded actions are always in range.
                    warn!(%err, "action outside the grid");
                    return;
                }
            };

            let placed = match result {
                PlacementResult::Placed { at, .. } => {
                    private_state.moves += 1;
                    json!(at.as_array())
                }
                PlacementResult::Rejected(reason) => {
                    private_state.rejected += 1;
                    warn!(x, y, ?reason, "drop rejected");
                    Value::Null
                }
            };

            let (status, line) = status_json(public_state.status());
            *context.client_response() = Some(json!({
                "placed": placed,
                "player": player,
                "next": public_state.turn(),
                "status": status,
                "line": line,
                "rejected": result.is_rejected(),
            }));
        }
    }
}
