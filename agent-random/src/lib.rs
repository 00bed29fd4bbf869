use game_lib::{action::column_index, state::GameState};
use turn_program::{context::TurnContext, traits::HasTerminalState};

pub fn agent(state: &GameState, context: &mut TurnContext) -> u8 {
    // Check if a valid move is available
    if state.is_terminal() {
        return 0;
    }

    let open_columns = state.open_columns();
    if open_columns.is_empty() {
        return 0;
    }

    // Get a random move
    let idx = (context.rand_u32() % open_columns.len() as u32) as usize;
    let (x, y) = open_columns[idx];
    column_index(x, y)
}
