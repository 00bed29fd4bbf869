//! Four-in-a-row on a 4x4x4 cube.
//!
//! Discs drop along `z` into one of 16 columns. A player wins with four of
//! their discs on any of the 13 line directions through a cell.

pub mod action;
pub mod codec;
pub mod grid;
pub mod reducer;
pub mod scanner;
pub mod state;

pub use grid::{Coord, Grid, OutOfRangeError, Owner, Player};
pub use state::{GameState, GameStatus, Outcome, PlacementResult, RejectReason};

/// Starts a fresh game: empty grid, player A to move.
pub fn new_game() -> GameState {
    GameState::new()
}
