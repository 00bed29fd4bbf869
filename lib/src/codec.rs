//! Fixed-size encoding of a [`GameState`] for syncing two hosts.
//!
//! Bytes `0..16` hold the 64 cells at 2 bits each, cell index `x*16 + y*4 + z`,
//! four cells per byte starting from the least significant bits
//! (`0` empty, `1` player A, `2` player B). Byte 16 holds the side to move in
//! bit 0 and the status in bits 1..=2 (`0` in progress, `1` won, `2` drawn).
//! The winning line is not sent; the decoder finds it again.

use thiserror::Error;

use crate::{
    grid::{Coord, Grid, Owner, Player, CELL_COUNT, SIZE},
    scanner::find_any_win,
    state::{GameState, GameStatus},
};

pub const ENCODED_LEN: usize = CELL_COUNT / 4 + 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected 17 bytes, got {0}")]
    Length(usize),

    #[error("invalid owner code 3 at cell {0:?}")]
    OwnerCode(Coord),

    #[error("invalid status code {0}")]
    StatusCode(u8),

    #[error("cell {0:?} floats above an empty cell")]
    FloatingCell(Coord),

    #[error("{a} player A discs and {b} player B discs cannot come from alternating drops")]
    DiscCounts { a: usize, b: usize },

    #[error("player {turn:?} cannot hold the turn with {a} A and {b} B discs")]
    TurnMismatch { turn: Player, a: usize, b: usize },

    #[error("status is won but player {0:?} has no line")]
    MissingLine(Player),

    #[error("status is won by {0:?} but the opponent also holds a line")]
    BothLines(Player),

    #[error("status is in progress but the grid already holds a line")]
    UnreportedLine,

    #[error("status is drawn but the grid is not full")]
    NotFull,

    #[error("status is drawn but the grid holds a line")]
    LineInDraw,

    #[error("move history does not reproduce the grid")]
    HistoryMismatch,
}

fn cell_index(c: Coord) -> usize {
    usize::from(c.x) * SIZE * SIZE + usize::from(c.y) * SIZE + usize::from(c.z)
}

fn owner_code(owner: Owner) -> u8 {
    match owner {
        Owner::Empty => 0,
        Owner::PlayerA => 1,
        Owner::PlayerB => 2,
    }
}

pub(crate) fn status_code(status: &GameStatus) -> u8 {
    match status {
        GameStatus::InProgress => 0,
        GameStatus::Won { .. } => 1,
        GameStatus::Drawn => 2,
    }
}

pub fn encode(state: &GameState) -> [u8; ENCODED_LEN] {
    let mut out = [0u8; ENCODED_LEN];
    for (c, owner) in state.grid().cells() {
        let i = cell_index(c);
        out[i / 4] |= owner_code(owner) << ((i % 4) * 2);
    }
    out[ENCODED_LEN - 1] = state.turn().index() | (status_code(state.status()) << 1);
    out
}

pub fn decode(bytes: &[u8]) -> Result<GameState, DecodeError> {
    if bytes.len() != ENCODED_LEN {
        return Err(DecodeError::Length(bytes.len()));
    }

    let mut grid = Grid::new();
    for (c, _) in Grid::new().cells() {
        let i = cell_index(c);
        let owner = match (bytes[i / 4] >> ((i % 4) * 2)) & 0b11 {
            0 => Owner::Empty,
            1 => Owner::PlayerA,
            2 => Owner::PlayerB,
            _ => return Err(DecodeError::OwnerCode(c)),
        };
        grid.set_cell(c, owner);
    }

    let flags = bytes[ENCODED_LEN - 1];
    let turn = if flags & 1 == 0 { Player::A } else { Player::B };
    let status = validate(&grid, turn, (flags >> 1) & 0b11)?;

    Ok(GameState::from_parts(grid, turn, status))
}

/// Checks that `grid`, `turn` and the status code describe a position reachable
/// through drops, and rebuilds the status (winning line included).
///
/// While in progress `turn` is the side to move. In a finished game it is the
/// side that made the last drop, since the turn does not pass after a win or
/// the final cell.
pub(crate) fn validate(grid: &Grid, turn: Player, status: u8) -> Result<GameStatus, DecodeError> {
    if status > 2 {
        return Err(DecodeError::StatusCode(status));
    }

    let floating = grid
        .cells()
        .find(|&(c, o)| !o.is_empty() && c.z > 0 && grid.cell(Coord { z: c.z - 1, ..c }).is_empty())
        .map(|(c, _)| c);
    if let Some(c) = floating {
        return Err(DecodeError::FloatingCell(c));
    }

    let a = grid.cells().filter(|&(_, o)| o == Owner::PlayerA).count();
    let b = grid.cells().filter(|&(_, o)| o == Owner::PlayerB).count();
    let last_mover = if a == b + 1 {
        Some(Player::A)
    } else if a == b && a > 0 {
        Some(Player::B)
    } else if a == b {
        None
    } else {
        return Err(DecodeError::DiscCounts { a, b });
    };
    let expected_turn = if status == 0 {
        Some(last_mover.map_or(Player::A, Player::opponent))
    } else {
        last_mover
    };
    if expected_turn != Some(turn) {
        return Err(DecodeError::TurnMismatch { turn, a, b });
    }

    let a_line = find_any_win(grid, Owner::PlayerA);
    let b_line = find_any_win(grid, Owner::PlayerB);
    match status {
        0 => {
            if a_line.is_some() || b_line.is_some() {
                return Err(DecodeError::UnreportedLine);
            }
            Ok(GameStatus::InProgress)
        }
        1 => {
            let (own, other) = match turn {
                Player::A => (a_line, b_line),
                Player::B => (b_line, a_line),
            };
            let line = own.ok_or(DecodeError::MissingLine(turn))?;
            if other.is_some() {
                return Err(DecodeError::BothLines(turn));
            }
            Ok(GameStatus::Won { winner: turn, line })
        }
        _ => {
            if !grid.is_full() {
                return Err(DecodeError::NotFull);
            }
            if a_line.is_some() || b_line.is_some() {
                return Err(DecodeError::LineInDraw);
            }
            Ok(GameStatus::Drawn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_is_all_zero() {
        assert_eq!(encode(&GameState::new()), [0u8; ENCODED_LEN]);
    }

    #[test]
    fn cell_bits_follow_the_layout() {
        let mut state = GameState::new();
        state.drop(0, 0).unwrap(); // A at (0,0,0) -> cell 0
        state.drop(0, 0).unwrap(); // B at (0,0,1) -> cell 1
        state.drop(1, 0).unwrap(); // A at (1,0,0) -> cell 16
        let bytes = encode(&state);
        assert_eq!(bytes[0], 0b0000_1001);
        assert_eq!(bytes[4], 0b0000_0001);
        assert_eq!(bytes[16], 1);
    }

    #[test]
    fn decode_restores_grid_turn_and_status() {
        let mut state = GameState::new();
        for (x, y) in [(0, 0), (3, 3), (0, 0), (3, 3), (0, 0), (3, 2), (0, 0)] {
            state.drop(x, y).unwrap();
        }
        assert!(state.winner().is_some());

        let decoded = decode(&encode(&state)).unwrap();
        assert_eq!(decoded.grid(), state.grid());
        assert_eq!(decoded.turn(), state.turn());
        assert_eq!(decoded.status(), state.status());
        assert!(decoded.moves().is_empty());
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert_eq!(decode(&[0; 3]), Err(DecodeError::Length(3)));

        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b11;
        assert!(matches!(decode(&bytes), Err(DecodeError::OwnerCode(_))));

        let mut bytes = [0u8; ENCODED_LEN];
        bytes[16] = 0b110;
        assert_eq!(decode(&bytes), Err(DecodeError::StatusCode(3)));

        // (0,0,1) set, (0,0,0) empty.
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b0100;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::FloatingCell(Coord { x: 0, y: 0, z: 1 }))
        );
    }

    #[test]
    fn turn_must_follow_disc_counts() {
        // One A disc, A still to move.
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b01;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::TurnMismatch {
                turn: Player::A,
                a: 1,
                b: 0
            })
        );
        bytes[16] = 0b001;
        assert_eq!(decode(&bytes).unwrap().turn(), Player::B);

        // Two A discs and no B disc.
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b0101;
        bytes[16] = 0b001;
        assert_eq!(decode(&bytes), Err(DecodeError::DiscCounts { a: 2, b: 0 }));

        // Won by A needs A to have dropped last.
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b0101_0101;
        bytes[4] = 0b1010_1010;
        bytes[16] = 0b010;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::TurnMismatch {
                turn: Player::A,
                a: 4,
                b: 4
            })
        );
    }

    #[test]
    fn won_status_needs_a_line_for_the_winner_only() {
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b01;
        bytes[16] = 0b010;
        assert_eq!(decode(&bytes), Err(DecodeError::MissingLine(Player::A)));

        // A: column (0,0) and (3,3,0). B: column (1,0).
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b0101_0101;
        bytes[4] = 0b1010_1010;
        bytes[15] = 0b01;
        bytes[16] = 0b010;
        assert_eq!(decode(&bytes), Err(DecodeError::BothLines(Player::A)));
    }

    #[test]
    fn drawn_status_needs_a_full_grid_without_lines() {
        // A at (0,0,0), B at (0,0,1).
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b1001;
        bytes[16] = 0b101;
        assert_eq!(decode(&bytes), Err(DecodeError::NotFull));

        // Full grid of A discs.
        let mut bytes = [0x55u8; ENCODED_LEN];
        bytes[16] = 0b100;
        assert_eq!(decode(&bytes), Err(DecodeError::DiscCounts { a: 64, b: 0 }));

        // x = 0, 1 for A and x = 2, 3 for B: full, balanced, full of lines.
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[..8].fill(0x55);
        bytes[8..16].fill(0xAA);
        bytes[16] = 0b101;
        assert_eq!(decode(&bytes), Err(DecodeError::LineInDraw));
    }

    #[test]
    fn in_progress_with_a_line_is_rejected() {
        // A: column (0,0). B: (1,0,0..=2).
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0b0101_0101;
        bytes[4] = 0b0010_1010;
        bytes[16] = 0b001;
        assert_eq!(decode(&bytes), Err(DecodeError::UnreportedLine));
        bytes[16] = 0b010;
        assert_eq!(decode(&bytes).unwrap().winner(), Some(Player::A));
    }
}
