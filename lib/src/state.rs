use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use turn_program::traits::{HasActions, HasCurrentPlayer, HasTerminalState};

use crate::{
    action::column_index,
    codec::{self, DecodeError},
    grid::{check_column, Coord, Grid, OutOfRangeError, Owner, Player, SIZE},
    scanner::{find_win, WinLine},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won { winner: Player, line: WinLine },
    /// Every cell is filled and nobody has a line.
    Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    NoWin,
    WinDetected(WinLine),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    ColumnFull,
    GameOver,
}

/// Result of a well-formed drop request. Illegal moves land in `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementResult {
    Placed { at: Coord, outcome: Outcome },
    Rejected(RejectReason),
}

impl PlacementResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, PlacementResult::Rejected(_))
    }
}

/// One game session: grid, side to move, status and the columns played.
///
/// Deserializing checks the position like [`codec::decode`] and, when a move
/// history is present, replays it and requires the same grid and turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRepr")]
pub struct GameState {
    grid: Grid,
    turn: Player,
    status: GameStatus,
    moves: Vec<(u8, u8)>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            turn: Player::A,
            status: GameStatus::InProgress,
            moves: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct StateRepr {
    grid: Grid,
    turn: Player,
    status: GameStatus,
    moves: Vec<(u8, u8)>,
}

impl TryFrom<StateRepr> for GameState {
    type Error = DecodeError;

    fn try_from(repr: StateRepr) -> Result<Self, Self::Error> {
        let status = codec::validate(&repr.grid, repr.turn, codec::status_code(&repr.status))?;
        if repr.moves.is_empty() {
            return Ok(Self::from_parts(repr.grid, repr.turn, status));
        }

        let mut replayed = Self::new();
        for &(x, y) in &repr.moves {
            match replayed.drop(i64::from(x), i64::from(y)) {
                Ok(PlacementResult::Placed { .. }) => {}
                _ => return Err(DecodeError::HistoryMismatch),
            }
        }
        if replayed.grid != repr.grid || replayed.turn != repr.turn {
            return Err(DecodeError::HistoryMismatch);
        }
        Ok(replayed)
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a state from decoded parts. The codec checks consistency first.
    pub(crate) fn from_parts(grid: Grid, turn: Player, status: GameStatus) -> Self {
        Self {
            grid,
            turn,
            status,
            moves: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Columns of every accepted drop, oldest first.
    pub fn moves(&self) -> &[(u8, u8)] {
        &self.moves
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn open_columns(&self) -> Vec<(u8, u8)> {
        if self.status != GameStatus::InProgress {
            return Vec::new();
        }
        (0..SIZE as u8)
            .flat_map(|y| (0..SIZE as u8).map(move |x| (x, y)))
            .filter(|&(x, y)| self.grid.lowest_empty(x, y).is_some())
            .collect()
    }

    /// Drops a disc for the side to move into column `(x, y)`.
    ///
    /// Out-of-range columns are an error and never touch the state. A full
    /// column or a finished game is a normal `Rejected` result.
    pub fn drop(&mut self, x: i64, y: i64) -> Result<PlacementResult, OutOfRangeError> {
        let (x, y) = check_column(x, y)?;

        if self.status != GameStatus::InProgress {
            debug!(x, y, "drop after game over");
            return Ok(PlacementResult::Rejected(RejectReason::GameOver));
        }
        let Some(z) = self.grid.lowest_empty(x, y) else {
            debug!(x, y, "drop into full column");
            return Ok(PlacementResult::Rejected(RejectReason::ColumnFull));
        };

        let at = Coord { x, y, z };
        let player = self.turn;
        let owner = Owner::from(player);
        self.grid.set_cell(at, owner);
        self.moves.push((x, y));
        debug!(?player, x, y, z, "disc placed");

        let outcome = if let Some(line) = find_win(&self.grid, at, owner) {
            info!(?player, cells = ?line.cells, "game won");
            self.status = GameStatus::Won {
                winner: player,
                line,
            };
            Outcome::WinDetected(line)
        } else if self.grid.is_full() {
            info!("game drawn");
            self.status = GameStatus::Drawn;
            Outcome::Draw
        } else {
            self.turn = player.opponent();
            Outcome::NoWin
        };

        Ok(PlacementResult::Placed { at, outcome })
    }
}

impl HasTerminalState for GameState {
    fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }
}

impl HasActions for GameState {
    fn actions(&self) -> Vec<u8> {
        self.open_columns()
            .into_iter()
            .map(|(x, y)| column_index(x, y))
            .collect()
    }
}

impl HasCurrentPlayer for GameState {
    fn current_player(&self) -> u8 {
        self.turn.index()
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GamePrivateState {
    pub moves: u32,
    pub rejected: u32,
}
