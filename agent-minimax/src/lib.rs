// Four-in-a-row cube agent for the turn runtime
// Fits into:
//     pub fn agent(state: &GameState, context: &mut TurnContext) -> u8
// The AI uses a depth-limited minimax search with alpha-beta pruning over the
// 76 straight lines of the 4x4x4 cube.
// Cells are stored as 0 = empty, 1 = player A disc, 2 = player B disc.
// The returned byte is the column index `y * 4 + x`.
// We ignore `context`; the search is deterministic.

use game_lib::{
    action::column_index,
    grid::{Coord, Owner, Player, SIZE},
    scanner::{AXES, RUN},
    state::GameState,
};
use turn_program::{context::TurnContext, traits::HasTerminalState};

const MAX_DEPTH: usize = 4; // adjust for stronger/slower play
const WIN_SCORE: i32 = 1_000_000;

// Centre columns first so alpha-beta cuts earlier.
const MOVE_ORDER: [(u8, u8); 16] = [
    (1, 1),
    (2, 2),
    (1, 2),
    (2, 1),
    (0, 0),
    (3, 3),
    (0, 3),
    (3, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (3, 1),
    (0, 2),
    (3, 2),
    (1, 3),
    (2, 3),
];

type Line = [Coord; RUN];

/// Every run of four cells in the cube, each listed once.
pub fn winning_lines() -> Vec<Line> {
    let mut lines = Vec::new();
    for x in 0..SIZE as u8 {
        for y in 0..SIZE as u8 {
            for z in 0..SIZE as u8 {
                let start = Coord { x, y, z };
                for &axis in &AXES {
                    let cells: Option<Vec<Coord>> =
                        (0..RUN as i8).map(|i| start.offset(axis, i)).collect();
                    if let Some(cells) = cells {
                        lines.push([cells[0], cells[1], cells[2], cells[3]]);
                    }
                }
            }
        }
    }
    lines
}

fn piece_of(player: Player) -> u8 {
    match Owner::from(player) {
        Owner::PlayerA => 1,
        Owner::PlayerB => 2,
        Owner::Empty => 0,
    }
}

/// Returns the column the agent chooses to drop a disc in.
pub fn agent(state: &GameState, _context: &mut TurnContext) -> u8 {
    if state.is_terminal() {
        return 0;
    }

    // ===== Determine which piece is ours and which is the opponent's =====
    let my_piece = piece_of(state.turn());
    let opp_piece = piece_of(state.turn().opponent());

    // ===== Compact board wrapper with search / evaluation logic =====
    #[derive(Clone, Copy)]
    struct Board([[[u8; SIZE]; SIZE]; SIZE]);

    struct Search {
        lines: Vec<Line>,
        my_piece: u8,
        opp_piece: u8,
    }

    impl Board {
        fn at(&self, c: Coord) -> u8 {
            self.0[c.x as usize][c.y as usize][c.z as usize]
        }

        /// Columns that are not full, in search order.
        fn valid_moves(&self) -> Vec<(u8, u8)> {
            MOVE_ORDER
                .iter()
                .copied()
                .filter(|&(x, y)| self.0[x as usize][y as usize][SIZE - 1] == 0)
                .collect()
        }

        /// Returns a new board with `piece` dropped in `(x, y)`, or `None` if the column is full.
        fn drop(&self, (x, y): (u8, u8), piece: u8) -> Option<Self> {
            let column = &self.0[x as usize][y as usize];
            let z = column.iter().position(|&v| v == 0)?;
            let mut next = *self;
            next.0[x as usize][y as usize][z] = piece;
            Some(next)
        }
    }

    impl Search {
        fn is_win(&self, board: &Board, piece: u8) -> bool {
            self.lines
                .iter()
                .any(|line| line.iter().all(|&c| board.at(c) == piece))
        }

        /// Scores a 4-cell window for `piece` (heuristic).
        fn eval_window(window: [u8; RUN], piece: u8) -> i32 {
            let empty = window.iter().filter(|&&v| v == 0).count();
            let count_piece = window.iter().filter(|&&v| v == piece).count();
            match (count_piece, empty) {
                (4, _) => 1_000,
                (3, 1) => 5,
                (2, 2) => 2,
                _ => 0,
            }
        }

        /// Heuristic board evaluation from `my_piece` POV (positive is good).
        fn evaluate(&self, board: &Board) -> i32 {
            let mut score = 0;
            // Inner columns touch the most lines.
            for x in 1..=2 {
                for y in 1..=2 {
                    let count = board.0[x][y]
                        .iter()
                        .filter(|&&v| v == self.my_piece)
                        .count();
                    score += (count as i32) * 3;
                }
            }
            for line in &self.lines {
                let w = line.map(|c| board.at(c));
                score += Self::eval_window(w, self.my_piece);
                score -= Self::eval_window(w, self.opp_piece);
            }
            score
        }

        /// Minimax + alpha-beta. Returns (score, best_move).
        fn minimax(
            &self,
            board: &Board,
            depth: usize,
            mut alpha: i32,
            mut beta: i32,
            maximizing: bool,
        ) -> (i32, Option<(u8, u8)>) {
            let moves = board.valid_moves();
            let my_win = self.is_win(board, self.my_piece);
            let opp_win = self.is_win(board, self.opp_piece);
            if depth == 0 || my_win || opp_win || moves.is_empty() {
                let val = if my_win {
                    WIN_SCORE + depth as i32
                } else if opp_win {
                    -WIN_SCORE - depth as i32
                } else if moves.is_empty() {
                    0 // draw
                } else {
                    self.evaluate(board)
                };
                return (val, None);
            }

            let mut best = None;
            if maximizing {
                let mut value = i32::MIN;
                for mv in moves {
                    if let Some(next) = board.drop(mv, self.my_piece) {
                        let (score, _) = self.minimax(&next, depth - 1, alpha, beta, false);
                        if score > value {
                            value = score;
                            best = Some(mv);
                        }
                        alpha = alpha.max(value);
                        if alpha >= beta {
                            break; // β cut-off
                        }
                    }
                }
                (value, best)
            } else {
                let mut value = i32::MAX;
                for mv in moves {
                    if let Some(next) = board.drop(mv, self.opp_piece) {
                        let (score, _) = self.minimax(&next, depth - 1, alpha, beta, true);
                        if score < value {
                            value = score;
                            best = Some(mv);
                        }
                        beta = beta.min(value);
                        if alpha >= beta {
                            break; // α cut-off
                        }
                    }
                }
                (value, best)
            }
        }

        /// Top-level helper that picks the best column for `my_piece`.
        fn best_move(&self, root: &Board) -> (u8, u8) {
            let moves = root.valid_moves();
            // Take an immediate win without searching.
            for &mv in &moves {
                if let Some(next) = root.drop(mv, self.my_piece) {
                    if self.is_win(&next, self.my_piece) {
                        return mv;
                    }
                }
            }
            let (_, mv) = self.minimax(root, MAX_DEPTH, i32::MIN, i32::MAX, true);
            mv.unwrap_or_else(|| moves.first().copied().unwrap_or((0, 0)))
        }
    }

    let mut cells = [[[0u8; SIZE]; SIZE]; SIZE];
    for (c, owner) in state.grid().cells() {
        cells[c.x as usize][c.y as usize][c.z as usize] = match owner {
            Owner::Empty => 0,
            Owner::PlayerA => 1,
            Owner::PlayerB => 2,
        };
    }

    // Run the search from the current position and return the column.
    let search = Search {
        lines: winning_lines(),
        my_piece,
        opp_piece,
    };
    let (x, y) = search.best_move(&Board(cells));
    column_index(x, y)
}
