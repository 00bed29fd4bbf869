use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of the cube.
pub const SIZE: usize = 4;
pub const CELL_COUNT: usize = SIZE * SIZE * SIZE;
pub const COLUMN_COUNT: usize = SIZE * SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Owner {
    pub fn is_empty(self) -> bool {
        self == Owner::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Owner::Empty => None,
            Owner::PlayerA => Some(Player::A),
            Owner::PlayerB => Some(Player::B),
        }
    }
}

impl From<Player> for Owner {
    fn from(player: Player) -> Self {
        match player {
            Player::A => Owner::PlayerA,
            Player::B => Owner::PlayerB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({x}, {y}, {z}) is outside the 4x4x4 grid")]
pub struct OutOfRangeError {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

fn in_range(v: i64) -> bool {
    (0..SIZE as i64).contains(&v)
}

/// A validated cell position. `z` is the height inside the column `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coord {
    pub fn new(x: i64, y: i64, z: i64) -> Result<Self, OutOfRangeError> {
        if in_range(x) && in_range(y) && in_range(z) {
            Ok(Self {
                x: x as u8,
                y: y as u8,
                z: z as u8,
            })
        } else {
            Err(OutOfRangeError { x, y, z })
        }
    }

    /// Steps `by` times along `(dx, dy, dz)`; `None` once it leaves the grid.
    pub fn offset(self, (dx, dy, dz): (i8, i8, i8), by: i8) -> Option<Self> {
        let step = |v: u8, d: i8| i64::from(v) + i64::from(d) * i64::from(by);
        Coord::new(step(self.x, dx), step(self.y, dy), step(self.z, dz)).ok()
    }

    pub fn as_array(self) -> [u8; 3] {
        [self.x, self.y, self.z]
    }
}

/// Checks a column target `(x, y)`.
pub fn check_column(x: i64, y: i64) -> Result<(u8, u8), OutOfRangeError> {
    Coord::new(x, y, 0)
        .map(|c| (c.x, c.y))
        .map_err(|_| OutOfRangeError { x, y, z: 0 })
}

/// Occupancy of every cell, indexed `[x][y][z]`.
///
/// Only bounds are checked here. Keeping columns gap-free is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[[Owner; SIZE]; SIZE]; SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: i64, y: i64, z: i64) -> Result<Owner, OutOfRangeError> {
        Coord::new(x, y, z).map(|c| self.cell(c))
    }

    pub fn set(&mut self, x: i64, y: i64, z: i64, owner: Owner) -> Result<(), OutOfRangeError> {
        let c = Coord::new(x, y, z)?;
        self.set_cell(c, owner);
        Ok(())
    }

    pub fn cell(&self, c: Coord) -> Owner {
        self.cells[c.x as usize][c.y as usize][c.z as usize]
    }

    pub fn set_cell(&mut self, c: Coord, owner: Owner) {
        self.cells[c.x as usize][c.y as usize][c.z as usize] = owner;
    }

    /// Length of the occupied run starting at `z = 0`.
    pub fn column_height(&self, x: u8, y: u8) -> usize {
        self.cells[x as usize][y as usize]
            .iter()
            .take_while(|o| !o.is_empty())
            .count()
    }

    /// Lowest empty height in the column, if any.
    pub fn lowest_empty(&self, x: u8, y: u8) -> Option<u8> {
        self.cells[x as usize][y as usize]
            .iter()
            .position(|o| o.is_empty())
            .map(|z| z as u8)
    }

    /// True when no column has an occupied cell above an empty one.
    pub fn is_settled(&self) -> bool {
        self.cells.iter().flatten().all(|column| {
            column
                .iter()
                .skip_while(|o| !o.is_empty())
                .all(|o| o.is_empty())
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().flatten().all(|o| !o.is_empty())
    }

    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|o| !o.is_empty())
            .count()
    }

    /// All cells in `x`, then `y`, then `z` order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Owner)> + '_ {
        (0..SIZE as u8).flat_map(move |x| {
            (0..SIZE as u8).flat_map(move |y| {
                (0..SIZE as u8).map(move |z| {
                    let c = Coord { x, y, z };
                    (c, self.cell(c))
                })
            })
        })
    }
}
