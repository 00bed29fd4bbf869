use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid, Owner};

/// Number of cells in a winning run.
pub const RUN: usize = 4;

pub type Axis = (i8, i8, i8);

/// Every undirected line direction through a cell, one entry per axis, in the
/// order [`find_win`] tries them. The set is the 3 straight axes, 6 face
/// diagonals and 4 space diagonals; the vertical axis is tried last.
pub const AXES: [Axis; 13] = [
    (1, 1, 1),
    (1, 1, -1),
    (1, 1, 0),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, 1, 0),
    (1, 0, 0),
    (1, 0, 1),
    (0, 1, 1),
    (1, 0, -1),
    (0, 1, -1),
    (0, 1, 0),
    (0, 0, 1),
];

// Origin first, then alternately one step further right and left.
const OFFSETS: [i8; 7] = [0, 1, -1, 2, -2, 3, -3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub axis: Axis,
    /// Ordered from the lowest to the highest offset along `axis`.
    pub cells: [Coord; RUN],
}

impl WinLine {
    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }
}

/// Looks for a run of four `owner` cells through `origin` along `axis`.
///
/// Each side stops at the first cell not owned by `owner`; cells outside the
/// grid are skipped without stopping either side.
pub fn scan_axis(grid: &Grid, origin: Coord, owner: Owner, axis: Axis) -> Option<WinLine> {
    let mut extend_right = true;
    let mut extend_left = true;
    let mut counted: [(i8, Coord); RUN] = [(0, origin); RUN];
    let mut count = 0;

    for i in OFFSETS {
        if (i > 0 && !extend_right) || (i < 0 && !extend_left) {
            continue;
        }
        let Some(cell) = origin.offset(axis, i) else {
            continue;
        };
        if grid.cell(cell) == owner {
            counted[count] = (i, cell);
            count += 1;
            if count == RUN {
                counted.sort_by_key(|&(i, _)| i);
                return Some(WinLine {
                    axis,
                    cells: counted.map(|(_, c)| c),
                });
            }
        } else if i > 0 {
            extend_right = false;
        } else {
            extend_left = false;
        }
    }

    None
}

/// First axis through `origin` that completes a run for `owner`.
///
/// A drop that completes several lines at once reports the one whose axis
/// comes first in [`AXES`].
pub fn find_win(grid: &Grid, origin: Coord, owner: Owner) -> Option<WinLine> {
    if owner.is_empty() {
        return None;
    }
    AXES.iter()
        .find_map(|&axis| scan_axis(grid, origin, owner, axis))
}

/// Any run for `owner` anywhere on the grid.
pub fn find_any_win(grid: &Grid, owner: Owner) -> Option<WinLine> {
    if owner.is_empty() {
        return None;
    }
    grid.cells()
        .filter(|&(_, o)| o == owner)
        .find_map(|(c, _)| find_win(grid, c, owner))
}
