// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const GRID_SIZE: usize = 5;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// King-move offsets: four orthogonal, four diagonal.
#[rustfmt::skip]
static NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A (row, col) position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major cell index, used for the visited mask.
    pub const fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    pub const fn from_index(index: usize) -> Self {
        Self { row: index / GRID_SIZE, col: index % GRID_SIZE }
    }

    pub const fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// True for distinct cells that differ by at most one row and one column.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }

    /// In-bounds king-move neighbors of this cell.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            let next = Coord::new(row, col);
            next.in_bounds().then_some(next)
        })
    }

    /// All 25 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

/// Ordered, non-repeating sequence of adjacent cells spelling one occurrence.
pub type Path = Vec<Coord>;

/// True when every cell is distinct and every step is a king move.
pub fn is_valid_path(path: &[Coord]) -> bool {
    let mut seen = 0u32;
    for coord in path {
        if !coord.in_bounds() {
            return false;
        }
        let bit = 1u32 << coord.index();
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    path.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
}
