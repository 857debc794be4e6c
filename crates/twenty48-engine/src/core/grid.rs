use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{InvalidTileError, core::direction::Direction};

/// Width and height of the grid.
pub const GRID_SIZE: usize = 4;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Tile value that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Largest tile a 4×4 game can produce. Tiles of this value do not merge.
pub const MAX_TILE: u32 = 1 << 17;

/// A single row (or, after transposition, column) of the grid.
pub type Row = [u32; GRID_SIZE];

/// Row/column coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Slides every tile of `row` toward index 0 and merges equal neighbours.
///
/// Zeros are removed first, then the compacted tiles are scanned left to
/// right: a tile equal to the next one is replaced by a single tile of double
/// value and both are consumed. A tile takes part in at most one merge per
/// call, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` rather than `[8, 0, 0, 0]`.
/// Two [`MAX_TILE`] tiles stay separate.
///
/// ```
/// use twenty48_engine::collapse;
///
/// assert_eq!(collapse([2, 0, 2, 4]), [4, 4, 0, 0]);
/// assert_eq!(collapse([8, 2, 2, 2]), [8, 4, 2, 0]);
/// ```
#[must_use]
pub fn collapse(row: Row) -> Row {
    let mut collapsed = [0; GRID_SIZE];
    let mut tiles = row.into_iter().filter(|&value| value != 0).peekable();
    let mut len = 0;
    while let Some(value) = tiles.next() {
        collapsed[len] = if can_merge(value) && tiles.next_if_eq(&value).is_some() {
            value * 2
        } else {
            value
        };
        len += 1;
    }
    collapsed
}

const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

const fn can_merge(value: u32) -> bool {
    value < MAX_TILE
}

/// The 4×4 playing grid.
///
/// A cell holds `0` when empty, otherwise a power of two between 2 and
/// [`MAX_TILE`].
/// Every transformation returns a new grid.
///
/// # Example
///
/// ```
/// use twenty48_engine::{Direction, Grid};
///
/// let grid = Grid::from_rows([
///     [2, 2, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ])?;
///
/// let (shifted, moved) = grid.shifted(Direction::Left);
/// assert!(moved);
/// assert_eq!(shifted.rows()[0], [4, 0, 0, 0]);
/// # Ok::<(), twenty48_engine::InvalidTileError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Row; GRID_SIZE]", into = "[Row; GRID_SIZE]")]
pub struct Grid {
    rows: [Row; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TryFrom<[Row; GRID_SIZE]> for Grid {
    type Error = InvalidTileError;

    fn try_from(rows: [Row; GRID_SIZE]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for [Row; GRID_SIZE] {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

impl Grid {
    /// The grid with every cell empty.
    pub const EMPTY: Self = Self {
        rows: [[0; GRID_SIZE]; GRID_SIZE],
    };

    /// Builds a grid from row-major values, rejecting anything that is not a tile.
    pub fn from_rows(rows: [Row; GRID_SIZE]) -> Result<Self, InvalidTileError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(InvalidTileError { row, col, value });
                }
            }
        }
        Ok(Self { rows })
    }

    #[must_use]
    pub const fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.rows
    }

    #[must_use]
    pub const fn get(&self, pos: Position) -> u32 {
        self.rows[pos.row][pos.col]
    }

    /// Returns a copy of this grid with the cell at `pos` set to `value`.
    pub fn with_tile(self, pos: Position, value: u32) -> Result<Self, InvalidTileError> {
        if !is_valid_tile(value) {
            return Err(InvalidTileError {
                row: pos.row,
                col: pos.col,
                value,
            });
        }
        Ok(self.with_tile_unchecked(pos, value))
    }

    pub(crate) fn with_tile_unchecked(mut self, pos: Position, value: u32) -> Self {
        self.rows[pos.row][pos.col] = value;
        self
    }

    /// Matrix transpose. Applying it twice yields the original grid.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let rows = std::array::from_fn(|row| std::array::from_fn(|col| self.rows[col][row]));
        Self { rows }
    }

    /// Reverses the order of cells within each row. Self-inverse.
    #[must_use]
    pub fn reversed_rows(&self) -> Self {
        let rows = self.rows.map(|mut row| {
            row.reverse();
            row
        });
        Self { rows }
    }

    /// Slides all tiles toward `direction`, merging equal neighbours once.
    ///
    /// Returns the new grid together with whether any row changed. Only
    /// [`Direction::Left`] collapses rows directly; the other directions are
    /// expressed through [`reversed_rows`](Self::reversed_rows) and
    /// [`transposed`](Self::transposed).
    #[must_use]
    pub fn shifted(&self, direction: Direction) -> (Self, bool) {
        match direction {
            Direction::Left => self.collapsed_rows(),
            Direction::Right => {
                let (grid, moved) = self.reversed_rows().collapsed_rows();
                (grid.reversed_rows(), moved)
            }
            Direction::Up => {
                let (grid, moved) = self.transposed().shifted(Direction::Left);
                (grid.transposed(), moved)
            }
            Direction::Down => {
                let (grid, moved) = self.transposed().shifted(Direction::Right);
                (grid.transposed(), moved)
            }
        }
    }

    fn collapsed_rows(&self) -> (Self, bool) {
        let mut moved = false;
        let rows = self.rows.map(|row| {
            let collapsed = collapse(row);
            moved |= collapsed != row;
            collapsed
        });
        (Self { rows }, moved)
    }

    /// Returns `true` if sliding toward `direction` would change the grid.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.shifted(direction).1
    }

    /// Iterates over the empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Self::positions().filter(|&pos| self.get(pos) == 0)
    }

    fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.empty_positions().count()
    }

    /// Returns `true` when no move can change the grid.
    ///
    /// That is the case when no cell is empty and no mergeable cell equals its
    /// right or lower neighbour. Checking only right and lower neighbours visits
    /// every adjacent pair of both axes exactly once.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.empty_positions().next().is_some() {
            return false;
        }
        Self::positions().all(|Position { row, col }| {
            let value = self.rows[row][col];
            if !can_merge(value) {
                return true;
            }
            let right_differs = col + 1 == GRID_SIZE || self.rows[row][col + 1] != value;
            let below_differs = row + 1 == GRID_SIZE || self.rows[row + 1][col] != value;
            right_differs && below_differs
        })
    }

    /// Returns `true` if any cell holds [`WINNING_TILE`].
    #[must_use]
    pub fn has_winning_tile(&self) -> bool {
        self.rows.iter().flatten().any(|&value| value == WINNING_TILE)
    }

    /// Sum of all cell values. This is the game score.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.rows.iter().flatten().map(|&value| u64::from(value)).sum()
    }

    /// Largest tile on the grid, `0` for an empty grid.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "+------+------+------+------+";
        writeln!(f, "{SEPARATOR}")?;
        for row in &self.rows {
            write!(f, "|")?;
            for &value in row {
                if value == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{value:^6}|")?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}
