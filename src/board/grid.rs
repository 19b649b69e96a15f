//! Board grid, positions and directions.
//!
//! The board is append-only during play: a square, once filled, keeps its
//! tile. Cells live in an `im::Vector` so every snapshot kept in the history
//! shares structure with its neighbours.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::design::Design;
use crate::core::error::MoveError;
use crate::core::tile::PlacedTile;

/// A square on the board, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Step one square along `direction`; `None` on underflow.
    #[must_use]
    pub fn step(self, direction: Direction, forward: bool) -> Option<Position> {
        match (direction, forward) {
            (Direction::Across, true) => Some(Position { col: self.col + 1, ..self }),
            (Direction::Across, false) => Some(Position { col: self.col.checked_sub(1)?, ..self }),
            (Direction::Down, true) => Some(Position { row: self.row + 1, ..self }),
            (Direction::Down, false) => Some(Position { row: self.row.checked_sub(1)?, ..self }),
        }
    }
}

/// Placement direction. Wire code 0 is across, 1 is down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The perpendicular direction.
    #[must_use]
    pub const fn orthogonal(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = MoveError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Across),
            1 => Ok(Direction::Down),
            other => Err(MoveError::InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        match direction {
            Direction::Across => 0,
            Direction::Down => 1,
        }
    }
}

/// A board snapshot that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBoard {
    #[error("board rows have different lengths")]
    Ragged,

    #[error("invalid tile code {code} at row {row}, column {col}")]
    Tile { row: usize, col: usize, code: u8 },
}

/// rows×columns grid of placed tiles; code 0 is an empty square.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vector<u8>,
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: std::iter::repeat(0).take(rows * columns).collect(),
        }
    }

    /// An empty board sized for a design.
    #[must_use]
    pub fn for_design(design: &Design) -> Self {
        Self::empty(design.rows(), design.columns())
    }

    /// Build from raw rows, validating every non-zero code.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, InvalidBoard> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return Err(InvalidBoard::Ragged);
        }

        for (r, row) in rows.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                if code != 0 && PlacedTile::new(code).is_none() {
                    return Err(InvalidBoard::Tile { row: r, col: c, code });
                }
            }
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Raw rows, 0 for empty squares.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|r| self.cells.iter().skip(r * self.columns).take(self.columns).copied().collect())
            .collect()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Is the position on the board?
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Tile at a position; `None` when empty or out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<PlacedTile> {
        if !self.contains(pos) {
            return None;
        }
        PlacedTile::new(self.cells[pos.row * self.columns + pos.col])
    }

    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Put a tile on an in-bounds square.
    pub(crate) fn set(&mut self, pos: Position, tile: PlacedTile) {
        debug_assert!(self.contains(pos));
        let index = pos.row * self.columns + pos.col;
        self.cells.set(index, tile.code());
    }

    /// True when no square holds a tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = InvalidBoard;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

/// Framed text rendering: column letters on top and bottom, two-digit row
/// numbers on both sides, `.` for empty squares and lower case for blanks.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            return Ok(());
        }

        let header: Vec<String> = (0..self.columns)
            .map(|c| ((b'A' + c as u8) as char).to_string())
            .collect();
        let header = header.join(" ");

        writeln!(f, "  {header}  ")?;
        for r in 0..self.rows {
            let cells: Vec<String> = (0..self.columns)
                .map(|c| match self.get(Position { row: r, col: c }) {
                    Some(tile) => tile.to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{:02}{}{:02}", r + 1, cells.join(" "), r + 1)?;
        }
        write!(f, "  {header}  ")
    }
}
