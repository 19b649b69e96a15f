//! Premium-square layout.

use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::core::error::ConfigError;

/// Kind of a board square.
///
/// Config files number these 0 through 4 in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Square {
    #[default]
    Normal,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Square {
    /// Multiplier applied to the letter placed on this square.
    #[must_use]
    pub const fn letter_multiplier(self) -> u32 {
        match self {
            Square::DoubleLetter => 2,
            Square::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to the whole word covering this square.
    #[must_use]
    pub const fn word_multiplier(self) -> u32 {
        match self {
            Square::DoubleWord => 2,
            Square::TripleWord => 3,
            _ => 1,
        }
    }

    fn from_layout_char(c: char) -> Square {
        match c {
            'd' => Square::DoubleLetter,
            't' => Square::TripleLetter,
            'D' => Square::DoubleWord,
            'T' => Square::TripleWord,
            _ => Square::Normal,
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Square::Normal),
            1 => Ok(Square::DoubleLetter),
            2 => Ok(Square::TripleLetter),
            3 => Ok(Square::DoubleWord),
            4 => Ok(Square::TripleWord),
            other => Err(ConfigError::UnknownSquare(other)),
        }
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square as u8
    }
}

/// Standard 15×15 layout, top half plus the middle row.
///
/// `T` triple word, `D` double word, `t` triple letter, `d` double letter.
const STANDARD_LAYOUT: [&str; 8] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
];

/// Immutable rows×columns grid of square kinds.
///
/// The design fixes the board dimensions for a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Design {
    rows: usize,
    columns: usize,
    squares: Vec<Square>,
}

impl Design {
    /// Build from numeric rows as found in config files.
    ///
    /// The column count is the length of the shortest row; longer rows are
    /// cut to it.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let columns = rows.iter().map(Vec::len).min().unwrap_or(0);
        if rows.is_empty() || columns == 0 {
            return Err(ConfigError::EmptyDesign);
        }

        let squares = rows
            .iter()
            .flat_map(|row| row[..columns].iter())
            .map(|&code| Square::try_from(code))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows: rows.len(),
            columns,
            squares,
        })
    }

    /// A design with no premium squares.
    #[must_use]
    pub fn plain(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "Design must have at least one square");
        Self {
            rows,
            columns,
            squares: vec![Square::Normal; rows * columns],
        }
    }

    /// The standard 15×15 premium layout.
    #[must_use]
    pub fn standard() -> Self {
        let top: Vec<Vec<Square>> = STANDARD_LAYOUT
            .iter()
            .map(|row| row.chars().map(Square::from_layout_char).collect())
            .collect();

        let squares = top
            .iter()
            .chain(top.iter().rev().skip(1))
            .flatten()
            .copied()
            .collect();

        Self {
            rows: 15,
            columns: 15,
            squares,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Center square; the first play must cover it.
    #[must_use]
    pub fn center(&self) -> Position {
        Position {
            row: self.rows / 2,
            col: self.columns / 2,
        }
    }

    /// Square kind at a position, `Normal` when out of bounds.
    #[must_use]
    pub fn square(&self, pos: Position) -> Square {
        if pos.row < self.rows && pos.col < self.columns {
            self.squares[pos.row * self.columns + pos.col]
        } else {
            Square::Normal
        }
    }

    /// Numeric rows, the inverse of [`Design::from_rows`].
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.squares
            .chunks(self.columns)
            .map(|row| row.iter().map(|&s| u8::from(s)).collect())
            .collect()
    }
}
