//! Tile codes in their two encodings.
//!
//! ## Rest encoding (`Tile`)
//!
//! Tiles sitting in a rack or in the bag: `1..=26` for the letters `A..=Z`
//! and `100` for a blank.
//!
//! ## Placement encoding (`PlacedTile`)
//!
//! Tiles put on the board by a play: `1..=26` for real letters and
//! `101..=126` for a blank standing in for `A..=Z`. The board stores this
//! encoding so blanks keep their assigned letter and still score zero.
//!
//! Conversions between the two are total: every `PlacedTile` has exactly one
//! origin `Tile` it was taken from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use super::error::InvalidTileCode;

/// Number of distinct tile kinds (26 letters plus the blank).
pub const TILE_KINDS: usize = 27;

const BLANK_CODE: u8 = 100;

/// A tile at rest in a rack or bag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tile(u8);

impl Tile {
    /// The blank tile.
    pub const BLANK: Tile = Tile(BLANK_CODE);

    /// Validate a raw rest-encoding code.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        match code {
            1..=26 | BLANK_CODE => Some(Self(code)),
            _ => None,
        }
    }

    /// Tile for a letter index (1 = `A`, 26 = `Z`).
    #[must_use]
    pub const fn letter(index: u8) -> Option<Self> {
        match index {
            1..=26 => Some(Self(index)),
            _ => None,
        }
    }

    /// Parse a tile name: `_` for the blank, `A..=Z` for letters.
    #[must_use]
    pub fn from_name(name: char) -> Option<Self> {
        match name {
            '_' => Some(Self::BLANK),
            'A'..='Z' => Some(Self(name as u8 - b'A' + 1)),
            _ => None,
        }
    }

    /// Raw code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == BLANK_CODE
    }

    /// Tile name: `_` or `A..=Z`.
    #[must_use]
    pub fn name(self) -> char {
        if self.is_blank() {
            '_'
        } else {
            (b'A' + self.0 - 1) as char
        }
    }

    /// Slot in a [`TileTable`]: 0 for the blank, 1..=26 for letters.
    #[must_use]
    pub const fn slot(self) -> usize {
        if self.is_blank() {
            0
        } else {
            self.0 as usize
        }
    }

    /// All tile kinds, blank first then `A..=Z`.
    pub fn all() -> impl Iterator<Item = Tile> {
        std::iter::once(Tile::BLANK).chain((1..=26).map(Tile))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for Tile {
    type Error = InvalidTileCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code).ok_or(InvalidTileCode(code))
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.0
    }
}

/// A tile as placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlacedTile(u8);

impl PlacedTile {
    /// Validate a raw placement-encoding code.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        match code {
            1..=26 | 101..=126 => Some(Self(code)),
            _ => None,
        }
    }

    /// A blank standing in for the given letter index.
    #[must_use]
    pub const fn blank_as(letter: u8) -> Option<Self> {
        match letter {
            1..=26 => Some(Self(BLANK_CODE + letter)),
            _ => None,
        }
    }

    /// Parse a placed tile name: upper case for a real letter, lower case
    /// for a blank assigned that letter.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A'..='Z' => Some(Self(c as u8 - b'A' + 1)),
            'a'..='z' => Some(Self(BLANK_CODE + c as u8 - b'a' + 1)),
            _ => None,
        }
    }

    /// Raw code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 > BLANK_CODE
    }

    /// The rack tile this placement consumed.
    #[must_use]
    pub const fn origin(self) -> Tile {
        if self.is_blank() {
            Tile::BLANK
        } else {
            Tile(self.0)
        }
    }

    /// Letter index shown on the board (1 = `A`).
    #[must_use]
    pub const fn letter(self) -> u8 {
        if self.is_blank() {
            self.0 - BLANK_CODE
        } else {
            self.0
        }
    }

    /// Lower-case letter used for lexicon lookups.
    #[must_use]
    pub fn lowercase(self) -> char {
        (b'a' + self.letter() - 1) as char
    }
}

impl fmt::Display for PlacedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = (b'A' + self.letter() - 1) as char;
        if self.is_blank() {
            write!(f, "{}", upper.to_ascii_lowercase())
        } else {
            write!(f, "{}", upper)
        }
    }
}

impl TryFrom<u8> for PlacedTile {
    type Error = InvalidTileCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code).ok_or(InvalidTileCode(code))
    }
}

impl From<PlacedTile> for u8 {
    fn from(tile: PlacedTile) -> u8 {
        tile.0
    }
}

/// Per-tile-kind values (scores, frequencies).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTable<T> {
    values: [T; TILE_KINDS],
}

impl<T: Copy + Default> TileTable<T> {
    /// Build from a function over every tile kind.
    pub fn from_fn(mut f: impl FnMut(Tile) -> T) -> Self {
        let mut values = [T::default(); TILE_KINDS];
        for tile in Tile::all() {
            values[tile.slot()] = f(tile);
        }
        Self { values }
    }
}

impl<T> TileTable<T> {
    /// Iterate over (tile, value) pairs, blank first.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, &T)> {
        Tile::all().map(move |tile| (tile, &self.values[tile.slot()]))
    }
}

impl<T> Index<Tile> for TileTable<T> {
    type Output = T;

    fn index(&self, tile: Tile) -> &Self::Output {
        &self.values[tile.slot()]
    }
}

impl<T> IndexMut<Tile> for TileTable<T> {
    fn index_mut(&mut self, tile: Tile) -> &mut Self::Output {
        &mut self.values[tile.slot()]
    }
}

/// Format rest tiles as comma-separated names, e.g. `A,Z,_`.
#[must_use]
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles.iter().map(Tile::to_string).collect::<Vec<_>>().join(",")
}

/// Format placed tiles as comma-separated names, e.g. `A,b,Z`.
#[must_use]
pub fn format_placed(tiles: &[PlacedTile]) -> String {
    tiles.iter().map(PlacedTile::to_string).collect::<Vec<_>>().join(",")
}
