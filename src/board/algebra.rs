//! Placing tiles and reading words off the board.
//!
//! A play is applied in two steps:
//!
//! 1. [`place`] walks from the start square along the play direction,
//!    skipping over occupied squares and writing one rack tile into each
//!    empty one. The result is the *unexpanded* major word: only the squares
//!    the walk touched.
//! 2. [`expand`] extends a word backward and forward over any contiguous
//!    occupied squares, giving the full line. Running it in the orthogonal
//!    direction from each newly placed tile finds the minor words.
//!
//! For example, adding `P,R` around the board letters of `S.A.K` returns the
//! unexpanded word `PAR`; expanding it across gives `SPARK`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{Board, Direction, Position};
use crate::core::tile::PlacedTile;

/// Where a letter of a word came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Placed by the current play.
    Rack,
    /// Already on the board before the play.
    Board,
}

/// One letter of a word with its provenance and square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letter {
    pub tile: PlacedTile,
    pub source: Source,
    pub position: Position,
}

impl Letter {
    #[must_use]
    pub fn rack(tile: PlacedTile, position: Position) -> Self {
        Self {
            tile,
            source: Source::Rack,
            position,
        }
    }

    #[must_use]
    pub fn board(tile: PlacedTile, position: Position) -> Self {
        Self {
            tile,
            source: Source::Board,
            position,
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.source == Source::Rack
    }
}

/// A run of letters along one line of the board.
///
/// SmallVec keeps words up to board width (15) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    letters: SmallVec<[Letter; 15]>,
}

impl Word {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_letters(letters: impl IntoIterator<Item = Letter>) -> Self {
        Self {
            letters: letters.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter()
    }

    /// Lower-case text, blanks reading as their assigned letter.
    #[must_use]
    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.tile.lowercase()).collect()
    }

    /// Direction the word runs in; `None` for fewer than two letters.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match (self.letters.first(), self.letters.get(1)) {
            (Some(a), Some(b)) if a.position.row == b.position.row => Some(Direction::Across),
            (Some(_), Some(_)) => Some(Direction::Down),
            _ => None,
        }
    }

    /// True if every letter was placed by the current play.
    #[must_use]
    pub fn all_new(&self) -> bool {
        self.letters.iter().all(Letter::is_new)
    }

    /// Does any letter sit on `pos`?
    #[must_use]
    pub fn covers(&self, pos: Position) -> bool {
        self.letters.iter().any(|l| l.position == pos)
    }
}

/// Write `tiles` onto `board` starting at `start`, skipping occupied squares.
///
/// Returns the unexpanded word, or `None` if the walk leaves the board before
/// every tile is placed. Tiles written before leaving the board stay written;
/// callers place onto a scratch copy and keep it only on success.
pub fn place(
    tiles: &[PlacedTile],
    start: Position,
    direction: Direction,
    board: &mut Board,
) -> Option<Word> {
    let mut word = Word::new();
    let mut remaining = tiles.iter();
    let mut next = remaining.next();
    let mut position = start;

    while let Some(&tile) = next {
        if !board.contains(position) {
            return None;
        }

        match board.get(position) {
            Some(existing) => word.letters.push(Letter::board(existing, position)),
            None => {
                board.set(position, tile);
                word.letters.push(Letter::rack(tile, position));
                next = remaining.next();
            }
        }

        position = position.step(direction, true)?;
    }

    Some(word)
}

/// Extend `word` over contiguous occupied squares on both ends.
///
/// An empty word is returned unchanged.
#[must_use]
pub fn expand(mut word: Word, direction: Direction, board: &Board) -> Word {
    let (Some(first), Some(last)) = (word.letters.first().copied(), word.letters.last().copied())
    else {
        return word;
    };

    let mut prefix: SmallVec<[Letter; 15]> = SmallVec::new();
    let mut position = first.position.step(direction, false);
    while let Some(pos) = position {
        let Some(tile) = board.get(pos) else { break };
        prefix.push(Letter::board(tile, pos));
        position = pos.step(direction, false);
    }
    prefix.reverse();
    word.letters.insert_many(0, prefix);

    let mut position = last.position.step(direction, true);
    while let Some(pos) = position {
        let Some(tile) = board.get(pos) else { break };
        word.letters.push(Letter::board(tile, pos));
        position = pos.step(direction, true);
    }

    word
}

/// Perpendicular words of two or more letters through each newly placed
/// letter of `major`.
#[must_use]
pub fn minor_words(major: &Word, direction: Direction, board: &Board) -> Vec<Word> {
    let across = direction.orthogonal();
    major
        .iter()
        .filter(|letter| letter.is_new())
        .map(|&letter| expand(Word::from_letters([letter]), across, board))
        .filter(|word| word.len() > 1)
        .collect()
}
