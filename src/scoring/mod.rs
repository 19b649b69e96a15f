//! Word scoring.
//!
//! ## Rules
//!
//! - Each letter is worth its tile value; blanks are always worth 0
//! - Double/Triple Letter squares multiply the letter on them
//! - Double/Triple Word squares multiply the whole word, and stack
//!   multiplicatively when one word covers several
//! - Premium squares only count for letters placed by the current play;
//!   a letter already on the board scores at face value
//! - Using the whole rack in one play adds the bingo bonus once
//!
//! The engine compares the computed total with the score the mover declared;
//! this module never corrects a declaration.

use crate::board::{Design, Word};
use crate::core::tile::TileTable;

/// Score of a single word.
#[must_use]
pub fn word_score(word: &Word, design: &Design, values: &TileTable<u32>) -> u32 {
    let mut letters = 0;
    let mut multiplier = 1;

    for letter in word.iter() {
        let base = if letter.tile.is_blank() {
            0
        } else {
            values[letter.tile.origin()]
        };

        if letter.is_new() {
            let square = design.square(letter.position);
            letters += base * square.letter_multiplier();
            multiplier *= square.word_multiplier();
        } else {
            letters += base;
        }
    }

    letters * multiplier
}

/// Total score of a set of words. Independent of word order.
#[must_use]
pub fn score(words: &[Word], design: &Design, values: &TileTable<u32>) -> u32 {
    words.iter().map(|word| word_score(word, design, values)).sum()
}

/// Scores complete plays, including the bingo bonus.
#[derive(Clone, Copy, Debug)]
pub struct Scorer<'a> {
    design: &'a Design,
    values: &'a TileTable<u32>,
    rack_size: usize,
    bingo: u32,
}

impl<'a> Scorer<'a> {
    #[must_use]
    pub fn new(
        design: &'a Design,
        values: &'a TileTable<u32>,
        rack_size: usize,
        bingo: u32,
    ) -> Self {
        Self {
            design,
            values,
            rack_size,
            bingo,
        }
    }

    /// Score of a play that formed `words` using `tiles_placed` rack tiles.
    #[must_use]
    pub fn play(&self, words: &[Word], tiles_placed: usize) -> u32 {
        let bonus = if tiles_placed == self.rack_size { self.bingo } else { 0 };
        score(words, self.design, self.values) + bonus
    }
}
