//! The bag of undrawn tiles.
//!
//! The front of the sequence is drawn next. Shuffles always go through
//! [`GameRng::shuffle`], so the bag order depends only on its contents and
//! the RNG state stored next to it in the `GameState`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use super::tile::{Tile, TileTable};

/// Ordered sequence of undrawn tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag {
    tiles: Vector<Tile>,
}

impl Bag {
    /// A bag holding the given tiles in order.
    #[must_use]
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// A fresh, shuffled bag: `frequency` copies of each tile kind (blank
    /// first, then `A..=Z`), permuted by `rng`.
    #[must_use]
    pub fn fill(frequencies: &TileTable<u32>, rng: &mut GameRng) -> Self {
        let ordered = frequencies
            .iter()
            .flat_map(|(tile, &count)| std::iter::repeat(tile).take(count as usize));
        Self::from_tiles(rng.shuffle(ordered))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Take up to `n` tiles from the front.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let n = n.min(self.tiles.len());
        let rest = self.tiles.split_off(n);
        let drawn = std::mem::replace(&mut self.tiles, rest);
        drawn.into_iter().collect()
    }

    /// Put `returned` tiles back (sorted by code) and reshuffle the whole bag.
    pub fn put_back(&mut self, returned: &[Tile], rng: &mut GameRng) {
        let mut returned = returned.to_vec();
        returned.sort();
        let all = self.tiles.iter().copied().chain(returned);
        self.tiles = rng.shuffle(all).into_iter().collect();
    }
}
