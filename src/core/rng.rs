//! Deterministic random number generation for bag shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore, stored inside every
//!   `GameState` so a resumed game reproduces the same future shuffles
//! - **Keyed shuffle**: one ordering key drawn per element, then a stable sort
//!   by key. The permutation depends only on the RNG state and the input
//!   order, never on how a particular shuffle algorithm walks the slice.
//!
//! ```
//! use tile_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let state = rng.state();
//! let first = rng.shuffle(vec![1, 2, 3, 4, 5]);
//!
//! let mut restored = GameRng::from_state(&state);
//! assert_eq!(restored.shuffle(vec![1, 2, 3, 4, 5]), first);
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used only for bag shuffles.
///
/// Uses ChaCha8 for speed while keeping a seekable stream position.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Draw the next ordering key.
    pub fn next_key(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Shuffle a sequence by decorating each element with a fresh key.
    ///
    /// Advances the stream exactly once per element.
    #[must_use]
    pub fn shuffle<T>(&mut self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        shuffle_by_key(items, || self.next_key())
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Decorate-sort-undecorate permutation.
///
/// `key` is called once per element in input order; elements are then
/// stably sorted by their key, so equal keys keep their input order.
pub fn shuffle_by_key<T>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut() -> u32,
) -> Vec<T> {
    let mut decorated: Vec<(u32, T)> = items.into_iter().map(|item| (key(), item)).collect();
    decorated.sort_by_key(|&(k, _)| k);
    decorated.into_iter().map(|(_, item)| item).collect()
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many keys have been drawn. A state with `word_pos == 0` is the
/// same as a bare seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl GameRngState {
    /// Fresh state for a seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, word_pos: 0 }
    }
}
