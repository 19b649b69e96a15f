//! # tile-engine
//!
//! Deterministic rules engine and turn protocol for a two-player
//! tile-placement word game.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: a seed fixes the bag, and the RNG state travels
//!    inside every `GameState`. Resuming a checkpoint reproduces the same
//!    future shuffles.
//!
//! 2. **Snapshots, not mutation**: each accepted move produces a new
//!    `GameState`. Persistent data structures (`im`) make those snapshots
//!    share storage, so a challenge rolls back by reusing an earlier one.
//!
//! 3. **Rejections are values**: an illegal move returns a `MoveError` and
//!    changes nothing.
//!
//! ## Modules
//!
//! - `core`: tiles, players, racks and bag, state, moves, RNG, clocks,
//!   configuration, errors
//! - `board`: premium-square designs, the grid, placing tiles and reading
//!   words
//! - `scoring`: word and play scores
//! - `lexicon`: word lists
//! - `rules`: `GameEngine`, results, history and settlement
//!
//! ## Example
//!
//! ```
//! use tile_engine::{Direction, GameConfig, GameEngine, Move, PlayMove, PlayerId, WordList};
//!
//! let mut engine = GameEngine::new(GameConfig::standard(), WordList::from_words(["cat"]));
//! engine.start(7);
//!
//! // A move from the wrong player is rejected without side effects.
//! let wrong = engine.apply(PlayerId::SECOND, Move::Pass, 0);
//! assert!(wrong.is_err());
//!
//! // Playing tiles the rack does not hold is rejected too.
//! let play = Move::Play(PlayMove::new(8, 8, Direction::Across, vec![17, 17, 17], 30));
//! assert!(engine.apply(PlayerId::FIRST, play, 0).is_err());
//! assert_eq!(engine.history().len(), 1);
//! ```

pub mod core;
pub mod board;
pub mod scoring;
pub mod lexicon;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Bag, GameConfig, GameRng, GameRngState, GameState, Move, MoveError, Penalty, PlacedTile,
    PlayMove, PlayerId, PlayerPair, PlayerState, Rack, Tile, TileTable,
};

pub use crate::board::{Board, Design, Direction, Position, Square, Word};

pub use crate::scoring::{score, Scorer};

pub use crate::lexicon::{Lexicon, WordList};

pub use crate::rules::{
    ChallengeOutcome, CurrentInfo, GameEngine, GameResult, HistoryEntry, MoveResult, Outcome,
    Phase, PlayOutcome, Settlement,
};
