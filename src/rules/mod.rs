//! Rules and turn protocol.
//!
//! `GameEngine` owns the authoritative state and history and is the only
//! thing that changes the board, racks or bag. Everything it reports back
//! is defined in `result`.

pub mod engine;
mod play;
pub mod result;

pub use engine::GameEngine;
pub use result::{
    ChallengeOutcome, CurrentInfo, GameResult, HistoryEntry, InvalidWord, MoveResult, Outcome,
    Phase, PlayOutcome, Settlement,
};
