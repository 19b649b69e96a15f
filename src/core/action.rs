//! Moves a player can submit.
//!
//! A move is a tagged union over the five kinds the turn protocol knows.
//! Each variant carries only the fields it needs, in the raw codes the wire
//! layer delivers: tile codes and the direction are validated by the engine
//! when the move is applied, so a malformed move is an ordinary rejection.
//!
//! ```
//! use tile_engine::board::Direction;
//! use tile_engine::core::{Move, PlayMove};
//!
//! let play = Move::Play(PlayMove::new(8, 8, Direction::Across, vec![3, 1, 20], 10));
//! assert_eq!(play.kind(), "play");
//! assert_eq!(Move::Exchange { tiles: vec![1, 100] }.kind(), "exchange");
//! ```

use serde::{Deserialize, Serialize};

use crate::board::Direction;

/// A move submitted by the current player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Give up the turn.
    Pass,

    /// Return rest-encoded tiles to the bag for the same number of new ones.
    /// Zero codes are padding.
    Exchange { tiles: Vec<u8> },

    /// Place tiles on the board.
    Play(PlayMove),

    /// Dispute the opponent's last play.
    Challenge,

    /// Accept the opponent's last play.
    NoChallenge,
}

impl Move {
    /// Short lower-case name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Pass => "pass",
            Move::Exchange { .. } => "exchange",
            Move::Play(_) => "play",
            Move::Challenge => "challenge",
            Move::NoChallenge => "no_challenge",
        }
    }

    /// True for the two answers to a pending play.
    #[must_use]
    pub fn is_challenge_response(&self) -> bool {
        matches!(self, Move::Challenge | Move::NoChallenge)
    }
}

/// Fields of a PLAY as received from the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayMove {
    /// Column of the first placed tile, 1-based.
    pub col: u8,
    /// Row of the first placed tile, 1-based.
    pub row: u8,
    /// Direction code: 0 across, 1 down.
    pub direction: u8,
    /// Placement-encoded tiles in walk order. Zero codes are padding.
    pub tiles: Vec<u8>,
    /// Score the mover claims for the play.
    pub score: u32,
}

impl PlayMove {
    #[must_use]
    pub fn new(col: u8, row: u8, direction: Direction, tiles: Vec<u8>, score: u32) -> Self {
        Self {
            col,
            row,
            direction: direction.into(),
            tiles,
            score,
        }
    }
}
