//! Error types.
//!
//! Rule violations are ordinary values: `apply` returns a [`MoveError`] and
//! leaves the engine untouched. The remaining errors cover loading
//! configuration, word lists and checkpoints.

use std::path::PathBuf;

use super::player::PlayerId;

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is not running")]
    NotRunning,

    #[error("it is {expected}'s turn, not {got}'s")]
    OutOfTurn { expected: PlayerId, got: PlayerId },

    #[error("last move was not a play")]
    NoPendingPlay,

    #[error("last move was a play, so you must challenge or approve")]
    ChallengePending,

    #[error("no tiles played")]
    NoTiles,

    #[error("invalid tile codes")]
    InvalidTileCodes,

    #[error("rack doesn't contain the given tiles")]
    RackMissingTiles,

    #[error("bag has less than {required} tiles")]
    BagTooSmall { required: usize },

    #[error("invalid direction {0}")]
    InvalidDirection(u8),

    #[error("first position not in board bounds")]
    StartOutOfBounds,

    #[error("first position is not empty")]
    StartOccupied,

    #[error("word goes out of board bounds")]
    OutOfBounds,

    #[error("first word is not on the center of the board")]
    NotOnCenter,

    #[error("word doesn't connect with other tiles on board")]
    Disconnected,

    #[error("move doesn't form any word")]
    NoWordFormed,

    #[error("score is incorrect, correct value is {expected} (declared {declared})")]
    WrongScore { expected: u32, declared: u32 },
}

/// A raw tile code outside its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid tile code {0}")]
pub struct InvalidTileCode(pub u8);

/// A seat index other than 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid seat {0}")]
pub struct InvalidSeat(pub u8);

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid timespan {0:?}, expected [-][MM:]SS[.fff]")]
    Timespan(String),

    #[error("board design has no squares")]
    EmptyDesign,

    #[error("unknown square kind {0} in board design")]
    UnknownSquare(u8),

    #[error("missing {table} entry for tile {name:?}")]
    MissingTile { table: &'static str, name: String },

    #[error("unknown tile name {0:?}")]
    UnknownTileName(String),

    #[error("rack size must be at least 1")]
    EmptyRack,

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading a word list.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read word list {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when encoding or decoding a checkpoint.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("binary checkpoint error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("JSON checkpoint error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checkpoint board is {rows}x{columns}, design is {design_rows}x{design_columns}")]
    DesignMismatch {
        rows: usize,
        columns: usize,
        design_rows: usize,
        design_columns: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::BagTooSmall { required: 7 }.to_string(),
            "bag has less than 7 tiles"
        );
        assert_eq!(
            MoveError::OutOfTurn {
                expected: PlayerId::FIRST,
                got: PlayerId::SECOND,
            }
            .to_string(),
            "it is Player 1's turn, not Player 2's"
        );
        assert_eq!(
            MoveError::WrongScore { expected: 12, declared: 10 }.to_string(),
            "score is incorrect, correct value is 12 (declared 10)"
        );
    }
}
