//! Core types: tiles, players, racks and bag, state, moves, RNG, clocks,
//! configuration and errors.
//!
//! Nothing here knows how a move is judged; that lives in `rules`.

pub mod tile;
pub mod player;
pub mod rng;
pub mod bag;
pub mod config;
pub mod action;
pub mod state;
pub mod time;
pub mod error;

pub use tile::{format_placed, format_tiles, PlacedTile, Tile, TileTable, TILE_KINDS};
pub use player::{PlayerId, PlayerPair};
pub use rng::{shuffle_by_key, GameRng, GameRngState};
pub use bag::Bag;
pub use config::{GameConfig, Penalty};
pub use action::{Move, PlayMove};
pub use state::{GameState, PlayerState, Rack};
pub use time::{format_timespan, parse_timespan};
pub use error::{
    CheckpointError, ConfigError, InvalidSeat, InvalidTileCode, LexiconError, MoveError,
};
