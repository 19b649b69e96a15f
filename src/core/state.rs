//! Game state snapshots.
//!
//! ## GameState
//!
//! Everything needed to resume a game exactly:
//! - Board
//! - Both players' racks, scores and clocks
//! - Whose turn it is
//! - Bag contents and the RNG state that will shuffle it next
//! - Elapsed time and turn counter
//!
//! The engine never edits a snapshot that is already in the history; it
//! clones the current one and edits the clone. Every collection is an `im`
//! structure, so that clone is cheap and shares storage with its parent.
//!
//! ## Checkpoints
//!
//! A `GameState` serializes as plain data, either compact
//! ([`GameState::to_bytes`], bincode) or readable ([`GameState::to_json`]).

use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::bag::Bag;
use super::config::GameConfig;
use super::error::CheckpointError;
use super::player::{PlayerId, PlayerPair};
use super::rng::{GameRng, GameRngState};
use super::tile::{Tile, TileTable};
use super::time::format_timespan;
use crate::board::Board;

/// A player's tiles: tile kind to count, never holding a zero count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OrdMap<Tile, u32>", into = "OrdMap<Tile, u32>")]
pub struct Rack {
    counts: OrdMap<Tile, u32>,
}

// Checkpoints may carry zero counts; they are dropped on load.
impl From<OrdMap<Tile, u32>> for Rack {
    fn from(counts: OrdMap<Tile, u32>) -> Self {
        let counts = counts.into_iter().filter(|&(_, n)| n > 0).collect();
        Self { counts }
    }
}

impl From<Rack> for OrdMap<Tile, u32> {
    fn from(rack: Rack) -> Self {
        rack.counts
    }
}

impl Rack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut rack = Self::new();
        rack.add(tiles);
        rack
    }

    /// Add tiles to the rack.
    pub fn add(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        for tile in tiles {
            *self.counts.entry(tile).or_insert(0) += 1;
        }
    }

    /// Does the rack hold every tile in `tiles`, counting repeats?
    #[must_use]
    pub fn contains_all(&self, tiles: &[Tile]) -> bool {
        let mut needed = TileTable::from_fn(|_| 0u32);
        for &tile in tiles {
            needed[tile] += 1;
        }
        for (tile, &n) in needed.iter() {
            if n > self.count(tile) {
                return false;
            }
        }
        true
    }

    /// Remove `tiles` if the rack holds all of them. Nothing is removed
    /// otherwise.
    pub fn remove_all(&mut self, tiles: &[Tile]) -> bool {
        if !self.contains_all(tiles) {
            return false;
        }
        for tile in tiles {
            if let Some(count) = self.counts.get_mut(tile) {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(tile);
                }
            }
        }
        true
    }

    /// Copies of one tile kind.
    #[must_use]
    pub fn count(&self, tile: Tile) -> u32 {
        self.counts.get(&tile).copied().unwrap_or(0)
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.values().map(|&n| n as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All tiles, sorted by code.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.counts
            .iter()
            .flat_map(|(&tile, &n)| std::iter::repeat(tile).take(n as usize))
            .collect()
    }

    /// Face value of the rack.
    #[must_use]
    pub fn value(&self, scores: &TileTable<u32>) -> u32 {
        self.counts.iter().map(|(&tile, &n)| scores[tile] * n).sum()
    }
}

/// Comma-separated tile names in code order, e.g. `A,A,Z,_`.
impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.tiles().iter().map(Tile::to_string).collect();
        write!(f, "{}", names.join(","))
    }
}

/// One player's part of the state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    pub rack: Rack,

    /// Running score. Penalties can take it below zero.
    pub score: i32,

    /// Clock in milliseconds. Negative once the player is in overtime.
    pub time: i64,
}

/// A complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: PlayerPair<PlayerState>,

    /// Player to move.
    pub current: PlayerId,

    pub bag: Bag,

    /// RNG state for the next bag shuffle.
    pub rng: GameRngState,

    /// Milliseconds charged to either clock since the game started.
    pub elapsed_ms: u64,

    /// Count of PASS, EXCHANGE and PLAY moves applied.
    pub turn: u32,
}

impl GameState {
    /// Fresh game: fill and shuffle the bag, then deal.
    ///
    /// Each player gets `min(rack size, bag / 2)` tiles from the front of the
    /// bag, the first player first.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut bag = Bag::fill(&config.tile_frequencies, &mut rng);

        let deal = config.rack_size.min(bag.len() / 2);
        let players = PlayerPair::from_fn(|player| PlayerState {
            rack: Rack::from_tiles(bag.draw(deal)),
            score: 0,
            time: config.starting_time(player),
        });

        Self {
            board: Board::for_design(&config.design),
            players,
            current: PlayerId::FIRST,
            bag,
            rng: rng.state(),
            elapsed_ms: 0,
            turn: 0,
        }
    }

    /// The player to move.
    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current]
    }

    /// Time remaining on both clocks together, never below zero.
    #[must_use]
    pub fn time_left(&self) -> i64 {
        self.players.iter().map(|(_, p)| p.time).sum::<i64>().max(0)
    }

    /// Charge `millis` to `player`'s clock.
    ///
    /// The total on both clocks is clamped at zero; whatever the total
    /// loses comes off `player`'s clock.
    pub fn charge_time(&mut self, player: PlayerId, millis: u64) {
        let delta = i64::try_from(millis).unwrap_or(i64::MAX);
        let total = self.time_left().saturating_sub(delta).max(0);
        self.players[player].time = total - self.players[player.opponent()].time;
        self.elapsed_ms = self.elapsed_ms.saturating_add(millis);
    }

    /// Tiles on the board, in both racks and in the bag.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.board.tile_count()
            + self.players.iter().map(|(_, p)| p.rack.len()).sum::<usize>()
            + self.bag.len()
    }

    /// Encode as a compact binary checkpoint.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a binary checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode as a JSON checkpoint.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bag: Vec<String> = self.bag.iter().map(Tile::to_string).collect();

        writeln!(f, "Remaining Time: {}", format_timespan(self.time_left()))?;
        writeln!(f, "Bag: {}", bag.join(","))?;
        writeln!(f, "Current Player: {}", self.current.index() + 1)?;
        for (id, player) in self.players.iter() {
            writeln!(
                f,
                "{}: Score: {}, Time: {}, rack: {}",
                id,
                player.score,
                format_timespan(player.time),
                player.rack
            )?;
        }
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Design;

    fn tile(name: char) -> Tile {
        Tile::from_name(name).unwrap()
    }

    fn small_config() -> GameConfig {
        GameConfig::standard()
            .with_design(Design::plain(5, 5))
            .with_rack_size(3)
            .with_starting_times(60_000, 60_000)
    }

    #[test]
    fn test_rack_add_remove() {
        let mut rack = Rack::from_tiles([tile('A'), tile('A'), Tile::BLANK]);
        assert_eq!(rack.len(), 3);
        assert_eq!(rack.count(tile('A')), 2);

        assert!(!rack.remove_all(&[tile('A'), tile('A'), tile('A')]));
        assert_eq!(rack.len(), 3);

        assert!(rack.remove_all(&[tile('A'), Tile::BLANK]));
        assert_eq!(rack.tiles(), vec![tile('A')]);
        assert_eq!(rack.count(Tile::BLANK), 0);

        assert!(rack.remove_all(&[tile('A')]));
        assert!(rack.is_empty());
    }

    #[test]
    fn test_rack_load_drops_zero_counts() {
        let rack: Rack = serde_json::from_str(r#"{"1": 2, "5": 0, "100": 0}"#).unwrap();
        assert_eq!(rack.tiles(), vec![tile('A'), tile('A')]);
        assert_eq!(rack.count(tile('E')), 0);

        let empty: Rack = serde_json::from_str(r#"{"3": 0}"#).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty, Rack::new());
    }

    #[test]
    fn test_rack_display_sorted_by_code() {
        let rack = Rack::from_tiles([tile('Z'), Tile::BLANK, tile('A'), tile('A')]);
        assert_eq!(rack.to_string(), "A,A,Z,_");
    }

    #[test]
    fn test_rack_value() {
        let scores = GameConfig::standard().tile_scores;
        let rack = Rack::from_tiles([tile('Q'), tile('A'), Tile::BLANK]);
        assert_eq!(rack.value(&scores), 11);
    }

    #[test]
    fn test_new_state_deals_racks() {
        let config = small_config();
        let state = GameState::new(&config, 42);

        assert_eq!(state.players[PlayerId::FIRST].rack.len(), 3);
        assert_eq!(state.players[PlayerId::SECOND].rack.len(), 3);
        assert_eq!(state.bag.len(), 94);
        assert_eq!(state.total_tiles(), config.total_tiles());
        assert_eq!(state.current, PlayerId::FIRST);
        assert_eq!(state.turn, 0);
        assert_eq!(state.time_left(), 120_000);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_small_bag_split_evenly() {
        let freqs = TileTable::from_fn(|t| u32::from(t == tile('A')) * 5);
        let config = small_config().with_tile_frequencies(freqs);
        let state = GameState::new(&config, 1);

        assert_eq!(state.players[PlayerId::FIRST].rack.len(), 2);
        assert_eq!(state.players[PlayerId::SECOND].rack.len(), 2);
        assert_eq!(state.bag.len(), 1);
    }

    #[test]
    fn test_same_seed_same_state() {
        let config = small_config();
        assert_eq!(GameState::new(&config, 9), GameState::new(&config, 9));
        assert_ne!(GameState::new(&config, 9), GameState::new(&config, 10));
    }

    #[test]
    fn test_charge_time() {
        let mut state = GameState::new(&small_config(), 1);
        state.charge_time(PlayerId::FIRST, 5_000);
        assert_eq!(state.players[PlayerId::FIRST].time, 55_000);
        assert_eq!(state.players[PlayerId::SECOND].time, 60_000);
        assert_eq!(state.elapsed_ms, 5_000);

        // Overtime drives the clock negative until the total runs out.
        state.charge_time(PlayerId::FIRST, 100_000);
        assert_eq!(state.players[PlayerId::FIRST].time, -45_000);
        state.charge_time(PlayerId::FIRST, 100_000);
        assert_eq!(state.players[PlayerId::FIRST].time, -60_000);
        assert_eq!(state.time_left(), 0);
    }

    #[test]
    fn test_checkpoint_round_trips() {
        let state = GameState::new(&small_config(), 5);

        let bytes = state.to_bytes().unwrap();
        assert_eq!(GameState::from_bytes(&bytes).unwrap(), state);

        let json = state.to_json().unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), state);

        assert!(GameState::from_json("{}").is_err());
    }

    #[test]
    fn test_display() {
        let config = small_config().with_tile_frequencies(TileTable::from_fn(|t| {
            if t == tile('B') { 6 } else { 0 }
        }));
        let state = GameState::new(&config, 1);
        let text = state.to_string();

        assert!(text.starts_with("Remaining Time: 02:00.000\nBag: \nCurrent Player: 1\n"));
        assert!(text.contains("Player 1: Score: 0, Time: 01:00.000, rack: B,B,B\n"));
        assert!(text.ends_with("  A B C D E  "));
    }
}
