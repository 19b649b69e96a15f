//! Game configuration.
//!
//! A game is configured once, before start:
//! - `Design`: premium squares, which also fixes the board size
//! - rack size and bingo bonus
//! - per-tile scores and bag frequencies
//! - clocks: starting time per player, challenge window, overtime penalty
//!
//! `GameConfig::standard()` gives the usual English set. Config files use a
//! JSON layout with human-readable keys and timespans (see
//! [`GameConfig::from_json_str`]).

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::player::{PlayerId, PlayerPair};
use super::tile::{Tile, TileTable};
use super::time::parse_timespan;
use crate::board::Design;

/// English tile values, blank first then `A..=Z`.
const STANDARD_SCORES: [u32; 27] = [
    0, 1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// English tile distribution (100 tiles), blank first then `A..=Z`.
const STANDARD_FREQUENCIES: [u32; 27] = [
    2, 9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];

/// Overtime penalty: `points` deducted for every started `every_ms` of
/// negative clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Penalty {
    pub points: i32,
    pub every_ms: i64,
}

impl Penalty {
    /// Points lost for a clock reading. Zero while time remains.
    #[must_use]
    pub fn for_time(&self, time_ms: i64) -> i32 {
        if time_ms >= 0 || self.every_ms <= 0 {
            return 0;
        }
        let over = time_ms.saturating_neg();
        let started = over.saturating_add(self.every_ms - 1) / self.every_ms;
        self.points.saturating_mul(i32::try_from(started).unwrap_or(i32::MAX))
    }
}

/// Complete game configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Premium squares; fixes board dimensions.
    pub design: Design,

    /// Tiles held in a full rack.
    pub rack_size: usize,

    /// Bonus for playing a full rack in one move.
    pub bingo: u32,

    /// Face value of each tile kind.
    pub tile_scores: TileTable<u32>,

    /// Copies of each tile kind in a fresh bag.
    pub tile_frequencies: TileTable<u32>,

    /// Clock each player starts with, in milliseconds.
    pub starting_times: PlayerPair<i64>,

    /// How long the opponent may take to challenge a play.
    pub challenge_timespan_ms: i64,

    pub penalty: Penalty,

    /// Word list to load, if configured from a file.
    pub dictionary: Option<PathBuf>,
}

impl GameConfig {
    /// Standard English game on a 15×15 board.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            design: Design::standard(),
            rack_size: 7,
            bingo: 50,
            tile_scores: TileTable::from_fn(|t| STANDARD_SCORES[t.slot()]),
            tile_frequencies: TileTable::from_fn(|t| STANDARD_FREQUENCIES[t.slot()]),
            starting_times: PlayerPair::with_value(25 * 60_000),
            challenge_timespan_ms: 10_000,
            penalty: Penalty {
                points: 10,
                every_ms: 60_000,
            },
            dictionary: None,
        }
    }

    /// Replace the board design.
    #[must_use]
    pub fn with_design(mut self, design: Design) -> Self {
        self.design = design;
        self
    }

    /// Set the rack size.
    #[must_use]
    pub fn with_rack_size(mut self, rack_size: usize) -> Self {
        self.rack_size = rack_size;
        self
    }

    /// Set the bingo bonus.
    #[must_use]
    pub fn with_bingo(mut self, bingo: u32) -> Self {
        self.bingo = bingo;
        self
    }

    /// Replace tile scores.
    #[must_use]
    pub fn with_tile_scores(mut self, scores: TileTable<u32>) -> Self {
        self.tile_scores = scores;
        self
    }

    /// Replace tile frequencies.
    #[must_use]
    pub fn with_tile_frequencies(mut self, frequencies: TileTable<u32>) -> Self {
        self.tile_frequencies = frequencies;
        self
    }

    /// Set both players' starting clocks.
    #[must_use]
    pub fn with_starting_times(mut self, first_ms: i64, second_ms: i64) -> Self {
        self.starting_times = PlayerPair::new(first_ms, second_ms);
        self
    }

    /// Set the challenge window.
    #[must_use]
    pub fn with_challenge_timespan(mut self, millis: i64) -> Self {
        self.challenge_timespan_ms = millis;
        self
    }

    /// Set the overtime penalty.
    #[must_use]
    pub fn with_penalty(mut self, points: i32, every_ms: i64) -> Self {
        self.penalty = Penalty { points, every_ms };
        self
    }

    /// Total tiles in a fresh bag.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.tile_frequencies.iter().map(|(_, &n)| n as usize).sum()
    }

    /// Starting clock of one player.
    #[must_use]
    pub fn starting_time(&self, player: PlayerId) -> i64 {
        self.starting_times[player]
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rack_size == 0 {
            return Err(ConfigError::EmptyRack);
        }
        Ok(())
    }

    /// Parse the JSON config layout.
    ///
    /// ```
    /// use tile_engine::core::GameConfig;
    ///
    /// let json = r#"{
    ///     "design": [[0, 0, 0], [0, 3, 0], [0, 0, 0]],
    ///     "rack size": 7,
    ///     "bingo": 50,
    ///     "tile scores": {"_": 0, "A": 1, "B": 3, "C": 3, "D": 2, "E": 1, "F": 4, "G": 2,
    ///         "H": 4, "I": 1, "J": 8, "K": 5, "L": 1, "M": 3, "N": 1, "O": 1, "P": 3,
    ///         "Q": 10, "R": 1, "S": 1, "T": 1, "U": 1, "V": 4, "W": 4, "X": 8, "Y": 4, "Z": 10},
    ///     "tile frequencies": {"_": 2, "A": 9, "B": 2, "C": 2, "D": 4, "E": 12, "F": 2, "G": 3,
    ///         "H": 2, "I": 9, "J": 1, "K": 1, "L": 4, "M": 2, "N": 6, "O": 8, "P": 2,
    ///         "Q": 1, "R": 6, "S": 4, "T": 6, "U": 4, "V": 2, "W": 2, "X": 1, "Y": 2, "Z": 1},
    ///     "starting timespans": ["25:00", "25:00"],
    ///     "challenge timespan": "10",
    ///     "penalty": {"points": 10, "every": "1:00"}
    /// }"#;
    ///
    /// let config = GameConfig::from_json_str(json).unwrap();
    /// assert_eq!(config.design.rows(), 3);
    /// assert_eq!(config.total_tiles(), 100);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.into_config()
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// On-disk layout of a config file.
#[derive(Deserialize)]
struct RawConfig {
    design: Vec<Vec<u8>>,
    #[serde(rename = "rack size")]
    rack_size: usize,
    bingo: u32,
    #[serde(rename = "tile scores")]
    tile_scores: FxHashMap<String, u32>,
    #[serde(rename = "tile frequencies")]
    tile_frequencies: FxHashMap<String, u32>,
    #[serde(rename = "starting timespans")]
    starting_timespans: [String; 2],
    #[serde(rename = "challenge timespan")]
    challenge_timespan: String,
    penalty: RawPenalty,
    #[serde(default)]
    dictionary: Option<PathBuf>,
}

#[derive(Deserialize)]
struct RawPenalty {
    points: i32,
    every: String,
}

impl RawConfig {
    fn into_config(self) -> Result<GameConfig, ConfigError> {
        let [first, second] = &self.starting_timespans;
        let config = GameConfig {
            design: Design::from_rows(&self.design)?,
            rack_size: self.rack_size,
            bingo: self.bingo,
            tile_scores: table_by_name(&self.tile_scores, "tile scores")?,
            tile_frequencies: table_by_name(&self.tile_frequencies, "tile frequencies")?,
            starting_times: PlayerPair::new(parse_timespan(first)?, parse_timespan(second)?),
            challenge_timespan_ms: parse_timespan(&self.challenge_timespan)?,
            penalty: Penalty {
                points: self.penalty.points,
                every_ms: parse_timespan(&self.penalty.every)?,
            },
            dictionary: self.dictionary,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Convert a name-keyed table (`"_"`, `"A"`..`"Z"`) into a `TileTable`.
fn table_by_name(
    entries: &FxHashMap<String, u32>,
    table: &'static str,
) -> Result<TileTable<u32>, ConfigError> {
    for name in entries.keys() {
        let mut chars = name.chars();
        let known = matches!(
            (chars.next().and_then(Tile::from_name), chars.next()),
            (Some(_), None)
        );
        if !known {
            return Err(ConfigError::UnknownTileName(name.clone()));
        }
    }

    let mut values = TileTable::from_fn(|_| 0);
    for tile in Tile::all() {
        let name = tile.name().to_string();
        values[tile] = *entries
            .get(&name)
            .ok_or(ConfigError::MissingTile { table, name })?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config() {
        let config = GameConfig::standard();
        assert_eq!(config.rack_size, 7);
        assert_eq!(config.bingo, 50);
        assert_eq!(config.total_tiles(), 100);
        assert_eq!(config.tile_scores[Tile::from_name('Q').unwrap()], 10);
        assert_eq!(config.tile_scores[Tile::BLANK], 0);
        assert_eq!(config.tile_frequencies[Tile::from_name('E').unwrap()], 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::standard()
            .with_design(Design::plain(5, 5))
            .with_rack_size(3)
            .with_bingo(10)
            .with_starting_times(1_000, 2_000)
            .with_challenge_timespan(500)
            .with_penalty(5, 100);

        assert_eq!(config.design.rows(), 5);
        assert_eq!(config.rack_size, 3);
        assert_eq!(config.bingo, 10);
        assert_eq!(config.starting_time(PlayerId::SECOND), 2_000);
        assert_eq!(config.challenge_timespan_ms, 500);
        assert_eq!(config.penalty, Penalty { points: 5, every_ms: 100 });
    }

    #[test]
    fn test_zero_rack_rejected() {
        let config = GameConfig::standard().with_rack_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRack)));
    }

    #[test]
    fn test_time_penalty() {
        let penalty = Penalty {
            points: 10,
            every_ms: 60_000,
        };
        assert_eq!(penalty.for_time(5_000), 0);
        assert_eq!(penalty.for_time(0), 0);
        assert_eq!(penalty.for_time(-1), 10);
        assert_eq!(penalty.for_time(-60_000), 10);
        assert_eq!(penalty.for_time(-60_001), 20);
    }

    #[test]
    fn test_time_penalty_saturates() {
        let penalty = Penalty {
            points: 10,
            every_ms: 1,
        };
        assert_eq!(penalty.for_time(i64::MIN), i32::MAX);
        assert_eq!(penalty.for_time(-(1i64 << 40)), i32::MAX);

        let harsh = Penalty {
            points: i32::MAX,
            every_ms: 60_000,
        };
        assert_eq!(harsh.for_time(-120_000), i32::MAX);
    }

    fn names_json(value: u32) -> String {
        let entries: Vec<String> = Tile::all()
            .map(|t| format!("\"{}\": {}", t.name(), value))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    fn json_config(scores: &str) -> String {
        format!(
            r#"{{
                "design": [[0, 1], [3, 4]],
                "rack size": 7,
                "bingo": 50,
                "tile scores": {scores},
                "tile frequencies": {freqs},
                "starting timespans": ["1:00", "2:00.5"],
                "challenge timespan": "5",
                "penalty": {{"points": 10, "every": "1:00"}},
                "dictionary": "words.txt"
            }}"#,
            freqs = names_json(2),
        )
    }

    #[test]
    fn test_from_json() {
        let config = GameConfig::from_json_str(&json_config(&names_json(1))).unwrap();
        assert_eq!(config.design.columns(), 2);
        assert_eq!(config.total_tiles(), 54);
        assert_eq!(config.starting_times.to_array(), [60_000, 120_500]);
        assert_eq!(config.challenge_timespan_ms, 5_000);
        assert_eq!(config.penalty.every_ms, 60_000);
        assert_eq!(config.dictionary, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_from_json_missing_tile() {
        let scores = r#"{"A": 1}"#;
        let err = GameConfig::from_json_str(&json_config(scores)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTile { table: "tile scores", .. }));
    }

    #[test]
    fn test_from_json_unknown_tile() {
        let scores = names_json(1).replace("\"Z\"", "\"ZZ\"");
        let err = GameConfig::from_json_str(&json_config(&scores)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTileName(name) if name == "ZZ"));
    }

    #[test]
    fn test_from_json_bad_timespan() {
        let json = json_config(&names_json(1)).replace("\"5\"", "\"soon\"");
        assert!(matches!(GameConfig::from_json_str(&json), Err(ConfigError::Timespan(_))));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = GameConfig::from_json_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
