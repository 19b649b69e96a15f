//! What the engine reports back: move results, history entries, phases and
//! the final settlement.

use serde::{Deserialize, Serialize};

use crate::board::Direction;
use crate::core::action::Move;
use crate::core::player::{PlayerId, PlayerPair};
use crate::core::state::GameState;
use crate::core::tile::Tile;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Higher adjusted score.
    Winner(PlayerId),
    /// Equal adjusted scores.
    Draw,
}

impl GameResult {
    /// Compare final scores.
    #[must_use]
    pub fn from_scores(scores: &PlayerPair<i32>) -> Self {
        let [first, second] = scores.to_array();
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// A word of a play that the lexicon does not know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidWord {
    /// Lower-case text.
    pub word: String,
    /// Row of the first letter, 1-based.
    pub row: usize,
    /// Column of the first letter, 1-based.
    pub col: usize,
    pub direction: Direction,
}

/// What an accepted PLAY produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// Replacement tiles drawn from the bag into the mover's rack.
    pub tiles: Vec<Tile>,
    pub score: u32,
    pub invalid_words: Vec<InvalidWord>,
    /// The mover's rack is empty after drawing.
    pub tiles_finished: bool,
}

impl PlayOutcome {
    /// Would a challenge against this play succeed?
    #[must_use]
    pub fn is_challengeable(&self) -> bool {
        !self.invalid_words.is_empty()
    }
}

/// How a CHALLENGE was decided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeOutcome {
    /// The play is taken back.
    Accepted,
    /// The play stands and the challenger loses the turn.
    Rejected { tiles: Vec<Tile>, end: bool },
}

/// Per-kind payload of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pass,

    /// Tiles the mover drew in exchange.
    Exchange { tiles: Vec<Tile> },

    Play(PlayOutcome),

    /// `tiles` and `end` repeat the approved play's drawn tiles and
    /// finished flag; `missed` says a challenge would have succeeded.
    NoChallenge { tiles: Vec<Tile>, missed: bool, end: bool },

    Challenge(ChallengeOutcome),
}

/// An accepted move: who made it, the state after it, and its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub player: PlayerId,
    pub state: GameState,
    pub outcome: Outcome,
}

impl MoveResult {
    /// Should the caller end the game now? True when an approved play
    /// emptied its mover's rack.
    #[must_use]
    pub fn ends_game(&self) -> bool {
        match &self.outcome {
            Outcome::NoChallenge { end, .. } => *end,
            Outcome::Challenge(ChallengeOutcome::Rejected { end, .. }) => *end,
            _ => false,
        }
    }
}

/// Final accounting of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// False when the game was ended abruptly and scores were not settled.
    pub finished: bool,
    pub scores: PlayerPair<i32>,
    /// `None` for an abrupt end.
    pub result: Option<GameResult>,
    /// The frozen final state.
    pub state: GameState,
}

/// One entry of the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// A fresh start or a resume from a checkpoint.
    Start { state: GameState },
    Move {
        player: PlayerId,
        #[serde(rename = "move")]
        mv: Move,
        result: MoveResult,
    },
    End { settlement: Settlement },
}

impl HistoryEntry {
    /// State after this entry.
    #[must_use]
    pub fn state(&self) -> &GameState {
        match self {
            HistoryEntry::Start { state } => state,
            HistoryEntry::Move { result, .. } => &result.state,
            HistoryEntry::End { settlement } => &settlement.state,
        }
    }

    /// The PLAY payload, if this entry is an accepted play.
    #[must_use]
    pub fn as_play(&self) -> Option<&PlayOutcome> {
        match self {
            HistoryEntry::Move {
                result:
                    MoveResult {
                        outcome: Outcome::Play(play),
                        ..
                    },
                ..
            } => Some(play),
            _ => None,
        }
    }
}

/// Where the turn protocol stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The player may PASS, EXCHANGE or PLAY.
    Idle(PlayerId),
    /// The player must CHALLENGE or accept the opponent's play.
    AwaitingChallengeResponse(PlayerId),
}

impl Phase {
    /// Player to move.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Phase::Idle(p) | Phase::AwaitingChallengeResponse(p) => p,
        }
    }
}

/// Clocks and scores as they would be displayed right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentInfo {
    pub times: PlayerPair<i64>,
    pub scores: PlayerPair<i32>,
}
