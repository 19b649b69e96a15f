//! The game engine: turn protocol, challenges, clocks and settlement.
//!
//! ## Turn protocol
//!
//! | Phase                     | Move          | Next phase                |
//! |---------------------------|---------------|---------------------------|
//! | Idle                      | PASS          | Idle (opponent)           |
//! | Idle                      | EXCHANGE      | Idle (opponent)           |
//! | Idle                      | PLAY          | AwaitingChallengeResponse |
//! | AwaitingChallengeResponse | NO_CHALLENGE  | Idle (same player)        |
//! | AwaitingChallengeResponse | CHALLENGE     | Idle                      |
//!
//! A CHALLENGE against a play with an unknown word is accepted: the state
//! from before the play is restored and the challenger moves next. Against
//! a clean play it is rejected and the challenger loses the turn.
//!
//! ## Clocks
//!
//! The engine is not a clock. Every call that advances the game takes the
//! milliseconds the caller measured since the previous accepted event and
//! charges them to the player to move.
//!
//! ## Snapshots
//!
//! Accepted moves never edit a state in the history. The engine clones the
//! current state (cheap, see `GameState`), edits the clone, and appends it.
//! A rejected move leaves both the state and the history untouched.

use im::Vector;

use crate::core::action::Move;
use crate::core::config::GameConfig;
use crate::core::error::{CheckpointError, LexiconError, MoveError};
use crate::core::player::{PlayerId, PlayerPair};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::core::tile::Tile;
use crate::lexicon::{Lexicon, WordList};

use super::play::apply_play;
use super::result::{
    ChallengeOutcome, CurrentInfo, GameResult, HistoryEntry, MoveResult, Outcome, Phase,
    PlayOutcome, Settlement,
};

/// Authoritative engine for one game.
///
/// Single writer: callers serialize access (one owning task, or a mutex).
///
/// ```
/// use tile_engine::core::{GameConfig, Move, PlayerId};
/// use tile_engine::lexicon::WordList;
/// use tile_engine::rules::{GameEngine, Phase};
///
/// let mut engine = GameEngine::new(GameConfig::standard(), WordList::empty());
/// engine.start(42);
///
/// engine.apply(PlayerId::FIRST, Move::Pass, 1_500).unwrap();
/// assert_eq!(engine.phase(), Some(Phase::Idle(PlayerId::SECOND)));
///
/// let settlement = engine.end(false, 0).unwrap();
/// assert!(settlement.finished);
/// ```
#[derive(Debug)]
pub struct GameEngine<L: Lexicon = WordList> {
    config: GameConfig,
    lexicon: L,
    current: Option<GameState>,
    history: Vector<HistoryEntry>,
    running: bool,
    finished: bool,
}

impl GameEngine<WordList> {
    /// Build an engine, loading the configured dictionary if there is one.
    pub fn from_config(config: GameConfig) -> Result<Self, LexiconError> {
        let lexicon = match &config.dictionary {
            Some(path) => WordList::load(path)?,
            None => WordList::empty(),
        };
        Ok(Self::new(config, lexicon))
    }
}

impl<L: Lexicon> GameEngine<L> {
    /// Create an engine that has not started a game.
    #[must_use]
    pub fn new(config: GameConfig, lexicon: L) -> Self {
        Self {
            config,
            lexicon,
            current: None,
            history: Vector::new(),
            running: false,
            finished: false,
        }
    }

    /// Start a fresh game: shuffle the bag with `seed` and deal.
    pub fn start(&mut self, seed: u64) {
        let state = GameState::new(&self.config, seed);

        tracing::info!(seed, bag = state.bag.len(), "Game started");

        self.begin(state);
    }

    /// Start a fresh game with a seed from the operating system.
    ///
    /// Returns the seed so the game can be replayed.
    pub fn start_random(&mut self) -> u64 {
        let seed = GameRng::from_entropy().state().seed;
        self.start(seed);
        seed
    }

    /// Resume from a checkpoint. The history restarts at this state.
    ///
    /// The checkpoint board must have the configured design's dimensions;
    /// the engine is left untouched otherwise.
    pub fn start_from_checkpoint(&mut self, state: GameState) -> Result<(), CheckpointError> {
        let design = &self.config.design;
        if state.board.rows() != design.rows() || state.board.columns() != design.columns() {
            tracing::warn!(
                rows = state.board.rows(),
                columns = state.board.columns(),
                "Checkpoint board does not match the configured design"
            );
            return Err(CheckpointError::DesignMismatch {
                rows: state.board.rows(),
                columns: state.board.columns(),
                design_rows: design.rows(),
                design_columns: design.columns(),
            });
        }

        tracing::info!(turn = state.turn, current = %state.current, "Game resumed from checkpoint");

        self.begin(state);
        Ok(())
    }

    fn begin(&mut self, state: GameState) {
        self.history = Vector::unit(HistoryEntry::Start {
            state: state.clone(),
        });
        self.current = Some(state);
        self.running = true;
        self.finished = false;
    }

    /// Apply a move from `player`, charging `elapsed_ms` to the player to
    /// move.
    pub fn apply(
        &mut self,
        player: PlayerId,
        mv: Move,
        elapsed_ms: u64,
    ) -> Result<MoveResult, MoveError> {
        match self.judge(player, &mv, elapsed_ms) {
            Ok(result) => {
                tracing::debug!(
                    player = %player,
                    kind = mv.kind(),
                    turn = result.state.turn,
                    "Move accepted"
                );

                self.current = Some(result.state.clone());
                self.history.push_back(HistoryEntry::Move {
                    player,
                    mv,
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(err) => {
                tracing::debug!(player = %player, kind = mv.kind(), reason = %err, "Move rejected");
                Err(err)
            }
        }
    }

    fn judge(&self, player: PlayerId, mv: &Move, elapsed_ms: u64) -> Result<MoveResult, MoveError> {
        let state = match (&self.current, self.running) {
            (Some(state), true) => state,
            _ => return Err(MoveError::NotRunning),
        };
        if player != state.current {
            return Err(MoveError::OutOfTurn {
                expected: state.current,
                got: player,
            });
        }

        let pending = self.pending_play();
        if pending.is_some() && !mv.is_challenge_response() {
            return Err(MoveError::ChallengePending);
        }

        let (outcome, state) = match mv {
            Move::Challenge => {
                let pending = pending.ok_or(MoveError::NoPendingPlay)?;
                return Ok(self.challenge(state, pending, player, elapsed_ms));
            }
            Move::NoChallenge => {
                let pending = pending.ok_or(MoveError::NoPendingPlay)?;
                let mut next = state.clone();
                next.charge_time(player, elapsed_ms);
                let outcome = Outcome::NoChallenge {
                    tiles: pending.tiles.clone(),
                    missed: pending.is_challengeable(),
                    end: pending.tiles_finished,
                };
                (outcome, next)
            }
            Move::Pass => {
                let mut next = self.next_turn(state, player, elapsed_ms);
                next.current = player.opponent();
                (Outcome::Pass, next)
            }
            Move::Exchange { tiles } => {
                let mut next = self.next_turn(state, player, elapsed_ms);
                let drawn = self.exchange(&mut next, tiles)?;
                next.current = player.opponent();
                (Outcome::Exchange { tiles: drawn }, next)
            }
            Move::Play(play) => {
                let mut next = self.next_turn(state, player, elapsed_ms);
                let outcome = apply_play(&self.config, &self.lexicon, &mut next, play)?;
                (Outcome::Play(outcome), next)
            }
        };

        Ok(MoveResult {
            player,
            state,
            outcome,
        })
    }

    /// Clone of `state` with the clock charged and the turn counter advanced.
    fn next_turn(&self, state: &GameState, player: PlayerId, elapsed_ms: u64) -> GameState {
        let mut next = state.clone();
        next.charge_time(player, elapsed_ms);
        next.turn += 1;
        next
    }

    /// Swap rack tiles for bag tiles and reshuffle the bag.
    ///
    /// Checks run in order: tile codes, bag size, rack contents.
    fn exchange(&self, next: &mut GameState, codes: &[u8]) -> Result<Vec<Tile>, MoveError> {
        let codes: Vec<u8> = codes.iter().copied().filter(|&c| c != 0).collect();
        if codes.is_empty() {
            return Err(MoveError::NoTiles);
        }

        let tiles = codes
            .iter()
            .map(|&code| Tile::new(code))
            .collect::<Option<Vec<_>>>()
            .ok_or(MoveError::InvalidTileCodes)?;

        if next.bag.len() < self.config.rack_size {
            return Err(MoveError::BagTooSmall {
                required: self.config.rack_size,
            });
        }

        let mover = next.current;
        if !next.players[mover].rack.remove_all(&tiles) {
            return Err(MoveError::RackMissingTiles);
        }

        let drawn = next.bag.draw(tiles.len());
        next.players[mover].rack.add(drawn.iter().copied());

        let mut rng = GameRng::from_state(&next.rng);
        next.bag.put_back(&tiles, &mut rng);
        next.rng = rng.state();

        Ok(drawn)
    }

    fn challenge(
        &self,
        state: &GameState,
        pending: &PlayOutcome,
        player: PlayerId,
        elapsed_ms: u64,
    ) -> MoveResult {
        let (mut next, outcome) = match self.state_before_pending() {
            Some(before) if pending.is_challengeable() => {
                (before.clone(), ChallengeOutcome::Accepted)
            }
            _ => (
                state.clone(),
                ChallengeOutcome::Rejected {
                    tiles: pending.tiles.clone(),
                    end: pending.tiles_finished,
                },
            ),
        };

        next.current = next.current.opponent();
        for id in PlayerId::both() {
            next.players[id].time = state.players[id].time;
        }
        next.elapsed_ms = state.elapsed_ms;
        next.charge_time(player, elapsed_ms);

        MoveResult {
            player,
            state: next,
            outcome: Outcome::Challenge(outcome),
        }
    }

    /// State the pending play was applied to.
    fn state_before_pending(&self) -> Option<&GameState> {
        let index = self.history.len().checked_sub(2)?;
        self.history.get(index).map(HistoryEntry::state)
    }

    /// End the game, settling scores unless `abrupt`.
    ///
    /// Settling deducts the overtime penalty and the face value of each
    /// rack. Returns `None` if no game is running.
    pub fn end(&mut self, abrupt: bool, elapsed_ms: u64) -> Option<Settlement> {
        if !self.running {
            return None;
        }
        let mut next = self.current.clone()?;
        let current = next.current;
        next.charge_time(current, elapsed_ms);

        let finished = !abrupt;
        let mut result = None;
        if finished {
            for (_, player) in next.players.iter_mut() {
                let rack = player.rack.value(&self.config.tile_scores);
                let rack = i32::try_from(rack).unwrap_or(i32::MAX);
                let penalty = self.config.penalty.for_time(player.time);
                player.score = player.score.saturating_sub(penalty).saturating_sub(rack);
            }
            result = Some(GameResult::from_scores(&next.players.map(|p| p.score)));
        }

        let settlement = Settlement {
            finished,
            scores: next.players.map(|p| p.score),
            result,
            state: next.clone(),
        };

        tracing::info!(
            finished,
            scores = ?settlement.scores.to_array(),
            result = ?settlement.result,
            "Game ended"
        );

        self.current = Some(next);
        self.history.push_back(HistoryEntry::End {
            settlement: settlement.clone(),
        });
        self.running = false;
        self.finished = finished;

        Some(settlement)
    }

    /// Clocks and scores as they stand `elapsed_ms` after the last event.
    ///
    /// While running, or after an abrupt end, scores already show the
    /// overtime penalty.
    #[must_use]
    pub fn current_info(&self, elapsed_ms: u64) -> CurrentInfo {
        let Some(state) = &self.current else {
            return CurrentInfo {
                times: PlayerPair::with_value(0),
                scores: PlayerPair::with_value(0),
            };
        };

        let mut times = state.players.map(|p| p.time);
        if self.running {
            let mut live = state.clone();
            live.charge_time(state.current, elapsed_ms);
            times = live.players.map(|p| p.time);
        }

        let mut scores = state.players.map(|p| p.score);
        if self.running || !self.finished {
            for id in PlayerId::both() {
                scores[id] = scores[id].saturating_sub(self.config.penalty.for_time(times[id]));
            }
        }

        CurrentInfo { times, scores }
    }

    /// Current protocol phase, `None` when no game is running.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        let state = self.current.as_ref().filter(|_| self.running)?;
        Some(if self.pending_play().is_some() {
            Phase::AwaitingChallengeResponse(state.current)
        } else {
            Phase::Idle(state.current)
        })
    }

    /// The play awaiting a challenge response, if any.
    #[must_use]
    pub fn pending_play(&self) -> Option<&PlayOutcome> {
        self.history.last().and_then(HistoryEntry::as_play)
    }

    /// Has the challenge window passed, `elapsed_ms` after the pending
    /// play? The caller decides whether to submit NO_CHALLENGE.
    #[must_use]
    pub fn challenge_expired(&self, elapsed_ms: u64) -> bool {
        let window = u64::try_from(self.config.challenge_timespan_ms).unwrap_or(0);
        self.pending_play().is_some() && elapsed_ms >= window
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    /// Latest state, `None` before the first start.
    #[must_use]
    pub fn current_state(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True after a non-abrupt end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
