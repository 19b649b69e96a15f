//! Engine integration tests.
//!
//! Each test resumes from a hand-built state so racks and bag are known:
//! - PLAY / NO_CHALLENGE / CHALLENGE flows
//! - Rollback on an accepted challenge
//! - Center rule, out-of-turn and sub-state errors
//! - Exchange with a short bag
//! - Bingo and end-of-game settlement

use tile_engine::core::{Bag, GameRngState, PlayerState, Rack};
use tile_engine::{
    Board, ChallengeOutcome, Direction, GameConfig, GameEngine, GameResult, GameState, Move,
    MoveError, Outcome, Phase, PlacedTile, PlayMove, PlayerId, PlayerPair, Tile, WordList,
};

const FIRST: PlayerId = PlayerId::FIRST;
const SECOND: PlayerId = PlayerId::SECOND;

fn tiles(names: &str) -> Vec<Tile> {
    names.chars().map(|c| Tile::from_name(c).unwrap()).collect()
}

fn play(col: u8, row: u8, direction: Direction, text: &str, score: u32) -> Move {
    let codes = text.chars().map(|c| PlacedTile::from_char(c).unwrap().code()).collect();
    Move::Play(PlayMove::new(col, row, direction, codes, score))
}

fn player(rack: &str) -> PlayerState {
    PlayerState {
        rack: Rack::from_tiles(tiles(rack)),
        score: 0,
        time: 25 * 60_000,
    }
}

/// Standard game resumed with known racks and bag.
fn engine(first: &str, second: &str, bag: &str, words: &[&str]) -> GameEngine {
    let config = GameConfig::standard();
    let state = GameState {
        board: Board::for_design(&config.design),
        players: PlayerPair::new(player(first), player(second)),
        current: FIRST,
        bag: Bag::from_tiles(tiles(bag)),
        rng: GameRngState::from_seed(11),
        elapsed_ms: 0,
        turn: 0,
    };

    let mut engine = GameEngine::new(config, WordList::from_words(words));
    engine.start_from_checkpoint(state).unwrap();
    engine
}

fn total_tiles(engine: &GameEngine) -> usize {
    engine.current_state().unwrap().total_tiles()
}

// =============================================================================
// Play and challenge flow
// =============================================================================

#[test]
fn test_play_and_approve() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &["cat", "cats"]);
    let tiles_before = total_tiles(&engine);

    // C A T across row 8 from column 7: A lands on the double-word center.
    let result = engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 3_000).unwrap();
    let Outcome::Play(outcome) = &result.outcome else {
        panic!("expected a play outcome");
    };
    assert_eq!(outcome.score, 10);
    assert_eq!(outcome.tiles, tiles("EEE"));
    assert!(outcome.invalid_words.is_empty());
    assert!(!outcome.tiles_finished);

    assert_eq!(result.state.players[FIRST].score, 10);
    assert_eq!(result.state.players[FIRST].rack.to_string(), "D,E,E,E,E,R,S");
    assert_eq!(result.state.turn, 1);
    assert_eq!(engine.phase(), Some(Phase::AwaitingChallengeResponse(SECOND)));
    assert_eq!(total_tiles(&engine), tiles_before);

    let approved = engine.apply(SECOND, Move::NoChallenge, 1_000).unwrap();
    assert_eq!(
        approved.outcome,
        Outcome::NoChallenge {
            tiles: tiles("EEE"),
            missed: false,
            end: false,
        }
    );
    assert!(!approved.ends_game());
    assert_eq!(engine.phase(), Some(Phase::Idle(SECOND)));
    assert_eq!(engine.history().len(), 3);
}

#[test]
fn test_second_play_extends_word() {
    let mut engine = engine("CATSRED", "SQZXJKV", "EEEEEEEEEE", &["cat", "cats"]);
    engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();
    engine.apply(SECOND, Move::NoChallenge, 0).unwrap();

    // S after CAT: no premium under the board letters, none under S.
    let result = engine.apply(SECOND, play(10, 8, Direction::Across, "S", 6), 0).unwrap();
    let Outcome::Play(outcome) = &result.outcome else {
        panic!("expected a play outcome");
    };
    assert_eq!(outcome.score, 6);
    assert!(outcome.invalid_words.is_empty());
    assert_eq!(result.state.board.to_rows()[7][6..10], [3, 1, 20, 19]);
}

#[test]
fn test_missed_challenge_is_reported() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();

    let approved = engine.apply(SECOND, Move::NoChallenge, 0).unwrap();
    assert!(matches!(approved.outcome, Outcome::NoChallenge { missed: true, .. }));
}

#[test]
fn test_accepted_challenge_restores_pre_play_state() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    let before = engine.current_state().cloned().unwrap();

    let played = engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 2_000).unwrap();
    let Outcome::Play(outcome) = &played.outcome else {
        panic!("expected a play outcome");
    };
    assert_eq!(outcome.invalid_words.len(), 1);
    assert_eq!(outcome.invalid_words[0].word, "cat");
    assert_eq!((outcome.invalid_words[0].row, outcome.invalid_words[0].col), (8, 7));

    let result = engine.apply(SECOND, Move::Challenge, 4_000).unwrap();
    assert_eq!(result.outcome, Outcome::Challenge(ChallengeOutcome::Accepted));

    let after = &result.state;
    assert_eq!(after.board, before.board);
    assert_eq!(after.bag, before.bag);
    assert_eq!(after.turn, before.turn);
    assert_eq!(after.players[FIRST].rack, before.players[FIRST].rack);
    assert_eq!(after.players[SECOND].rack, before.players[SECOND].rack);
    assert_eq!(after.players.map(|p| p.score), before.players.map(|p| p.score));

    // Only the clocks moved on.
    assert_eq!(after.players[FIRST].time, before.players[FIRST].time - 2_000);
    assert_eq!(after.players[SECOND].time, before.players[SECOND].time - 4_000);

    // The challenger moves next.
    assert_eq!(engine.phase(), Some(Phase::Idle(SECOND)));
}

#[test]
fn test_rejected_challenge_costs_the_turn() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &["cat"]);
    engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();

    let result = engine.apply(SECOND, Move::Challenge, 0).unwrap();
    assert_eq!(
        result.outcome,
        Outcome::Challenge(ChallengeOutcome::Rejected {
            tiles: tiles("EEE"),
            end: false,
        })
    );
    assert_eq!(result.state.players[FIRST].score, 10);
    assert_eq!(engine.phase(), Some(Phase::Idle(FIRST)));
}

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_first_play_must_cover_center() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &["cat"]);
    let before = engine.current_state().cloned();

    let err = engine.apply(FIRST, play(1, 1, Direction::Across, "CAT", 5), 0);
    assert_eq!(err, Err(MoveError::NotOnCenter));
    assert_eq!(engine.current_state().cloned(), before);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_disconnected_play_rejected() {
    let mut engine = engine("CATSRED", "DOGQZXJ", "EEEEEEEEEE", &["cat", "dog"]);
    engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();
    engine.apply(SECOND, Move::NoChallenge, 0).unwrap();

    let err = engine.apply(SECOND, play(1, 1, Direction::Down, "DOG", 15), 0);
    assert_eq!(err, Err(MoveError::Disconnected));
}

#[test]
fn test_wrong_score_reports_correct_value() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &["cat"]);
    let err = engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 9), 0);
    assert_eq!(err, Err(MoveError::WrongScore { expected: 10, declared: 9 }));
    assert_eq!(engine.phase(), Some(Phase::Idle(FIRST)));
}

#[test]
fn test_out_of_turn_rejected() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    assert_eq!(
        engine.apply(SECOND, Move::Pass, 0),
        Err(MoveError::OutOfTurn {
            expected: FIRST,
            got: SECOND,
        })
    );
}

#[test]
fn test_moves_blocked_while_challenge_pending() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();

    for mv in [
        Move::Pass,
        Move::Exchange { tiles: vec![17] },
        play(7, 9, Direction::Across, "Q", 10),
    ] {
        assert_eq!(engine.apply(SECOND, mv, 0), Err(MoveError::ChallengePending));
    }
}

#[test]
fn test_exchange_with_short_bag_rejected() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEE", &[]);
    let before = engine.current_state().cloned();

    let err = engine.apply(FIRST, Move::Exchange { tiles: vec![3, 1] }, 0);
    assert_eq!(err, Err(MoveError::BagTooSmall { required: 7 }));
    assert_eq!(engine.current_state().cloned(), before);
}

#[test]
fn test_exchange_checks_rack() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    let err = engine.apply(FIRST, Move::Exchange { tiles: vec![17] }, 0);
    assert_eq!(err, Err(MoveError::RackMissingTiles));

    let err = engine.apply(FIRST, Move::Exchange { tiles: vec![0, 0] }, 0);
    assert_eq!(err, Err(MoveError::NoTiles));
}

#[test]
fn test_exchange_keeps_rack_size_and_tile_count() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    let total = total_tiles(&engine);

    let result = engine.apply(FIRST, Move::Exchange { tiles: vec![3, 1, 20] }, 0).unwrap();
    assert_eq!(result.outcome, Outcome::Exchange { tiles: tiles("EEE") });
    assert_eq!(result.state.players[FIRST].rack.len(), 7);
    assert_eq!(result.state.bag.len(), 10);
    assert_eq!(result.state.bag.iter().filter(|t| t.name() == 'C').count(), 1);
    assert_eq!(total_tiles(&engine), total);
    assert_eq!(engine.phase(), Some(Phase::Idle(SECOND)));
}

// =============================================================================
// Bingo and ending
// =============================================================================

#[test]
fn test_bingo_bonus() {
    let mut engine = engine("RETAINS", "QZXJKVW", "EEEEEEEEEE", &["retains"]);

    // Seven one-point letters over the double-word center: 7 * 2 + 50.
    let result = engine.apply(FIRST, play(5, 8, Direction::Across, "RETAINS", 64), 0).unwrap();
    let Outcome::Play(outcome) = &result.outcome else {
        panic!("expected a play outcome");
    };
    assert_eq!(outcome.score, 64);
}

#[test]
fn test_blank_scores_zero() {
    let mut engine = engine("CA_SRED", "QZXJKVW", "EEEEEEEEEE", &["cat"]);

    // (3 + 1 + 0) * 2
    let result = engine.apply(FIRST, play(7, 8, Direction::Across, "CAt", 8), 0).unwrap();
    assert_eq!(result.state.board.to_rows()[7][8], 120);
}

#[test]
fn test_game_ends_after_rack_emptied() {
    let mut engine = engine("CAT", "QZ", "", &["cat"]);

    let played = engine.apply(FIRST, play(7, 8, Direction::Across, "CAT", 10), 0).unwrap();
    assert!(matches!(&played.outcome, Outcome::Play(p) if p.tiles_finished && p.tiles.is_empty()));

    let approved = engine.apply(SECOND, Move::NoChallenge, 0).unwrap();
    assert!(approved.ends_game());

    let settlement = engine.end(false, 0).unwrap();
    assert_eq!(settlement.scores.to_array(), [10, -20]);
    assert_eq!(settlement.result, Some(GameResult::Winner(FIRST)));
    assert!(engine.is_finished());
    assert_eq!(engine.phase(), None);
}

#[test]
fn test_current_info_tracks_clock_and_penalty() {
    let mut engine = engine("CATSRED", "QZXJKVW", "EEEEEEEEEE", &[]);
    engine.apply(FIRST, Move::Pass, 26 * 60_000).unwrap();

    let info = engine.current_info(30_000);
    assert_eq!(info.times.to_array(), [-60_000, 25 * 60_000 - 30_000]);
    assert_eq!(info.scores.to_array(), [-10, 0]);

    let settlement = engine.end(true, 30_000).unwrap();
    assert!(!settlement.finished);
    assert_eq!(settlement.scores.to_array(), [0, 0]);

    // After an abrupt end the penalty still shows.
    assert_eq!(engine.current_info(0).scores.to_array(), [-10, 0]);
}
