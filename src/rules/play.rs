//! Judging a PLAY.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. at least one non-padding tile
//! 2. direction code
//! 3. placement tile codes
//! 4. rack holds the tiles' origins
//! 5. start square in bounds and empty
//! 6. placement stays on the board
//! 7. first play covers the center; later plays connect
//! 8. at least one word is formed
//! 9. declared score matches
//!
//! Unknown words never reject a play. They are recorded so that a
//! challenge can be decided later.

use crate::board::{expand, minor_words, place, Direction, Position, Word};
use crate::core::action::PlayMove;
use crate::core::config::GameConfig;
use crate::core::error::MoveError;
use crate::core::state::GameState;
use crate::core::tile::{PlacedTile, Tile};
use crate::lexicon::Lexicon;
use crate::scoring::Scorer;

use super::result::{InvalidWord, PlayOutcome};

/// Apply `play` for the current player of `next`.
///
/// `next` is a scratch copy; on error it may be partly modified and must be
/// thrown away.
pub(crate) fn apply_play(
    config: &GameConfig,
    lexicon: &impl Lexicon,
    next: &mut GameState,
    play: &PlayMove,
) -> Result<PlayOutcome, MoveError> {
    let codes: Vec<u8> = play.tiles.iter().copied().filter(|&c| c != 0).collect();
    if codes.is_empty() {
        return Err(MoveError::NoTiles);
    }

    let direction = Direction::try_from(play.direction)?;

    let placed = codes
        .iter()
        .map(|&code| PlacedTile::new(code))
        .collect::<Option<Vec<_>>>()
        .ok_or(MoveError::InvalidTileCodes)?;

    let mover = next.current;
    let origins: Vec<Tile> = placed.iter().map(|t| t.origin()).collect();
    let player = &mut next.players[mover];
    if !player.rack.remove_all(&origins) {
        return Err(MoveError::RackMissingTiles);
    }
    let drawn = next.bag.draw(placed.len());
    player.rack.add(drawn.iter().copied());

    let start = start_position(play).ok_or(MoveError::StartOutOfBounds)?;
    if !next.board.contains(start) {
        return Err(MoveError::StartOutOfBounds);
    }
    if next.board.is_occupied(start) {
        return Err(MoveError::StartOccupied);
    }

    let was_empty = next.board.is_empty();

    let major = place(&placed, start, direction, &mut next.board).ok_or(MoveError::OutOfBounds)?;
    let minors = minor_words(&major, direction, &next.board);
    let major = expand(major, direction, &next.board);

    if was_empty {
        if !major.covers(config.design.center()) {
            return Err(MoveError::NotOnCenter);
        }
    } else if minors.is_empty() && major.all_new() {
        return Err(MoveError::Disconnected);
    }

    let words: Vec<Word> = if major.len() > 1 {
        std::iter::once(major).chain(minors).collect()
    } else {
        minors
    };
    if words.is_empty() {
        return Err(MoveError::NoWordFormed);
    }

    let scorer = Scorer::new(&config.design, &config.tile_scores, config.rack_size, config.bingo);
    let score = scorer.play(&words, placed.len());
    if score != play.score {
        return Err(MoveError::WrongScore {
            expected: score,
            declared: play.score,
        });
    }

    let player = &mut next.players[mover];
    player.score += i32::try_from(score).unwrap_or(i32::MAX);
    let tiles_finished = player.rack.is_empty();

    let invalid_words = words
        .iter()
        .filter(|word| !lexicon.contains(&word.text()))
        .filter_map(invalid_word)
        .collect();

    next.current = mover.opponent();

    Ok(PlayOutcome {
        tiles: drawn,
        score,
        invalid_words,
        tiles_finished,
    })
}

/// 0-based start square from the 1-based wire coordinates.
fn start_position(play: &PlayMove) -> Option<Position> {
    Some(Position {
        row: usize::from(play.row).checked_sub(1)?,
        col: usize::from(play.col).checked_sub(1)?,
    })
}

fn invalid_word(word: &Word) -> Option<InvalidWord> {
    let first = word.letters().first()?;
    Some(InvalidWord {
        word: word.text(),
        row: first.position.row + 1,
        col: first.position.col + 1,
        direction: word.direction()?,
    })
}
