//! Board geometry and placement algebra.
//!
//! - `design`: premium-square layout, fixed per game
//! - `grid`: the board itself, positions and directions
//! - `algebra`: placing a play and extracting major and minor words

pub mod algebra;
pub mod design;
pub mod grid;

pub use algebra::{expand, minor_words, place, Letter, Source, Word};
pub use design::{Design, Square};
pub use grid::{Board, Direction, InvalidBoard, Position};
