//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game has exactly two seats: `PlayerId(0)` moves first after a fresh
//! start, `PlayerId(1)` second. `opponent()` toggles between them.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::InvalidSeat;

/// One of the two seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first after a fresh start.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a seat index (0 or 1).
    #[must_use]
    pub fn new(seat: u8) -> Option<Self> {
        (seat < 2).then_some(Self(seat))
    }

    /// Seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidSeat;

    fn try_from(seat: u8) -> Result<Self, Self::Error> {
        Self::new(seat).ok_or(InvalidSeat(seat))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data with O(1) access.
///
/// ## Example
///
/// ```
/// use tile_engine::core::{PlayerId, PlayerPair};
///
/// let mut scores = PlayerPair::with_value(0i32);
/// scores[PlayerId::SECOND] += 12;
/// assert_eq!(scores.to_array(), [0, 12]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create from the first and second player's values.
    pub fn new(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Create with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self::new(factory(PlayerId::FIRST), factory(PlayerId::SECOND))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }

    /// Map each entry to a new value.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PlayerPair<U> {
        PlayerPair::new(f(&self.data[0]), f(&self.data[1]))
    }

    /// Copy out both values as an array.
    #[must_use]
    pub fn to_array(&self) -> [T; 2]
    where
        T: Copy,
    {
        self.data
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
