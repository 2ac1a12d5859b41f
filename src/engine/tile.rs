use std::fmt;

use serde::{Deserialize, Serialize};

/// A grid coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self { Position { x, y } }

    /// Step once along `vector`, returning `None` when the result leaves `[0, size)` on
    /// either axis.
    #[inline]
    pub fn step(self, vector: (isize, isize), size: usize) -> Option<Position> {
        let x = self.x.checked_add_signed(vector.0)?;
        let y = self.y.checked_add_signed(vector.1)?;
        (x < size && y < size).then_some(Position { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Largest value a tile can hold. Tiles at this value never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// One grid cell's occupant.
///
/// A tile with value `0` is an empty cell. Moves replace tiles rather than rewriting
/// their value; only the position and per-move bookkeeping (`previous_position`,
/// `merged_from`, `is_new`) change on a live tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    value: u32,
    position: Position,
    previous_position: Option<Position>,
    merged_from: Option<Box<(Tile, Tile)>>,
    is_new: bool,
}

impl Tile {
    /// An empty tile at `(x, y)`.
    pub fn empty(x: usize, y: usize) -> Self { Tile::new(Position::new(x, y), 0) }

    /// A tile with an explicit value, no lineage, not freshly spawned.
    pub fn new(position: Position, value: u32) -> Self {
        Tile { value, position, previous_position: None, merged_from: None, is_new: false }
    }

    #[inline]
    pub fn value(&self) -> u32 { self.value }

    #[inline]
    pub fn is_empty(&self) -> bool { self.value == 0 }

    #[inline]
    pub fn position(&self) -> Position { self.position }

    /// Where the tile sat before the current move, if it existed then.
    #[inline]
    pub fn previous_position(&self) -> Option<Position> { self.previous_position }

    /// The `(moving, stationary)` pair that combined into this tile during the current
    /// move. The moving tile's position is already the merge destination.
    #[inline]
    pub fn merged_from(&self) -> Option<(&Tile, &Tile)> {
        self.merged_from.as_deref().map(|(a, b)| (a, b))
    }

    /// True only for the tile spawned by the most recent spawn step.
    #[inline]
    pub fn is_new(&self) -> bool { self.is_new }

    /// Record the current position as the pre-move position.
    pub fn save_position(&mut self) { self.previous_position = Some(self.position); }

    /// Clear the per-move flags and save the position ahead of a move.
    pub(crate) fn prepare(&mut self) {
        self.merged_from = None;
        self.is_new = false;
        self.save_position();
    }

    /// True when `other` can absorb this tile: equal, non-empty values, `other` has
    /// not merged yet this move, and doubling stays within `MAX_TILE_VALUE`.
    #[inline]
    pub(crate) fn can_merge_into(&self, other: &Tile) -> bool {
        !self.is_empty()
            && self.value == other.value
            && self.value < MAX_TILE_VALUE
            && other.merged_from.is_none()
    }

    pub(crate) fn set_position(&mut self, position: Position) { self.position = position; }

    pub(crate) fn merge(moving: Tile, stationary: Tile) -> Tile {
        debug_assert!(moving.can_merge_into(&stationary));
        let mut merged = Tile::new(stationary.position, moving.value * 2);
        merged.merged_from = Some(Box::new((moving, stationary)));
        merged
    }

    pub(crate) fn spawned(position: Position, value: u32) -> Tile {
        Tile { is_new: true, ..Tile::new(position, value) }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.value)
    }
}

/// True for values a tile may carry: 0 (empty) or a power of two >= 2.
#[inline]
pub(crate) fn is_valid_value(value: u32) -> bool { value == 0 || (value >= 2 && value.is_power_of_two()) }
