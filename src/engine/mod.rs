//! Board simulation for 2048: tiles, directional moves, spawning and terminal detection.
//!
//! The grid is addressed by `(x, y)` with `x` the column and `y` the row, origin at
//! the top-left. Every cell always holds a [`Tile`]; value `0` marks an empty cell.
//!
//! ```
//! use slide_2048::engine::{Board, Direction};
//!
//! let mut board = Board::new();
//! board.start_game(Some(7));
//! let outcome = board.move_tiles(Direction::Left);
//! let state = board.state();
//! assert_eq!(state.score, outcome.score_delta);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

mod board;
mod state;
mod tile;

pub use board::{Board, MoveOutcome, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, WIN_VALUE};
pub use state::BoardState;
pub use tile::{Position, Tile, MAX_TILE_VALUE};

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step `(dx, dy)` for this direction. Up is towards row 0.
    #[inline]
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts full names, initials (`u`, `d`, `r`) and vi keys (`h`, `j`, `k`, `l`),
    /// case-insensitively. `l` is vi's right, so left has no single-letter initial.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "k" => Ok(Direction::Up),
            "down" | "d" | "j" => Ok(Direction::Down),
            "left" | "h" => Ok(Direction::Left),
            "right" | "r" | "l" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// Numeric move code: 0=Up, 1=Down, 2=Left, 3=Right.
impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

impl From<Direction> for u8 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Column and row visit orders for a move along `vector`.
///
/// Each axis runs `0..size`, reversed when the vector points towards the high end, so
/// tiles nearest the destination edge are resolved first.
pub(crate) fn build_traversals(size: usize, vector: (isize, isize)) -> (Vec<usize>, Vec<usize>) {
    let mut xs: Vec<usize> = (0..size).collect();
    let mut ys: Vec<usize> = (0..size).collect();
    if vector.0 == 1 { xs.reverse(); }
    if vector.1 == 1 { ys.reverse(); }
    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_are_unit_steps() {
        assert_eq!(Direction::Left.vector(), (-1, 0));
        assert_eq!(Direction::Right.vector(), (1, 0));
        assert_eq!(Direction::Up.vector(), (0, -1));
        assert_eq!(Direction::Down.vector(), (0, 1));
    }

    #[test]
    fn traversals_reverse_towards_far_edge() {
        assert_eq!(build_traversals(4, Direction::Left.vector()), (vec![0, 1, 2, 3], vec![0, 1, 2, 3]));
        assert_eq!(build_traversals(4, Direction::Right.vector()), (vec![3, 2, 1, 0], vec![0, 1, 2, 3]));
        assert_eq!(build_traversals(4, Direction::Up.vector()), (vec![0, 1, 2, 3], vec![0, 1, 2, 3]));
        assert_eq!(build_traversals(3, Direction::Down.vector()), (vec![0, 1, 2], vec![2, 1, 0]));
    }

    #[test]
    fn parse_directions() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" k ".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("r".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("h".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("j".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("k".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("L".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(EngineError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn numeric_codes() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(u8::from(dir)), Ok(dir));
        }
        assert!(matches!(Direction::try_from(4), Err(EngineError::InvalidDirection(_))));
    }
}
