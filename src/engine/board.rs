use std::fmt;
use std::mem;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::BoardState;
use super::tile::{is_valid_value, Position, Tile};
#[cfg(test)]
use super::tile::MAX_TILE_VALUE;
use super::{build_traversals, Direction};
use crate::config::BoardConfig;
use crate::error::EngineError;

/// Default grid dimension.
pub const DEFAULT_SIZE: usize = 4;
/// Smallest grid the engine accepts.
pub const MIN_SIZE: usize = 2;
/// Largest grid the engine accepts.
pub const MAX_SIZE: usize = 16;
/// Merging into this value wins the game.
pub const WIN_VALUE: u32 = 2048;

/// Result of a single [`Board::move_tiles`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// At least one tile changed cell; a tile was spawned.
    pub moved: bool,
    /// Points scored by merges in this move.
    pub score_delta: u64,
    /// The board has reached 2048 (this move or earlier).
    pub won: bool,
    /// No move remains; the game is lost.
    pub over: bool,
}

/// An NxN 2048 board with its score, win/loss flags and random source.
///
/// Every cell always holds a [`Tile`]; value 0 is an empty cell. The random source
/// `R` is owned by the board and is only reseeded by [`Board::start_game`].
///
/// ```
/// use slide_2048::engine::{Board, Direction, Position};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut board = Board::with_rng(4, StdRng::seed_from_u64(1)).unwrap();
/// board.load_values(&[
///     2, 2, 0, 0,
///     0, 0, 0, 0,
///     0, 0, 0, 0,
///     0, 0, 0, 0,
/// ]).unwrap();
/// let outcome = board.move_tiles(Direction::Left);
/// assert!(outcome.moved);
/// assert_eq!(outcome.score_delta, 4);
/// assert_eq!(board.tile(Position::new(0, 0)).unwrap().value(), 4);
/// ```
#[derive(Clone)]
pub struct Board<R = StdRng> {
    size: usize,
    grid: Vec<Tile>,
    score: u64,
    won: bool,
    over: bool,
    keep_playing: bool,
    rng: R,
}

impl Board<StdRng> {
    /// A 4x4 board with every cell empty. Call [`Board::start_game`] to deal the
    /// opening tiles.
    pub fn new() -> Self {
        Board::empty_grid(DEFAULT_SIZE, StdRng::from_entropy())
    }

    /// An empty `size`x`size` board.
    pub fn with_size(size: usize) -> Result<Self, EngineError> {
        Board::with_rng(size, StdRng::from_entropy())
    }

    /// Build and start a board from a validated config.
    pub fn from_config(config: &BoardConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut board = Board::with_size(config.size)?;
        board.start_game(config.seed);
        Ok(board)
    }
}

impl Default for Board<StdRng> {
    fn default() -> Self { Board::new() }
}

impl<R: Rng + SeedableRng> Board<R> {
    /// Reset score and flags, reseed the random source (from `seed`, or from entropy
    /// when `None`), clear the grid and spawn two tiles.
    pub fn start_game(&mut self, seed: Option<u64>) {
        let rng = match seed {
            Some(seed) => R::seed_from_u64(seed),
            None => R::from_entropy(),
        };
        debug!("starting {0}x{0} game (seed: {1:?})", self.size, seed);
        self.restart_with(rng);
    }
}

impl<R: Rng> Board<R> {
    /// An empty `size`x`size` board drawing randomness from `rng`.
    pub fn with_rng(size: usize, rng: R) -> Result<Self, EngineError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(EngineError::InvalidSize { size, min: MIN_SIZE, max: MAX_SIZE });
        }
        Ok(Board::empty_grid(size, rng))
    }

    fn empty_grid(size: usize, rng: R) -> Self {
        let grid = (0..size * size).map(|idx| Tile::empty(idx % size, idx / size)).collect();
        Board { size, grid, score: 0, won: false, over: false, keep_playing: false, rng }
    }

    /// Like [`Board::start_game`] but with an explicitly supplied random source.
    pub fn restart_with(&mut self, rng: R) {
        self.rng = rng;
        self.reset();
        self.add_random_tile();
        self.add_random_tile();
    }

    fn reset(&mut self) {
        self.score = 0;
        self.won = false;
        self.over = false;
        self.keep_playing = false;
        for (idx, tile) in self.grid.iter_mut().enumerate() {
            *tile = Tile::empty(idx % self.size, idx / self.size);
        }
    }

    /// Replace the grid with row-major `values`, resetting score and flags.
    ///
    /// Each value must be 0 or a power of two >= 2, and there must be exactly
    /// `size * size` of them.
    pub fn load_values(&mut self, values: &[u32]) -> Result<(), EngineError> {
        let expected = self.size * self.size;
        if values.len() != expected {
            return Err(EngineError::ShapeMismatch { expected, actual: values.len() });
        }
        if let Some(&value) = values.iter().find(|&&v| !is_valid_value(v)) {
            return Err(EngineError::InvalidTileValue { value });
        }
        self.reset();
        for (idx, &value) in values.iter().enumerate() {
            self.grid[idx] = Tile::new(Position::new(idx % self.size, idx / self.size), value);
        }
        Ok(())
    }

    /// Slide every tile towards `dir`, merging equal neighbours once per move.
    ///
    /// Does nothing while the game is terminated (lost, or won without
    /// `keep_playing`). A move that changes at least one cell spawns a tile and then
    /// checks whether any move remains.
    pub fn move_tiles(&mut self, dir: Direction) -> MoveOutcome {
        if self.is_terminated() {
            return MoveOutcome { moved: false, score_delta: 0, won: self.won, over: self.over };
        }

        let vector = dir.vector();
        let (xs, ys) = build_traversals(self.size, vector);
        let score_before = self.score;
        let mut moved = false;

        self.prepare_tiles();

        for &x in &xs {
            for &y in &ys {
                let cell = Position::new(x, y);
                let value = self.grid[self.index(cell)].value();
                if value == 0 {
                    continue;
                }
                let (farthest, next) = self.find_farthest_position(cell, vector);
                let moving = &self.grid[self.index(cell)];
                let mergeable = next
                    .map(|n| &self.grid[self.index(n)])
                    .filter(|t| moving.can_merge_into(t))
                    .map(Tile::position);

                let destination = match mergeable {
                    Some(target) => {
                        self.merge_into(cell, target);
                        target
                    }
                    None => {
                        self.move_tile(cell, farthest);
                        farthest
                    }
                };
                if destination != cell {
                    moved = true;
                }
            }
        }

        if moved {
            self.add_random_tile();
            if !self.moves_available() {
                self.over = true;
                info!("game over with score {}", self.score);
            }
        }

        let outcome = MoveOutcome { moved, score_delta: self.score - score_before, won: self.won, over: self.over };
        trace!("move {dir}: {outcome:?}");
        outcome
    }

    fn prepare_tiles(&mut self) {
        for tile in self.grid.iter_mut() {
            tile.prepare();
        }
    }

    /// Step from `cell` along `vector` while the next cell is in bounds and empty.
    /// Returns the last empty cell reached (possibly `cell` itself) and the first
    /// occupied cell beyond it, if that is still on the board.
    fn find_farthest_position(&self, cell: Position, vector: (isize, isize)) -> (Position, Option<Position>) {
        let mut previous = cell;
        loop {
            match previous.step(vector, self.size) {
                Some(next) if self.grid[self.index(next)].is_empty() => previous = next,
                next => return (previous, next),
            }
        }
    }

    fn merge_into(&mut self, from: Position, target: Position) {
        let mut moving = self.take(from);
        moving.set_position(target);
        let stationary = self.take(target);
        let merged = Tile::merge(moving, stationary);
        let value = merged.value();
        let idx = self.index(target);
        self.grid[idx] = merged;

        self.score += u64::from(value);
        if value == WIN_VALUE && !self.won {
            self.won = true;
            info!("reached {} with score {}", WIN_VALUE, self.score);
        }
    }

    fn move_tile(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        let mut tile = self.take(from);
        tile.set_position(to);
        let idx = self.index(to);
        self.grid[idx] = tile;
    }

    /// Remove the tile at `cell`, leaving a fresh empty tile in its place.
    fn take(&mut self, cell: Position) -> Tile {
        let idx = self.index(cell);
        mem::replace(&mut self.grid[idx], Tile::empty(cell.x, cell.y))
    }

    /// Spawn a 2 (90%) or 4 (10%) in a uniformly chosen empty cell. No-op on a full
    /// board.
    fn add_random_tile(&mut self) {
        let available = self.empty_cells();
        if available.is_empty() {
            return;
        }
        let cell = available[self.rng.gen_range(0..available.len())];
        let value = if self.rng.gen_range(0..10) < 9 { 2 } else { 4 };
        let idx = self.index(cell);
        self.grid[idx] = Tile::spawned(cell, value);
    }

    /// True if any cell is empty or any two 4-neighbours could merge.
    pub fn moves_available(&self) -> bool {
        self.grid.iter().any(Tile::is_empty) || self.tile_matches_available()
    }

    fn tile_matches_available(&self) -> bool {
        self.grid.iter().any(|tile| {
            Direction::ALL.iter().any(|dir| {
                tile.position()
                    .step(dir.vector(), self.size)
                    .map(|n| tile.can_merge_into(&self.grid[self.index(n)]))
                    .unwrap_or(false)
            })
        })
    }

    /// Positions of all empty cells, row-major.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.grid.iter().filter(|t| t.is_empty()).map(Tile::position).collect()
    }

    #[inline]
    fn index(&self, cell: Position) -> usize { cell.y * self.size + cell.x }

    /// The tile at `cell`, or `None` when `cell` is off the board.
    pub fn tile(&self, cell: Position) -> Option<&Tile> {
        (cell.x < self.size && cell.y < self.size).then(|| &self.grid[self.index(cell)])
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[Tile] { &self.grid }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    #[inline]
    pub fn is_won(&self) -> bool { self.won }

    #[inline]
    pub fn is_over(&self) -> bool { self.over }

    #[inline]
    pub fn keep_playing(&self) -> bool { self.keep_playing }

    /// Allow (or forbid) play to continue after reaching 2048.
    pub fn set_keep_playing(&mut self, keep_playing: bool) { self.keep_playing = keep_playing; }

    /// True when moves are ignored: lost, or won without `keep_playing`.
    #[inline]
    pub fn is_terminated(&self) -> bool { self.over || (self.won && !self.keep_playing) }

    /// Highest tile value on the board (0 for an empty board).
    pub fn highest_tile(&self) -> u32 { self.grid.iter().map(Tile::value).max().unwrap_or(0) }

    /// Sum of every tile value.
    pub fn tile_sum(&self) -> u64 { self.grid.iter().map(|t| u64::from(t.value())).sum() }

    /// Snapshot of the grid and flags for presentation.
    pub fn state(&self) -> BoardState {
        BoardState {
            size: self.size,
            tiles: self.grid.clone(),
            score: self.score,
            won: self.won,
            lost: self.over,
            keep_playing: self.keep_playing,
        }
    }
}

impl<R> fmt::Debug for Board<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<u32> = self.grid.iter().map(Tile::value).collect();
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("values", &values)
            .field("score", &self.score)
            .field("won", &self.won)
            .field("over", &self.over)
            .field("keep_playing", &self.keep_playing)
            .finish()
    }
}

impl<R: Rng> fmt::Display for Board<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.state(), f) }
}
