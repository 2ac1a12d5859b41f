//! slide-2048: the rules engine of the 2048 sliding-tile puzzle
//!
//! This crate provides:
//! - A `Board` that owns an NxN grid of `Tile`s and resolves moves (`move_tiles`),
//!   spawns, scoring and win/loss detection (`engine` module)
//! - An immutable `BoardState` snapshot carrying per-move animation hints
//!   (previous positions, merge lineage, freshly spawned tiles)
//! - `BoardConfig` for construction-time settings and `EngineError` for usage errors
//!
//! Rendering, input handling and persistence are left to the caller.
//!
//! Quick start:
//! ```
//! use slide_2048::engine::{Board, Direction};
//!
//! // Deterministic game with a seeded random source
//! let mut board = Board::new();
//! board.start_game(Some(42));
//!
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     let outcome = board.move_tiles(dir);
//!     if outcome.over {
//!         break;
//!     }
//! }
//!
//! let state = board.state();
//! assert_eq!(state.tiles.len(), 16);
//! println!("{state}");
//! ```
//!
//! Continuing after a win
//! ```
//! use slide_2048::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut board = Board::with_rng(4, StdRng::seed_from_u64(3)).unwrap();
//! let mut values = [0u32; 16];
//! values[0] = 1024;
//! values[1] = 1024;
//! board.load_values(&values).unwrap();
//!
//! assert!(board.move_tiles(Direction::Left).won);
//! // Moves are ignored until the player opts to keep going.
//! assert!(!board.move_tiles(Direction::Right).moved);
//! board.set_keep_playing(true);
//! assert!(board.move_tiles(Direction::Right).moved);
//! ```
pub mod config;
pub mod engine;
pub mod error;

pub use config::BoardConfig;
pub use engine::{Board, BoardState, Direction, MoveOutcome, Position, Tile};
pub use error::EngineError;
