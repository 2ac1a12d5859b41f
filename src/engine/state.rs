use std::fmt;

use serde::Serialize;

use super::tile::{Position, Tile};

/// Immutable copy of a board taken after a move, for rendering and animation.
///
/// `tiles` is row-major and owned by the snapshot; nothing here aliases the engine.
/// `lost` mirrors the engine's `over` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    pub size: usize,
    pub tiles: Vec<Tile>,
    pub score: u64,
    pub won: bool,
    pub lost: bool,
    pub keep_playing: bool,
}

impl BoardState {
    /// The tile at `(x, y)`, or `None` off the board.
    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        (x < self.size && y < self.size).then(|| &self.tiles[y * self.size + x])
    }

    /// Tile values row by row.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.tiles.chunks(self.size).map(|row| row.iter().map(Tile::value).collect()).collect()
    }

    /// Tiles that slid (without merging) during the last move, as `(from, to)`.
    pub fn slides(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.tiles.iter().filter(|t| !t.is_empty()).filter_map(|t| match t.previous_position() {
            Some(from) if from != t.position() => Some((from, t.position())),
            _ => None,
        })
    }

    /// Tiles created by a merge during the last move.
    pub fn merges(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| t.merged_from().is_some())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8);
        writeln!(f)?;
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        write!(f, "score: {}", self.score)?;
        if self.won {
            write!(f, " (won)")?;
        }
        if self.lost {
            write!(f, " (game over)")?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{:^7}", v),
    }
}
