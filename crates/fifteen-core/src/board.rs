//! Board model for the sliding puzzle.
//!
//! Tiles are stored row-major in a flat array; 0 is the blank. The blank
//! index is tracked alongside the tiles and kept in sync by every move.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The direction a *tile* slides, not the blank.
///
/// `Up` slides the tile below the blank upward (the blank shifts down),
/// `Down` the tile above downward, `Left` the tile right of the blank
/// leftward, `Right` the tile left of the blank rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset from the blank to the tile that slides on this move.
    pub fn tile_offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
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
        write!(f, "{}", s)
    }
}

/// Errors raised when constructing a board from untrusted tile data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {0} is too small (minimum 2)")]
    SizeTooSmall(usize),
    #[error("expected {expected} tiles, got {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("tiles are not a permutation of 0..{0}")]
    NotAPermutation(usize),
}

/// An N×N sliding puzzle board.
///
/// Invariant: `tiles` is a permutation of `0..size²` and `blank` always
/// indexes the single 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    size: usize,
    tiles: Vec<u16>,
    blank: usize,
}

/// Wire form of a board: the flat row-major tile list used by fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBoard {
    size: usize,
    tiles: Vec<u16>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::from_flat(raw.size, raw.tiles)
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        RawBoard {
            size: board.size,
            tiles: board.tiles,
        }
    }
}

impl Board {
    /// The goal configuration: 1..N²−1 in order, blank in the last cell.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn solved(size: usize) -> Self {
        assert!(size >= 2, "board size must be at least 2");
        let cells = size * size;
        let mut tiles: Vec<u16> = (1..cells as u16).collect();
        tiles.push(0);
        Self {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// Build a board from a flat row-major tile list containing exactly one
    /// zero. This is the fixture interchange format.
    pub fn from_flat(size: usize, tiles: Vec<u16>) -> Result<Self, BoardError> {
        if size < 2 {
            return Err(BoardError::SizeTooSmall(size));
        }
        let cells = size * size;
        if tiles.len() != cells {
            return Err(BoardError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }
        let mut seen = vec![false; cells];
        for &v in &tiles {
            if (v as usize) >= cells || seen[v as usize] {
                return Err(BoardError::NotAPermutation(cells));
            }
            seen[v as usize] = true;
        }
        let blank = tiles.iter().position(|&v| v == 0).expect("permutation holds a zero");
        Ok(Self { size, tiles, blank })
    }

    /// Build a board from nested rows.
    pub fn from_rows(rows: Vec<Vec<u16>>) -> Result<Self, BoardError> {
        let size = rows.len();
        let flat: Vec<u16> = rows.into_iter().flatten().collect();
        Self::from_flat(size, flat)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile value at a cell; 0 is the blank.
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.tiles[row * self.size + col]
    }

    /// Flat row-major view of the tiles.
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    pub fn blank_pos(&self) -> Position {
        Position::new(self.blank / self.size, self.blank % self.size)
    }

    /// True when every tile sits at its goal cell: tile `r·N + c + 1` at
    /// `(r, c)`, blank at `(N−1, N−1)`.
    pub fn is_solved(&self) -> bool {
        let cells = self.size * self.size;
        self.tiles[..cells - 1]
            .iter()
            .enumerate()
            .all(|(i, &v)| v as usize == i + 1)
            && self.tiles[cells - 1] == 0
    }

    /// True when the tile currently at `(row, col)` belongs there.
    pub fn is_tile_correct(&self, row: usize, col: usize) -> bool {
        let v = self.get(row, col);
        if v == 0 {
            return row == self.size - 1 && col == self.size - 1;
        }
        let home = v as usize - 1;
        home / self.size == row && home % self.size == col
    }

    /// The moves that are legal from this configuration.
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.sliding_tile(d).is_some())
            .collect()
    }

    /// Slide a tile into the blank. Returns false (board untouched) when the
    /// implied tile cell is out of bounds.
    pub fn apply(&mut self, dir: Direction) -> bool {
        let Some(tile) = self.sliding_tile(dir) else {
            return false;
        };
        self.tiles.swap(self.blank, tile);
        self.blank = tile;
        true
    }

    /// Cell index of the tile that would slide on `dir`, if it exists.
    fn sliding_tile(&self, dir: Direction) -> Option<usize> {
        let (dr, dc) = dir.tile_offset();
        let row = self.blank / self.size;
        let col = self.blank % self.size;
        let tr = row.checked_add_signed(dr)?;
        let tc = col.checked_add_signed(dc)?;
        if tr >= self.size || tc >= self.size {
            return None;
        }
        Some(tr * self.size + tc)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ((self.size * self.size - 1) as f64).log10() as usize + 1;
        for row in 0..self.size {
            for col in 0..self.size {
                let v = self.get(row, col);
                if v == 0 {
                    write!(f, "{:>width$} ", ".", width = width)?;
                } else {
                    write!(f, "{:>width$} ", v, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
