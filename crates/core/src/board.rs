//! Board module - manages the token grid
//!
//! The grid is `height` rows by `width` columns; each cell is empty or holds a token kind.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (row, col) where row 0 is the top and gravity pulls toward the last row.

use arrayvec::ArrayVec;

use crate::types::{Cell, Position, TokenKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game grid - flat storage, row-major (row * width + col)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Create an empty grid with the default 6x8 dimensions
    pub fn with_default_size() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        Some(pos.row * self.width + pos.col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Token at position, None if empty or out of bounds
    pub fn token(&self, pos: Position) -> Option<TokenKind> {
        self.get(pos).flatten()
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is in bounds and holds a token
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Exchange two cells in place
    /// Returns false (and leaves the grid untouched) if either position is out of bounds
    pub fn swap_cells(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Orthogonal neighbors that lie inside the grid
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        let mut out = ArrayVec::new();
        if pos.row > 0 {
            out.push(Position::new(pos.row - 1, pos.col));
        }
        if pos.col > 0 {
            out.push(Position::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < self.width {
            out.push(Position::new(pos.row, pos.col + 1));
        }
        if pos.row + 1 < self.height {
            out.push(Position::new(pos.row + 1, pos.col));
        }
        out
    }

    /// Right and bottom neighbors - each unordered adjacent pair is visited once
    /// when walking every cell
    pub fn forward_neighbors(&self, pos: Position) -> ArrayVec<Position, 2> {
        let mut out = ArrayVec::new();
        if pos.col + 1 < self.width {
            out.push(Position::new(pos.row, pos.col + 1));
        }
        if pos.row + 1 < self.height {
            out.push(Position::new(pos.row + 1, pos.col));
        }
        out
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position::new(row, col)))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> Vec<Cell> {
        (0..self.height)
            .map(|row| self.cells[row * self.width + col])
            .collect()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a grid from rows of token codes (`H F B C S W`, `.` for empty)
    ///
    /// Returns None if rows are ragged or contain an unknown code.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return None;
            }
            for (col, c) in line.chars().enumerate() {
                let cell = if c == '.' {
                    None
                } else {
                    Some(TokenKind::from_code(c)?)
                };
                grid.set(Position::new(row, col), cell);
            }
        }
        Some(grid)
    }

    /// Render as rows of token codes (inverse of `from_rows`)
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        self.cells[row * self.width + col]
                            .map(|k| k.code())
                            .unwrap_or('.')
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::with_default_size()
    }
}
