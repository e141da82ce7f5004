//! Swap validator - legality of exchanging two cells
//!
//! Rules, checked in order:
//! 1. both positions lie inside the grid and are orthogonally adjacent
//! 2. both cells hold a token
//! 3. the swapped grid (a scratch copy) contains at least one match anywhere
//!
//! Validation never mutates the caller's grid.

use thiserror::Error;

use crate::board::Grid;
use crate::matcher::find_matches_with_min;
use crate::types::{Position, MIN_MATCH};

/// Why a swap request was refused before touching the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SwapRejection {
    #[error("position ({}, {}) is outside the board", .0.row, .0.col)]
    OutOfBounds(Position),
    #[error("positions are not orthogonally adjacent")]
    NotAdjacent,
    #[error("cell ({}, {}) is empty", .0.row, .0.col)]
    EmptyCell(Position),
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds(_) => "out_of_bounds",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::EmptyCell(_) => "empty_cell",
        }
    }
}

/// Structural checks (bounds, adjacency, occupancy) without simulating the swap
pub fn check_swap(grid: &Grid, a: Position, b: Position) -> Result<(), SwapRejection> {
    for pos in [a, b] {
        if !grid.in_bounds(pos) {
            return Err(SwapRejection::OutOfBounds(pos));
        }
    }
    if !a.is_adjacent(b) {
        return Err(SwapRejection::NotAdjacent);
    }
    for pos in [a, b] {
        if !grid.is_occupied(pos) {
            return Err(SwapRejection::EmptyCell(pos));
        }
    }
    Ok(())
}

/// Return a copy of `grid` with `a` and `b` exchanged; the caller decides whether to commit
pub fn apply_swap(grid: &Grid, a: Position, b: Position) -> Grid {
    let mut swapped = grid.clone();
    swapped.swap_cells(a, b);
    swapped
}

/// Is exchanging `a` and `b` a legal move?
pub fn validate_swap(grid: &Grid, a: Position, b: Position) -> bool {
    validate_swap_with_min(grid, a, b, MIN_MATCH)
}

/// `validate_swap` with a custom minimum run length
pub fn validate_swap_with_min(grid: &Grid, a: Position, b: Position, min_len: usize) -> bool {
    if check_swap(grid, a, b).is_err() {
        return false;
    }
    let scratch = apply_swap(grid, a, b);
    !find_matches_with_min(&scratch, min_len).is_empty()
}
