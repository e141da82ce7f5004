//! Terminal detector - does any legal swap remain?
//!
//! Every cell is tried against its right and bottom neighbor, which covers each
//! unordered adjacent pair exactly once. The walk stops at the first legal swap.

use crate::board::Grid;
use crate::swap::validate_swap_with_min;
use crate::types::{Position, MIN_MATCH};

/// First legal swap in row-major order, if any
pub fn find_valid_swap(grid: &Grid) -> Option<(Position, Position)> {
    find_valid_swap_with_min(grid, MIN_MATCH)
}

pub fn find_valid_swap_with_min(grid: &Grid, min_len: usize) -> Option<(Position, Position)> {
    grid.positions().find_map(|pos| {
        grid.forward_neighbors(pos)
            .into_iter()
            .find(|&other| validate_swap_with_min(grid, pos, other, min_len))
            .map(|other| (pos, other))
    })
}

/// True when at least one legal swap exists
pub fn has_any_valid_move(grid: &Grid) -> bool {
    find_valid_swap(grid).is_some()
}

/// Every legal swap, each unordered pair once
pub fn all_valid_swaps(grid: &Grid) -> Vec<(Position, Position)> {
    grid.positions()
        .flat_map(|pos| {
            grid.forward_neighbors(pos)
                .into_iter()
                .filter(move |&other| validate_swap_with_min(grid, pos, other, MIN_MATCH))
                .map(move |other| (pos, other))
        })
        .collect()
}
