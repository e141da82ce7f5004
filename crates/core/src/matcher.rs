//! Match detector - finds maximal runs of identical tokens
//!
//! Rows are scanned left to right, then columns top to bottom. Each run of at least
//! `MIN_MATCH` equal tokens is reported once, at its maximal extent; the scan resumes
//! after the run's end, so overlapping sub-runs are never reported.
//!
//! A cell can belong to one horizontal and one vertical match at the same time
//! (L, T and cross shapes). Both matches are reported; removal works on the union.

use std::collections::BTreeSet;

use crate::board::Grid;
use crate::types::{Position, Special, TokenKind, MIN_MATCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal run of one token kind along one axis
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    /// Member positions in scan order (left to right, or top to bottom)
    pub positions: Vec<Position>,
    pub kind: TokenKind,
    pub axis: Axis,
}

impl Match {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Special marker earned by this run's length
    pub fn special(&self) -> Special {
        Special::for_length(self.len())
    }

    /// Cell that carries the special marker (the run's middle)
    pub fn center(&self) -> Position {
        self.positions[self.positions.len() / 2]
    }
}

/// Find every maximal run of length >= `MIN_MATCH`
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    find_matches_with_min(grid, MIN_MATCH)
}

/// Find every maximal run of length >= `min_len`
pub fn find_matches_with_min(grid: &Grid, min_len: usize) -> Vec<Match> {
    let mut matches = Vec::new();

    for row in 0..grid.height() {
        scan_line(
            grid,
            (0..grid.width()).map(|col| Position::new(row, col)),
            Axis::Horizontal,
            min_len,
            &mut matches,
        );
    }

    for col in 0..grid.width() {
        scan_line(
            grid,
            (0..grid.height()).map(|row| Position::new(row, col)),
            Axis::Vertical,
            min_len,
            &mut matches,
        );
    }

    matches
}

fn scan_line(
    grid: &Grid,
    line: impl Iterator<Item = Position>,
    axis: Axis,
    min_len: usize,
    out: &mut Vec<Match>,
) {
    let line: Vec<Position> = line.collect();
    let mut start = 0;

    while start < line.len() {
        let Some(kind) = grid.token(line[start]) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < line.len() && grid.token(line[end]) == Some(kind) {
            end += 1;
        }

        if end - start >= min_len.max(1) {
            out.push(Match {
                positions: line[start..end].to_vec(),
                kind,
                axis,
            });
        }

        start = end;
    }
}

/// True when at least one run of length >= `MIN_MATCH` exists
pub fn has_match(grid: &Grid) -> bool {
    !find_matches(grid).is_empty()
}

/// Union of all match positions - each cell appears once even when claimed by
/// a horizontal and a vertical match
pub fn matched_positions(matches: &[Match]) -> BTreeSet<Position> {
    matches
        .iter()
        .flat_map(|m| m.positions.iter().copied())
        .collect()
}
