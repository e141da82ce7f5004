//! Board generator - fills a grid while avoiding initial 3-in-a-rows
//!
//! Cells are filled in row-major order. Each draw is rejected only when the two cells
//! to its left, or the two cells above it, already hold that kind. This is a local check,
//! not a full rescan: a grid it produces is match-free except when a cell exhausts the
//! retry cap, in which case the last draw is kept as-is.

use rand::Rng;

use crate::board::Grid;
use crate::rng::random_token;
use crate::types::{Position, TokenKind};

/// Generate a `width` x `height` grid with no initial matches (subject to `retry_cap`)
pub fn generate_board<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    retry_cap: u32,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(width, height);

    for row in 0..height {
        for col in 0..width {
            let pos = Position::new(row, col);
            let mut kind = random_token(rng);
            let mut attempts = 1;
            while completes_run(&grid, pos, kind) && attempts < retry_cap {
                kind = random_token(rng);
                attempts += 1;
            }
            grid.set(pos, Some(kind));
        }
    }

    grid
}

/// Would placing `kind` at `pos` complete a 3-run with the two preceding cells
/// on either axis?
///
/// Configured minimum lengths are never below 3, so a board free of 3-runs has no match.
fn completes_run(grid: &Grid, pos: Position, kind: TokenKind) -> bool {
    let Position { row, col } = pos;

    if col >= 2
        && grid.token(Position::new(row, col - 1)) == Some(kind)
        && grid.token(Position::new(row, col - 2)) == Some(kind)
    {
        return true;
    }

    row >= 2
        && grid.token(Position::new(row - 1, col)) == Some(kind)
        && grid.token(Position::new(row - 2, col)) == Some(kind)
}
