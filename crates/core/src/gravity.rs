//! Gravity and refill
//!
//! Removal empties the union of matched cells. Gravity then compacts each column
//! toward the bottom with a two-pointer pass (surviving tokens keep their relative
//! order) and the vacated top cells receive freshly drawn tokens. Refill draws do not
//! avoid matches; new runs are picked up by the next detection round.

use std::collections::BTreeSet;

use rand::Rng;

use crate::board::Grid;
use crate::matcher::{matched_positions, Match};
use crate::rng::random_token;
use crate::types::Position;

/// Empty every listed cell; returns how many tokens were actually removed
pub fn clear_positions(grid: &mut Grid, positions: &BTreeSet<Position>) -> usize {
    let mut removed = 0;
    for &pos in positions {
        if grid.is_occupied(pos) {
            grid.set(pos, None);
            removed += 1;
        }
    }
    removed
}

/// Compact each column downward; returns the number of cells left empty at the top
pub fn compact_columns(grid: &mut Grid) -> usize {
    let mut vacated = 0;

    for col in 0..grid.width() {
        let mut write_row = grid.height();

        // Scan from bottom to top, moving survivors down to the write position
        for read_row in (0..grid.height()).rev() {
            let read = Position::new(read_row, col);
            if let Some(kind) = grid.token(read) {
                write_row -= 1;
                if write_row != read_row {
                    grid.set(Position::new(write_row, col), Some(kind));
                    grid.set(read, None);
                }
            }
        }

        vacated += write_row;
    }

    vacated
}

/// Fill every empty cell with a fresh random token
pub fn refill<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut filled = 0;
    for pos in grid.positions().collect::<Vec<_>>() {
        if grid.get(pos) == Some(None) {
            grid.set(pos, Some(random_token(rng)));
            filled += 1;
        }
    }
    filled
}

/// Compact then refill in place
pub fn apply_gravity<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    compact_columns(grid);
    refill(grid, rng);
}

/// Clear + gravity + refill, composed; returns the settled grid
pub fn remove_and_refill<R: Rng + ?Sized>(grid: &Grid, matches: &[Match], rng: &mut R) -> Grid {
    let mut next = grid.clone();
    clear_positions(&mut next, &matched_positions(matches));
    apply_gravity(&mut next, rng);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_matches;
    use crate::rng::SimpleRng;
    use crate::types::TokenKind;

    #[test]
    fn test_compact_preserves_order() {
        let mut g = Grid::from_rows(&["H.", ".F", "B.", "..", "C."]).unwrap();
        let vacated = compact_columns(&mut g);
        assert_eq!(g.to_rows(), vec!["..", "..", "H.", "B.", "CF"]);
        assert_eq!(vacated, 2 + 4);
    }

    #[test]
    fn test_remove_and_refill_fills_everything() {
        let g = Grid::from_rows(&["FBC", "HHH", "CFB"]).unwrap();
        let matches = find_matches(&g);
        let mut rng = SimpleRng::new(5);
        let next = remove_and_refill(&g, &matches, &mut rng);
        assert!(next.is_full());
        // The top row fell one row; the bottom row did not move.
        assert_eq!(next.to_rows()[1], "FBC");
        assert_eq!(next.to_rows()[2], "CFB");
    }

    #[test]
    fn test_clear_positions_counts_each_cell_once() {
        let mut g = Grid::from_rows(&["FHF", "HHH", "FHF"]).unwrap();
        let matches = find_matches(&g);
        let removed = clear_positions(&mut g, &matched_positions(&matches));
        assert_eq!(removed, 5);
        assert_eq!(g.empty_count(), 5);
    }

    #[test]
    fn test_refill_only_touches_empty_cells() {
        let mut g = Grid::from_rows(&["..", "HF"]).unwrap();
        let filled = refill(&mut g, &mut SimpleRng::new(1));
        assert_eq!(filled, 2);
        assert_eq!(g.token(Position::new(1, 0)), Some(TokenKind::Honey));
        assert_eq!(g.token(Position::new(1, 1)), Some(TokenKind::Flower));
    }
}
