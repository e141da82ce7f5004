//! Weapon targeting
//!
//! A weapon marks a target set that the cascade then removes exactly as if it were a
//! round of matches. Only populated cells are ever marked.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Grid;
use crate::types::{Position, WeaponKind};

/// Cells destroyed by `weapon` fired at `target`
///
/// An out-of-bounds target marks nothing. The swarm draws `swarm_size` cells from `rng`;
/// the other kinds are deterministic.
pub fn weapon_targets<R: Rng + ?Sized>(
    grid: &Grid,
    weapon: WeaponKind,
    target: Position,
    swarm_size: usize,
    rng: &mut R,
) -> BTreeSet<Position> {
    if !grid.in_bounds(target) {
        return BTreeSet::new();
    }

    let candidates: Vec<Position> = match weapon {
        WeaponKind::Lightning => line_targets(grid, target),
        WeaponKind::Dynamite => area_targets(grid, target),
        WeaponKind::HoneyBlast => match grid.token(target) {
            Some(kind) => grid
                .positions()
                .filter(|&p| grid.token(p) == Some(kind))
                .collect(),
            None => Vec::new(),
        },
        WeaponKind::BeeSwarm => {
            let mut populated: Vec<Position> =
                grid.positions().filter(|&p| grid.is_occupied(p)).collect();
            populated.shuffle(rng);
            populated.truncate(swarm_size);
            populated
        }
    };

    candidates
        .into_iter()
        .filter(|&p| grid.is_occupied(p))
        .collect()
}

/// Full row and full column through `target`
fn line_targets(grid: &Grid, target: Position) -> Vec<Position> {
    let row = (0..grid.width()).map(|col| Position::new(target.row, col));
    let col = (0..grid.height()).map(|row| Position::new(row, target.col));
    row.chain(col).collect()
}

/// 3x3 block centered on `target`, clipped to the grid
fn area_targets(grid: &Grid, target: Position) -> Vec<Position> {
    let rows = target.row.saturating_sub(1)..=(target.row + 1).min(grid.height() - 1);
    let cols = target.col.saturating_sub(1)..=(target.col + 1).min(grid.width() - 1);
    rows.flat_map(|row| cols.clone().map(move |col| Position::new(row, col)))
        .collect()
}
