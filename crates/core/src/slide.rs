//! Move engine - slides and merges tiles for one directional move.
//!
//! Every line along the direction of travel is walked starting from the cell
//! nearest the destination wall and moving back toward the opposite edge, so a
//! tile always settles against tiles that have already finished moving. A
//! per-move scratch mask records cells that absorbed a merge; such a cell never
//! merges again during the same move.
//!
//! This module only rearranges the grid. Score, highest-tile tracking and tile
//! spawning are applied by [`GameState::apply_move`](crate::GameState::apply_move).

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Direction, TileValue, CELL_COUNT, GRID_SIZE};

const SIZE: i8 = GRID_SIZE as i8;

/// At most two merges per line.
pub const MAX_MERGES: usize = (GRID_SIZE as usize) * 2;

/// Result of sliding the grid once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideOutcome {
    /// True when any cell differs from the grid before the move.
    pub changed: bool,
    /// Values produced by merges, in the order they happened.
    pub merged_values: ArrayVec<TileValue, MAX_MERGES>,
    /// Sum of `merged_values`.
    pub score_gained: u32,
}

impl SlideOutcome {
    pub fn merges(&self) -> usize {
        self.merged_values.len()
    }

    /// Largest tile created by a merge, 0 when nothing merged.
    pub fn max_merged(&self) -> TileValue {
        self.merged_values.iter().copied().max().unwrap_or(0)
    }
}

/// Cell visited at step `k` of `line`, nearest-to-wall first.
#[inline(always)]
fn line_cell(direction: Direction, line: i8, k: i8) -> (i8, i8) {
    let (d_row, d_col) = direction.delta();
    let along = if d_row + d_col < 0 { k } else { SIZE - 1 - k };
    if d_row != 0 {
        (along, line)
    } else {
        (line, along)
    }
}

/// Slide and merge every tile of `grid` toward `direction`.
pub fn slide(grid: &mut Grid, direction: Direction) -> SlideOutcome {
    let before = *grid;
    let mut merged = [false; CELL_COUNT];
    let mut outcome = SlideOutcome::default();

    for line in 0..SIZE {
        for k in 0..SIZE {
            let (row, col) = line_cell(direction, line, k);
            if let Some(value) = move_tile(grid, &mut merged, row, col, direction) {
                outcome.merged_values.push(value);
                outcome.score_gained = outcome.score_gained.saturating_add(value);
            }
        }
    }

    outcome.changed = before != *grid;
    outcome
}

/// Move a single tile as far as it goes. Returns the merged value when the
/// tile merged into its neighbour.
fn move_tile(
    grid: &mut Grid,
    merged: &mut [bool; CELL_COUNT],
    row: i8,
    col: i8,
    direction: Direction,
) -> Option<TileValue> {
    let origin = Grid::index(row, col)?;
    let mut value = grid.get_at(origin);
    if value == 0 {
        return None;
    }

    let (d_row, d_col) = direction.delta();
    grid.set_at(origin, 0);

    let mut dest = origin;
    let (mut r, mut c) = (row, col);
    let mut merged_into = None;

    while let Some(next) = Grid::index(r + d_row, c + d_col) {
        let next_value = grid.get_at(next);
        if next_value == 0 {
            dest = next;
            r += d_row;
            c += d_col;
        } else if next_value == value && !merged[next] {
            dest = next;
            value *= 2;
            merged[next] = true;
            merged_into = Some(value);
            break;
        } else {
            break;
        }
    }

    grid.set_at(dest, value);
    merged_into
}

/// True when sliding toward `direction` would change the grid.
pub fn can_slide(grid: &Grid, direction: Direction) -> bool {
    let mut scratch = *grid;
    slide(&mut scratch, direction).changed
}
