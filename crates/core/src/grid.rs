//! Grid module - the 4x4 tile matrix
//!
//! Cells are stored in a flat row-major array for cache locality and zero
//! allocation. A cell holds 0 when empty, otherwise a power of two.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{TileValue, CELL_COUNT, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// A tile placed by [`Grid::place_random_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub row: u8,
    pub col: u8,
    pub value: TileValue,
}

/// The game grid - 4x4 tiles using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [TileValue; CELL_COUNT],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Build a grid from rows (row 0 first).
    pub fn from_rows(rows: [[TileValue; SIZE]; SIZE]) -> Self {
        let mut grid = Self::new();
        for (r, row) in rows.iter().enumerate() {
            grid.cells[r * SIZE..(r + 1) * SIZE].copy_from_slice(row);
        }
        grid
    }

    /// Copy the grid out as rows (row 0 first).
    pub fn rows(&self) -> [[TileValue; SIZE]; SIZE] {
        let mut out = [[0; SIZE]; SIZE];
        for (r, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * SIZE..(r + 1) * SIZE]);
        }
        out
    }

    /// Calculate flat index from (row, col), `None` when off the grid
    #[inline(always)]
    pub(crate) fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as usize) * SIZE + (col as usize))
    }

    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<TileValue> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, value: TileValue) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    #[inline(always)]
    pub(crate) fn get_at(&self, idx: usize) -> TileValue {
        self.cells[idx]
    }

    #[inline(always)]
    pub(crate) fn set_at(&mut self, idx: usize, value: TileValue) {
        self.cells[idx] = value;
    }

    pub fn cells(&self) -> &[TileValue] {
        &self.cells
    }

    pub fn is_empty_cell(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(0))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn tile_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    /// Largest tile on the grid (0 for an empty grid)
    pub fn max_tile(&self) -> TileValue {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Flat indices of all empty cells, in row-major order
    pub fn empty_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns the placed tile, or `None` (leaving the grid untouched) when the
    /// grid is full.
    pub fn place_random_tile(&mut self, rng: &mut SimpleRng) -> Option<PlacedTile> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let idx = empty[rng.next_range(empty.len() as u32) as usize];
        let value = rng.spawn_value();
        self.cells[idx] = value;

        Some(PlacedTile {
            row: (idx / SIZE) as u8,
            col: (idx % SIZE) as u8,
            value,
        })
    }

    /// True when no move can change the grid: no empty cell and no
    /// horizontally or vertically adjacent pair of equal tiles.
    ///
    /// Each cell is compared with its right and down neighbour only, which
    /// visits every adjacent pair exactly once.
    pub fn is_terminal(&self) -> bool {
        if self.cells.iter().any(|&v| v == 0) {
            return false;
        }

        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.cells[row * SIZE + col];
                if col + 1 < SIZE && self.cells[row * SIZE + col + 1] == value {
                    return false;
                }
                if row + 1 < SIZE && self.cells[(row + 1) * SIZE + col] == value {
                    return false;
                }
            }
        }

        true
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }
}
