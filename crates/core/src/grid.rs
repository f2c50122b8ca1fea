//! Grid module - occupancy matrix of locked cells
//!
//! The grid is 20 rows by 10 columns; each cell holds the [`ShapeId`] that
//! filled it or [`ShapeId::Empty`].
//! Storage is a flat row-major array (`row * WIDTH + col`).
//! Coordinates are signed so callers can probe positions left of or above
//! the grid; such probes read as "no cell".

use serde::Serialize;

use crate::types::{ShapeId, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Placed cells, 10 columns x 20 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [ShapeId; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [ShapeId::Empty; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= GRID_HEIGHT as i32 || col >= GRID_WIDTH as i32 {
            return None;
        }
        Some(row as usize * GRID_WIDTH + col as usize)
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Cell at (row, col), None when out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<ShapeId> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, shape: ShapeId) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = shape;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(shape) if !shape.is_empty())
    }

    /// One row as a slice. Panics if `row >= GRID_HEIGHT`.
    pub fn row(&self, row: usize) -> &[ShapeId] {
        let start = row * GRID_WIDTH;
        &self.cells[start..start + GRID_WIDTH]
    }

    /// Check if a row has no empty column
    pub fn is_row_full(&self, row: usize) -> bool {
        row < GRID_HEIGHT && self.row(row).iter().all(|cell| !cell.is_empty())
    }

    /// Copy a whole row of `src` into row `dst_row` of this grid.
    pub(crate) fn copy_row_from(&mut self, dst_row: usize, src: &Grid, src_row: usize) {
        let dst = dst_row * GRID_WIDTH;
        self.cells[dst..dst + GRID_WIDTH].copy_from_slice(src.row(src_row));
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(ShapeId::Empty);
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Rows as nested arrays, top row first.
    pub fn to_rows(&self) -> [[ShapeId; GRID_WIDTH]; GRID_HEIGHT] {
        let mut out = [[ShapeId::Empty; GRID_WIDTH]; GRID_HEIGHT];
        for (r, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(r));
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}
