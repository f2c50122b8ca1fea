//! Render frame - everything the view needs for one paint.
//!
//! Built by [`GameState::frame`](crate::GameState::frame); plain data, safe
//! to hand to another task.

use arrayvec::ArrayVec;

use crate::mask::MAX_MASK_CELLS;
use crate::shapes::ShapeCatalog;
use crate::types::{Rgb, ShapeId, GRID_HEIGHT, GRID_WIDTH, PREVIEW_COLS, PREVIEW_ROWS};

/// On-grid cells of a piece plus the color to paint them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCells {
    /// (row, col) pairs; cells off the grid are left out.
    pub cells: ArrayVec<(usize, usize), MAX_MASK_CELLS>,
    pub color: Rgb,
}

impl PieceCells {
    pub fn collect(cells: impl Iterator<Item = (i32, i32)>, color: Rgb) -> Self {
        let cells = cells
            .filter(|&(row, col)| {
                row >= 0 && col >= 0 && row < GRID_HEIGHT as i32 && col < GRID_WIDTH as i32
            })
            .map(|(row, col)| (row as usize, col as usize))
            .collect();
        Self { cells, color }
    }
}

impl Default for PieceCells {
    fn default() -> Self {
        Self {
            cells: ArrayVec::new(),
            color: Rgb::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub grid: [[ShapeId; GRID_WIDTH]; GRID_HEIGHT],
    pub active: PieceCells,
    /// Landing preview, present when the hint is enabled.
    pub hint: Option<PieceCells>,
    pub next: ShapeId,
    pub preview: [[bool; PREVIEW_COLS]; PREVIEW_ROWS],
    pub preview_color: Rgb,
    pub score: u32,
    pub paused: bool,
    pub show_hint: bool,
}

impl Frame {
    /// Color of every grid cell: locked cells, then hint, then the falling piece.
    pub fn paint(&self) -> [[Rgb; GRID_WIDTH]; GRID_HEIGHT] {
        let mut out = [[Rgb::default(); GRID_WIDTH]; GRID_HEIGHT];
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, shape) in cells.iter().enumerate() {
                out[row][col] = shape.color();
            }
        }

        if let Some(hint) = &self.hint {
            for &(row, col) in &hint.cells {
                out[row][col] = hint.color;
            }
        }
        for &(row, col) in &self.active.cells {
            out[row][col] = self.active.color;
        }
        out
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            grid: [[ShapeId::Empty; GRID_WIDTH]; GRID_HEIGHT],
            active: PieceCells::default(),
            hint: None,
            next: ShapeId::Empty,
            preview: [[false; PREVIEW_COLS]; PREVIEW_ROWS],
            preview_color: Rgb::default(),
            score: 0,
            paused: true,
            show_hint: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EMPTY_COLOR, HINT_COLOR};

    #[test]
    fn collect_drops_off_grid_cells() {
        let cells = PieceCells::collect(
            [(-1, 0), (0, -1), (19, 9), (20, 0), (0, 10)].into_iter(),
            HINT_COLOR,
        );
        assert_eq!(cells.cells.as_slice(), &[(19, 9)]);
    }

    #[test]
    fn paint_layers_active_over_hint_over_grid() {
        let mut frame = Frame::default();
        frame.grid[19][0] = ShapeId::O;
        frame.hint = Some(PieceCells::collect([(19, 1), (18, 1)].into_iter(), HINT_COLOR));
        frame.active = PieceCells::collect([(18, 1)].into_iter(), ShapeId::T.active_color());

        let paint = frame.paint();
        assert_eq!(paint[0][0], EMPTY_COLOR);
        assert_eq!(paint[19][0], ShapeId::O.color());
        assert_eq!(paint[19][1], HINT_COLOR);
        assert_eq!(paint[18][1], ShapeId::T.active_color());
    }
}
