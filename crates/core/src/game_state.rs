//! Game state module - the single owner of all gameplay state
//!
//! Ties together the grid, the falling piece, the next-shape slot and the
//! line counter, and implements every command: moves, rotation, gravity
//! ticks, hard drops, line clears, loss detection and restart.
//!
//! Two permissive rules are kept on purpose:
//!
//! - any anchor on row 0 counts as a valid position, so a piece may spawn
//!   (or slide) over existing blocks there;
//! - rotation is applied without a validity check.
//!
//! Horizontal moves never cross the side walls, even on row 0. After a
//! rotation the anchor is wrapped back onto the grid: a mask that now sticks
//! out past the right edge restarts at column 0.

use serde::Serialize;

use crate::frame::{Frame, PieceCells};
use crate::grid::Grid;
use crate::mask::Mask;
use crate::rng::ShapeSource;
use crate::shapes::{random_shape, ShapeCatalog, L_MASK};
use crate::types::*;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeId,
    pub mask: Mask,
    /// Column of the mask's top-left corner.
    pub x: i32,
    /// Row of the mask's top-left corner (0 = top).
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn anchor with its canonical mask
    pub fn spawn(shape: ShapeId) -> Self {
        Self {
            shape,
            mask: shape.mask(),
            x: SPAWN_ANCHOR.0,
            y: SPAWN_ANCHOR.1,
        }
    }

    /// Grid (row, col) of every occupied mask cell with the anchor at (x, y).
    pub fn cells_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask
            .occupied()
            .into_iter()
            .map(move |(r, c)| (y + r as i32, x + c as i32))
    }
}

/// Outcome of the bottom-up row scan after a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowScan {
    Cleared(u32),
    Lost { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    current: Piece,
    next: ShapeId,
    shapes: ShapeSource,
    /// Completed rows since the last restart.
    score: u32,
    paused: bool,
    show_hint: bool,
    /// Last notification for the presentation layer (consumed by observers).
    last_event: Option<GameEvent>,
}

impl GameState {
    /// Create a paused game with the first piece already spawned
    pub fn new(seed: u32) -> Self {
        let mut shapes = ShapeSource::new(seed);
        let next = random_shape(&mut shapes);

        let mut state = Self {
            grid: Grid::new(),
            current: Piece {
                shape: ShapeId::Empty,
                mask: L_MASK,
                x: SPAWN_ANCHOR.0,
                y: SPAWN_ANCHOR.1,
            },
            next,
            shapes,
            score: 0,
            paused: true,
            show_hint: true,
            last_event: None,
        };
        state.next_shape();
        state
    }

    /// Replace the grid, e.g. to start from a prepared stack.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> ShapeId {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    pub fn seed(&self) -> u32 {
        self.shapes.seed()
    }

    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    /// Whether the current mask may sit with its anchor at (x, y).
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        if y == 0 {
            return true;
        }

        let mask = &self.current.mask;
        if y + mask.rows() as i32 > GRID_HEIGHT as i32 {
            return false;
        }

        self.current.cells_at(x, y).all(|(row, col)| {
            col >= 0
                && col < GRID_WIDTH as i32
                && matches!(self.grid.get(row, col), Some(ShapeId::Empty))
        })
    }

    /// Lowest valid row for the current column, searching down from the
    /// current row.
    ///
    /// If the current row itself is invalid the result is one above it.
    pub fn drop_y(&self) -> i32 {
        let x = self.current.x;
        let mut y = self.current.y;
        while self.is_valid_position(x, y) {
            y += 1;
        }
        y - 1
    }

    /// Apply a command from the input layer.
    ///
    /// Returns false when the command had no effect. While paused only
    /// pause, restart and the debug dump are accepted.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        if self.paused && !command.allowed_while_paused() {
            return false;
        }

        match command {
            GameCommand::MoveLeft => self.try_shift(-1),
            GameCommand::MoveRight => self.try_shift(1),
            GameCommand::SoftDrop => self.tick(),
            GameCommand::Rotate => {
                self.rotate();
                true
            }
            GameCommand::ToggleHint => {
                self.show_hint = !self.show_hint;
                tracing::debug!(show_hint = self.show_hint, "hint toggled");
                true
            }
            GameCommand::SpawnNext => {
                self.next_shape();
                true
            }
            GameCommand::Place => {
                self.lock();
                true
            }
            GameCommand::TogglePause => {
                self.paused = !self.paused;
                true
            }
            GameCommand::Restart => {
                self.restart();
                true
            }
            GameCommand::DebugDump => {
                self.last_event = Some(GameEvent::Debug(self.debug_json()));
                true
            }
        }
    }

    /// One gravity step: lock if resting on the drop row, otherwise fall one row.
    ///
    /// A piece rotated into the stack has a drop row above itself; it keeps
    /// falling until it is clear again.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        if self.current.y == self.drop_y() {
            self.lock();
        } else {
            self.current.y += 1;
        }
        true
    }

    /// Clear the grid and score, pause, and bring in the queued shape.
    pub fn restart(&mut self) {
        self.paused = true;
        self.grid.clear();
        self.score = 0;
        self.next_shape();
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        let x = self.current.x + dx;
        let max_x = GRID_WIDTH as i32 - self.current.mask.cols() as i32;
        if !(0..=max_x).contains(&x) || !self.is_valid_position(x, self.current.y) {
            return false;
        }
        self.current.x = x;
        true
    }

    fn rotate(&mut self) {
        self.current.mask = self.current.mask.rotate();
        self.wrap_anchor();
    }

    fn wrap_anchor(&mut self) {
        let max_x = GRID_WIDTH as i32 - self.current.mask.cols() as i32;
        if self.current.x > max_x {
            self.current.x = 0;
        }
    }

    /// Stamp the piece at its drop row, resolve rows, and spawn the next piece.
    fn lock(&mut self) {
        let y = self.drop_y();
        let piece = self.current;
        for (row, col) in piece.cells_at(piece.x, y) {
            // Cells pushed off the grid by an unchecked rotation are dropped.
            self.grid.set(row, col, piece.shape);
        }

        match self.resolve_rows() {
            RowScan::Lost { score } => {
                tracing::info!(score, "stack reached the loss row");
                self.restart();
                self.last_event = Some(GameEvent::Lost { score });
            }
            RowScan::Cleared(0) => {}
            RowScan::Cleared(count) => {
                tracing::info!(count, score = self.score, "rows completed");
                self.last_event = Some(GameEvent::LinesCleared {
                    count,
                    score: self.score,
                });
            }
        }

        self.next_shape();
    }

    /// Scan rows bottom to top, dropping complete ones.
    ///
    /// Any filled cell on [`LOSS_ROW`] ends the round as soon as the scan
    /// reaches it, before that row's completeness is known.
    fn resolve_rows(&mut self) -> RowScan {
        let mut compacted = Grid::new();
        let mut write_row = GRID_HEIGHT;
        let mut cleared = 0;

        for row in (0..GRID_HEIGHT).rev() {
            let mut complete = true;
            for cell in self.grid.row(row) {
                if cell.is_empty() {
                    complete = false;
                } else if row == LOSS_ROW {
                    return RowScan::Lost { score: self.score };
                }
            }

            if complete {
                self.score += 1;
                cleared += 1;
            } else {
                write_row -= 1;
                compacted.copy_row_from(write_row, &self.grid, row);
            }
        }

        self.grid = compacted;
        RowScan::Cleared(cleared)
    }

    fn next_shape(&mut self) {
        self.current = Piece::spawn(self.next);
        tracing::debug!(shape = ?self.next, "switched to next shape");
        self.next = random_shape(&mut self.shapes);
    }

    /// Force the falling piece to a given shape at the spawn anchor.
    pub fn spawn(&mut self, shape: ShapeId) {
        self.current = Piece::spawn(shape);
    }

    /// Build a render frame.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::default();
        self.frame_into(&mut frame);
        frame
    }

    /// Fill an existing frame in place.
    pub fn frame_into(&self, out: &mut Frame) {
        out.grid = self.grid.to_rows();

        let piece = &self.current;
        out.active = PieceCells::collect(
            piece.cells_at(piece.x, piece.y),
            piece.shape.active_color(),
        );
        out.hint = self.show_hint.then(|| {
            PieceCells::collect(piece.cells_at(piece.x, self.drop_y()), HINT_COLOR)
        });

        let next_mask = self.next.mask();
        for (r, row) in out.preview.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = next_mask.get(r, c);
            }
        }
        out.next = self.next;
        out.preview_color = self.next.color();

        out.score = self.score;
        out.paused = self.paused;
        out.show_hint = self.show_hint;
    }

    /// Pretty JSON of the full state, for the debug page.
    pub fn debug_json(&self) -> String {
        let view = DebugView {
            grid: &self.grid,
            current_position: [self.current.x, self.current.y],
            current_shape_mask: &self.current.mask,
            current_shape: self.current.shape,
            next_shape: self.next,
            score: self.score,
            paused: self.paused,
            show_hint: self.show_hint,
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|err| {
            tracing::warn!(%err, "debug dump failed");
            "Parse err!".to_string()
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DebugView<'a> {
    grid: &'a Grid,
    current_position: [i32; 2],
    current_shape_mask: &'a Mask,
    current_shape: ShapeId,
    next_shape: ShapeId,
    score: u32,
    paused: bool,
    show_hint: bool,
}
