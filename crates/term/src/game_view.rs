//! GameView: maps a core [`Frame`] plus menu state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Frame;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{
    GameEvent, Rgb, EMPTY_COLOR, GRID_HEIGHT, GRID_WIDTH, PREVIEW_COLS, PREVIEW_ROWS,
};

const BACKGROUND: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(220, 220, 220);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Main,
    Debug,
}

/// Menu overlay shown while the game is paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    page: MenuPage,
    status: Option<String>,
    debug_text: String,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            page: MenuPage::Main,
            status: None,
            debug_text: String::new(),
        }
    }

    pub fn page(&self) -> MenuPage {
        self.page
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn show_main(&mut self) {
        self.page = MenuPage::Main;
    }

    pub fn show_debug(&mut self, text: String) {
        self.debug_text = text;
        self.page = MenuPage::Debug;
    }

    /// React to an engine notification.
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Lost { score } => {
                self.status = Some(format!("You lost :( Your score was {}", score));
                self.page = MenuPage::Main;
            }
            GameEvent::Debug(text) => self.show_debug(text.clone()),
            GameEvent::LinesCleared { .. } => {}
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays out the board, the side panel and the menu overlay.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        frame: &Frame,
        menu: &Menu,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        if frame.paused && menu.page() == MenuPage::Debug {
            self.draw_debug_page(fb, menu, viewport);
            return;
        }

        let board_w = GRID_WIDTH as u16 * self.cell_w;
        let board_h = GRID_HEIGHT as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        let colors = frame.paint();
        for (row, line) in colors.iter().enumerate() {
            for (col, &color) in line.iter().enumerate() {
                let px = origin_x + 1 + col as u16 * self.cell_w;
                let py = origin_y + 1 + row as u16;
                let (ch, style) = if color == EMPTY_COLOR {
                    ('·', CellStyle::new(Rgb::new(90, 90, 100), BACKGROUND))
                } else {
                    ('█', CellStyle::new(color, BACKGROUND))
                };
                fb.fill_rect(px, py, self.cell_w, 1, ch, style);
            }
        }

        self.draw_side_panel(fb, frame, origin_x + frame_w + 2, origin_y);

        if frame.paused {
            draw_main_menu(fb, menu, origin_x, origin_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame, menu: &Menu, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, menu, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, frame: &Frame, x: u16, y: u16) {
        let label = CellStyle::new(TEXT, PANEL_BG).bold();
        let value = CellStyle::new(TEXT, PANEL_BG);

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &frame.score.to_string(), value);

        fb.put_str(x, y + 3, "NEXT", label);
        let preview_style = CellStyle::new(frame.preview_color, PANEL_BG);
        for r in 0..PREVIEW_ROWS {
            for c in 0..PREVIEW_COLS {
                if frame.preview[r][c] {
                    let px = x + c as u16 * self.cell_w;
                    fb.fill_rect(px, y + 4 + r as u16, self.cell_w, 1, '█', preview_style);
                }
            }
        }

        let hint_row = y + 5 + PREVIEW_ROWS as u16;
        fb.put_str(x, hint_row, "HINT", label);
        fb.put_str(x, hint_row + 1, if frame.show_hint { "on" } else { "off" }, value);
    }

    fn draw_debug_page(&self, fb: &mut FrameBuffer, menu: &Menu, viewport: Viewport) {
        let text = CellStyle::new(TEXT, PANEL_BG);
        let rows = viewport.height.saturating_sub(1);
        for (y, line) in menu.debug_text.lines().take(rows as usize).enumerate() {
            fb.put_str(0, y as u16, line, text);
        }
        fb.put_str(0, rows, "b  back", text.bold());
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
}

fn draw_main_menu(fb: &mut FrameBuffer, menu: &Menu, x: u16, y: u16, w: u16, h: u16) {
    let mut lines: Vec<&str> = vec![
        "PAUSED",
        "",
        "esc  play",
        "bksp restart",
        "f1   debug",
        "q    quit",
    ];
    let status_lines: Vec<&str> = menu
        .status()
        .map(|s| s.split_inclusive(":( ").map(str::trim_end).collect())
        .unwrap_or_default();
    if !status_lines.is_empty() {
        lines.push("");
        lines.extend(status_lines);
    }

    let text = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG);
    let top = y + h.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let row = top + i as u16;
        fb.fill_rect(x + 1, row, w.saturating_sub(2), 1, ' ', text);
        let width = line.chars().count() as u16;
        let col = x + w.saturating_sub(width) / 2;
        let style = if i == 0 { text.bold() } else { text };
        fb.put_str(col, row, line, style);
    }
}
