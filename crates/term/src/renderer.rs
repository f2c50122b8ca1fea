//! Screen: owns the terminal session and flushes framebuffers to it.
//!
//! Only rows that changed since the previous present are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

pub struct Screen {
    out: io::Stdout,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`Screen::enter`].
    pub fn leave(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw `fb`, rewriting only rows that differ from the last present.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_rows_into(self.shown.as_ref(), fb, &mut self.bytes)?;
        self.flush()?;

        match &mut self.shown {
            Some(shown) => shown.clone_from(fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the rows of `next` that differ from `prev` into `out`.
///
/// Every row is emitted when there is no previous frame or its size differs.
pub fn encode_rows_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style: Option<CellStyle> = None;
    let mut written = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        if prev.is_some_and(|p| p.row(y) == row) {
            continue;
        }

        out.queue(cursor::MoveTo(0, y))?;
        for cell in row {
            if style != Some(cell.style) {
                queue_style(out, cell.style)?;
                style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        written += 1;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(written)
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
