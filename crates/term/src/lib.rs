//! Terminal rendering module.
//!
//! A small game-oriented rendering layer: the view paints a core
//! [`Frame`](block_stacking_core::Frame) and the menu overlay into a
//! framebuffer, and the screen flushes changed rows to the terminal.
//!
//! - `fb`: styled character framebuffer
//! - `game_view`: pure layout (board, side panel, menu pages)
//! - `renderer`: crossterm output and terminal mode switching

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_stacking_core as core;
pub use block_stacking_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Menu, MenuPage, Viewport};
pub use renderer::{encode_rows_into, Screen};
