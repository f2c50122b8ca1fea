//! Shared types module - data structures and constants
//!
//! Pure data shared by the engine, the terminal view and the input mapping.
//! Nothing in here knows about timers, terminals or the game rules.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: column 4, row 0 (top-left corner of the piece mask)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Gravity step interval |
//! | `FRAME_MS` | 100 | Render interval |
//!
//! # Colors
//!
//! Each shape has two colors: a darker one while it is falling and a lighter
//! one once locked into the grid. Empty cells use [`EMPTY_COLOR`] and the
//! landing hint uses [`HINT_COLOR`].

use serde::Serialize;

/// Grid dimensions
pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// Row whose occupancy after a lock ends the round
pub const LOSS_ROW: usize = 1;

/// Anchor given to every freshly spawned piece (x, y)
pub const SPAWN_ANCHOR: (i32, i32) = (4, 0);

/// Next-shape preview dimensions (rows, cols)
pub const PREVIEW_ROWS: usize = 4;
pub const PREVIEW_COLS: usize = 2;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u64 = 1000;
pub const FRAME_MS: u64 = 100;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand a 3-digit web color (`#f70`) into full 8-bit channels.
    pub const fn short_hex(rgb: u16) -> Self {
        let r = ((rgb >> 8) & 0xf) as u8;
        let g = ((rgb >> 4) & 0xf) as u8;
        let b = (rgb & 0xf) as u8;
        Self::new(r * 0x11, g * 0x11, b * 0x11)
    }
}

pub const EMPTY_COLOR: Rgb = Rgb::new(0x7f, 0x7f, 0x7f);
pub const EMPTY_ACTIVE_COLOR: Rgb = Rgb::new(0x56, 0x56, 0x56);
pub const HINT_COLOR: Rgb = Rgb::new(0x56, 0x56, 0x56);

/// Value stored in a grid cell: which shape filled it, if any.
///
/// Gameplay treats every non-empty value as equally solid; the identity only
/// picks the render color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ShapeId {
    /// Sentinel for an empty cell and the initial "no shape yet" value.
    #[default]
    Empty,
    L,
    MirroredL,
    I,
    O,
    /// The T tetromino (drawn pointing right at spawn).
    T,
    S,
    MirroredS,
}

impl ShapeId {
    /// The seven real shapes, in discriminant order.
    pub const ALL: [ShapeId; 7] = [
        ShapeId::L,
        ShapeId::MirroredL,
        ShapeId::I,
        ShapeId::O,
        ShapeId::T,
        ShapeId::S,
        ShapeId::MirroredS,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, ShapeId::Empty)
    }
}

/// Discrete commands accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    ToggleHint,
    /// Debug: promote the queued shape immediately.
    SpawnNext,
    /// Hard drop.
    Place,
    TogglePause,
    Restart,
    /// Debug: serialize the full state for display.
    DebugDump,
}

impl GameCommand {
    /// Commands that still apply while the game is paused.
    pub fn allowed_while_paused(&self) -> bool {
        matches!(
            self,
            GameCommand::TogglePause | GameCommand::Restart | GameCommand::DebugDump
        )
    }

    /// Parse command from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "togglehint" => Some(GameCommand::ToggleHint),
            "spawnnext" => Some(GameCommand::SpawnNext),
            "place" | "harddrop" => Some(GameCommand::Place),
            "togglepause" | "pause" => Some(GameCommand::TogglePause),
            "restart" => Some(GameCommand::Restart),
            "debugdump" | "debug" => Some(GameCommand::DebugDump),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::ToggleHint => "toggleHint",
            GameCommand::SpawnNext => "spawnNext",
            GameCommand::Place => "place",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Restart => "restart",
            GameCommand::DebugDump => "debugDump",
        }
    }
}

/// Notification raised by the engine for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// One or more complete rows were removed by the last lock.
    LinesCleared { count: u32, score: u32 },
    /// The stack reached the loss row; the round was reset.
    Lost { score: u32 },
    /// Pretty JSON dump requested through [`GameCommand::DebugDump`].
    Debug(String),
}
