//! Terminal input module.
//!
//! Maps `crossterm` key events onto engine commands and a few menu-only
//! actions. Only key presses are meaningful; repeats and releases are
//! ignored by the caller.

pub mod map;

pub use block_stacking_types as types;

pub use map::{map_key, KeyAction};
