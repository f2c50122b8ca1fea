//! Core game logic module - pure, deterministic, and testable
//!
//! All gameplay rules and state live here, with no dependency on terminals,
//! timers or threads:
//!
//! - **Deterministic**: the same seed produces the same shape sequence
//! - **Total**: every command returns normally; rejected moves are no-ops
//! - **Allocation-light**: masks, grids and frames are fixed-size
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 occupancy matrix with row completeness checks
//! - [`mask`]: rectangular piece masks and the 90 degree rotation
//! - [`shapes`]: the seven shapes, their spawn masks and colors
//! - [`game_state`]: the engine itself (collision, drop, lock, clear, loss)
//! - [`frame`]: per-paint snapshot handed to the view
//! - [`rng`]: seeded uniform shape draws
//!
//! # Example
//!
//! ```
//! use block_stacking_core::GameState;
//! use block_stacking_types::GameCommand;
//!
//! // A new game starts paused.
//! let mut game = GameState::new(12345);
//! assert!(game.paused());
//!
//! game.apply_command(GameCommand::TogglePause);
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::Place);
//!
//! assert_eq!(game.grid().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Gravity is driven from outside: call [`GameState::tick`] once per period
//! (1 second by default). Manual commands never reset that timer.

pub mod frame;
pub mod game_state;
pub mod grid;
pub mod mask;
pub mod rng;
pub mod shapes;

pub use block_stacking_types as types;

// Re-export commonly used types for convenience
pub use frame::{Frame, PieceCells};
pub use game_state::{GameState, Piece};
pub use grid::Grid;
pub use mask::{Mask, MAX_MASK_CELLS};
pub use rng::{ShapeSource, SimpleRng};
pub use shapes::{random_shape, ShapeCatalog};
