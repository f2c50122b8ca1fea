//! Game runtime - drives the core engine on a tokio runtime.
//!
//! [`core::GameState`] is single-owner; this crate gives it a home:
//!
//! - one task applies queued commands and the 1 second gravity tick
//! - frames are published on a watch channel for the render loop
//! - loss and debug notifications are forwarded as [`types::GameEvent`]s
//! - one stop signal ends the game loop and the render loop
//!
//! Configuration comes from environment variables, see [`RunConfig`].

pub mod config;
pub mod session;

pub use block_stacking_core as core;
pub use block_stacking_types as types;

pub use config::RunConfig;
pub use session::{render_loop, run_game_loop, spawn_game, GameHandle};
