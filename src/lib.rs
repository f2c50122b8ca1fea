//! Block stacking (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `block_stacking::{core,engine,input,term,types}` and
//! hosts the terminal binary.

pub use block_stacking_core as core;
pub use block_stacking_engine as engine;
pub use block_stacking_input as input;
pub use block_stacking_term as term;
pub use block_stacking_types as types;
