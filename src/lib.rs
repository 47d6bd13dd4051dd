//! TUI tic-tac-toe (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benchmarks can write `tui_tictactoe::{core,input,term,types}`.

pub use tui_tictactoe_core as core;
pub use tui_tictactoe_input as input;
pub use tui_tictactoe_term as term;
pub use tui_tictactoe_types as types;
