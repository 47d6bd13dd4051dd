//! Terminal input module.
//!
//! Stands in for the two-button device: `crossterm` key events map to
//! [`crate::types::Button`], and [`ButtonSampler`] turns them into debounced,
//! one-per-press samples for the polling loop.

pub mod handler;
pub mod map;

pub use tui_tictactoe_types as types;

pub use handler::{ButtonSampler, Sample};
pub use map::{map_key, should_quit};
