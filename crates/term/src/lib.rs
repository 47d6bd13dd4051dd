//! Terminal presentation for the match.
//!
//! Renders a [`core::MatchSnapshot`] into a simple framebuffer and flushes it
//! to the terminal. The view never touches the state machine; it only reads
//! snapshots.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot → framebuffer (pure, unit-tested)
//! - [`renderer`]: framebuffer → terminal via crossterm
//! - [`blink`]: cadence for blinking marks

pub mod blink;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_tictactoe_core as core;
pub use tui_tictactoe_types as types;

pub use blink::BlinkClock;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::TerminalRenderer;
