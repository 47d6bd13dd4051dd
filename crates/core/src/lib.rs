//! Core match logic - pure, deterministic, and testable
//!
//! This crate holds the game rules and the round/series state machine. It has
//! **no dependencies** on the terminal or on input devices, so it can be
//! driven from a polling loop, a test, or a benchmark alike:
//!
//! - **Deterministic**: a fixed seed reproduces every computer move
//! - **Non-panicking**: rejected actions come back as [`MatchError`] values
//! - **Observable**: every field the presentation layer needs is in [`MatchSnapshot`]
//!
//! # Module Structure
//!
//! - [`board`]: the 3x3 grid with win and draw detection
//! - [`cursor`]: "advance to the next free cell" navigation
//! - [`opponent`]: three-tier move choice for the computer
//! - [`match_state`]: the state machine (start, navigate, select, computer
//!   turn, next round, reset)
//! - [`snapshot`]: plain-data view for rendering and tracing
//! - [`config`]: lives, thinking delay, first player, seed
//! - [`rng`]: seeded ChaCha8 randomness
//! - [`error`]: the error taxonomy
//!
//! # Rules
//!
//! - A win scores 100 for the winner, a draw 50 for both.
//! - Every finished round costs one life; the series ends at zero lives.
//! - In human-vs-computer mode the computer plays Player Two and waits
//!   `computer_delay_ms` before committing its move.
//!
//! # Example
//!
//! ```
//! use tui_tictactoe_core::{MatchState, Phase, Transition};
//! use tui_tictactoe_types::{Button, GameAction, Player};
//!
//! let mut game = MatchState::default();
//!
//! // Navigate on the start screen picks human-vs-human.
//! game.press(Button::Navigate).unwrap();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // Select without a cursor is rejected and changes nothing.
//! assert!(game.apply_action(GameAction::Select).is_err());
//!
//! game.apply_action(GameAction::Navigate).unwrap();
//! let t = game.apply_action(GameAction::Select).unwrap();
//! assert_eq!(t, Transition::TurnPassed { index: 0, next: Player::Two });
//! ```
//!
//! # Timing
//!
//! Call [`MatchState::tick`](match_state::MatchState::tick) every loop
//! iteration with the elapsed milliseconds. When it returns true, apply
//! [`GameAction::ComputerTurn`](types::GameAction::ComputerTurn).

pub mod board;
pub mod config;
pub mod cursor;
pub mod error;
pub mod match_state;
pub mod opponent;
pub mod rng;
pub mod snapshot;

pub use tui_tictactoe_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use config::{FirstPlayer, MatchConfig};
pub use cursor::Cursor;
pub use error::MatchError;
pub use match_state::{MatchState, Phase, SeriesResult, Transition};
pub use opponent::{choose_move, choose_move_with_tier, Tier};
pub use rng::MatchRng;
pub use snapshot::{CellSnapshot, MatchSnapshot, PendingMark};
