//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (core state machine, terminal rendering, input sampling).
//!
//! # Board Layout
//!
//! The board is a 3x3 grid addressed by a flat index in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Polling loop interval (~60 FPS) |
//! | `COMPUTER_THINK_MS` | 3000 | Minimum delay before the computer commits a move |
//! | `BLINK_INTERVAL_MS` | 100 | Toggle interval for blinking marks |
//! | `BUTTON_DEBOUNCE_MS` | 60 | Minimum gap between two presses of one button |
//!
//! # Examples
//!
//! ```
//! use tui_tictactoe_types::{GameAction, GameMode, Player, WIN_LINES};
//!
//! assert_eq!(Player::One.opponent(), Player::Two);
//! assert_eq!(Player::from_number(2), Some(Player::Two));
//!
//! let action = GameAction::from_str("navigate").unwrap();
//! assert_eq!(action, GameAction::Navigate);
//! assert_eq!(GameMode::HumanVsComputer.label(), "Computer vs Human");
//!
//! assert_eq!(WIN_LINES.len(), 8);
//! assert_eq!(WIN_LINES[0], [0, 1, 2]);
//! ```

use serde::{Deserialize, Serialize};

/// Board side length (3 cells)
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board (9)
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// The eight winning lines in evaluation order: rows, then columns, then diagonals.
///
/// The order is significant: when several lines complete at once only the
/// first one listed here is flagged as the winning line.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Polling loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default thinking delay before the computer commits its move (3 seconds)
pub const COMPUTER_THINK_MS: u32 = 3000;

/// Toggle interval for blinking marks (100ms)
pub const BLINK_INTERVAL_MS: u32 = 100;

/// Minimum interval between two accepted presses of the same button
pub const BUTTON_DEBOUNCE_MS: u32 = 60;

/// Default number of rounds (lives) in a series
pub const DEFAULT_TOTAL_LIVES: u32 = 5;

/// Points awarded to the winner of a round
pub const WIN_POINTS: u32 = 100;

/// Points awarded to each player on a drawn round
pub const DRAW_POINTS: u32 = 50;

/// The seat the computer occupies in human-vs-computer mode
pub const COMPUTER_SEAT: Player = Player::Two;


/// The two seats at the board
///
/// - **One**: drawn as `O`, rendered steady
/// - **Two**: drawn as `X`, rendered blinking (and seated by the computer in
///   human-vs-computer mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other seat
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 0-based index for per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 1-based player number as shown to people
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a 1-based player number
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tictactoe_types::Player;
    ///
    /// assert_eq!(Player::from_number(1), Some(Player::One));
    /// assert_eq!(Player::from_number(9), None);
    /// ```
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Glyph used for this player's mark
    pub fn glyph(self) -> char {
        match self {
            Player::One => 'O',
            Player::Two => 'X',
        }
    }

    /// How this player's marks are rendered
    pub fn mark_style(self) -> MarkStyle {
        match self {
            Player::One => MarkStyle::Steady,
            Player::Two => MarkStyle::Blinking,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Render hint for a mark. Blink timing itself belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkStyle {
    Steady,
    Blinking,
}

/// Who sits in seat two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    HumanVsComputer,
}

impl GameMode {
    /// Human-readable label for the scoreboard
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "Human vs Human",
            GameMode::HumanVsComputer => "Computer vs Human",
        }
    }
}

/// Physical buttons on the device
///
/// Navigate and Select drive play; Back abandons the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Navigate,
    Select,
    Back,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Navigate, Button::Select, Button::Back];

    pub fn index(self) -> usize {
        match self {
            Button::Navigate => 0,
            Button::Select => 1,
            Button::Back => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Navigate => "navigate",
            Button::Select => "select",
            Button::Back => "back",
        }
    }
}

/// Transitions the match state machine accepts
///
/// Each variant is triggered by exactly one external event: a routed button
/// press, or the computer-turn gate opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// Begin a series in the given mode
    StartGame(GameMode),
    /// Move the cursor to the next free cell
    Navigate,
    /// Place the current player's mark under the cursor
    Select,
    /// Let the computer place its mark (gate must be open)
    ComputerTurn,
    /// Clear the board and continue the series
    PlayNextRound,
    /// Abandon the series and return to the start screen
    ResetSeries,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tictactoe_types::{GameAction, GameMode};
    ///
    /// assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
    /// assert_eq!(
    ///     GameAction::from_str("startHumanVsComputer"),
    ///     Some(GameAction::StartGame(GameMode::HumanVsComputer))
    /// );
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "starthumanvshuman" => Some(GameAction::StartGame(GameMode::HumanVsHuman)),
            "starthumanvscomputer" => Some(GameAction::StartGame(GameMode::HumanVsComputer)),
            "navigate" => Some(GameAction::Navigate),
            "select" => Some(GameAction::Select),
            "computerturn" => Some(GameAction::ComputerTurn),
            "playnextround" => Some(GameAction::PlayNextRound),
            "resetseries" => Some(GameAction::ResetSeries),
            _ => None,
        }
    }

    /// Convert to camelCase string (logs and snapshot traces)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::StartGame(GameMode::HumanVsHuman) => "startHumanVsHuman",
            GameAction::StartGame(GameMode::HumanVsComputer) => "startHumanVsComputer",
            GameAction::Navigate => "navigate",
            GameAction::Select => "select",
            GameAction::ComputerTurn => "computerTurn",
            GameAction::PlayNextRound => "playNextRound",
            GameAction::ResetSeries => "resetSeries",
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// `player` completed `line` (the first matching line in [`WIN_LINES`] order)
    Won { player: Player, line: [usize; 3] },
    /// Board full with no line
    Draw,
}

/// Final standing of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player", rename_all = "snake_case")]
pub enum SeriesOutcome {
    Winner(Player),
    Tie,
}

impl SeriesOutcome {
    /// Compare final scores (indexed by [`Player::index`])
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tictactoe_types::{Player, SeriesOutcome};
    ///
    /// assert_eq!(SeriesOutcome::from_scores([300, 150]), SeriesOutcome::Winner(Player::One));
    /// assert_eq!(SeriesOutcome::from_scores([50, 250]), SeriesOutcome::Winner(Player::Two));
    /// assert_eq!(SeriesOutcome::from_scores([200, 200]), SeriesOutcome::Tie);
    /// ```
    pub fn from_scores(scores: [u32; 2]) -> Self {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => SeriesOutcome::Winner(Player::One),
            std::cmp::Ordering::Less => SeriesOutcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => SeriesOutcome::Tie,
        }
    }
}
