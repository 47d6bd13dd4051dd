//! Read-only view of the match for the presentation layer
//!
//! A snapshot is plain data: the view renders it, the trace writer serializes
//! it, and neither can reach back into the state machine.

use serde::{Deserialize, Serialize};

use crate::match_state::{Phase, SeriesResult};
use crate::types::{
    GameMode, MarkStyle, Player, RoundOutcome, BOARD_CELLS, DEFAULT_TOTAL_LIVES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub occupant: Option<Player>,
    pub winning: bool,
    /// None for an empty cell
    pub style: Option<MarkStyle>,
}

/// The mark the current player would place under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingMark {
    pub index: usize,
    pub player: Player,
    pub style: MarkStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub cells: [CellSnapshot; BOARD_CELLS],
    pub cursor: Option<usize>,
    pub pending: Option<PendingMark>,
    pub current_player: Player,
    pub first_player: Player,
    pub scores: [u32; 2],
    pub lives_remaining: u32,
    pub total_lives: u32,
    pub mode: GameMode,
    pub phase: Phase,
    pub started: bool,
    pub round_finished: bool,
    pub can_restart_series: bool,
    pub computer_thinking: bool,
    pub rounds_played: u32,
    pub last_round: Option<RoundOutcome>,
    pub last_series: Option<SeriesResult>,
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self {
            cells: [CellSnapshot::default(); BOARD_CELLS],
            cursor: None,
            pending: None,
            current_player: Player::One,
            first_player: Player::One,
            scores: [0; 2],
            lives_remaining: DEFAULT_TOTAL_LIVES,
            total_lives: DEFAULT_TOTAL_LIVES,
            mode: GameMode::default(),
            phase: Phase::NotStarted,
            started: false,
            round_finished: false,
            can_restart_series: false,
            computer_thinking: false,
            rounds_played: 0,
            last_round: None,
            last_series: None,
        }
    }
}

impl MatchSnapshot {
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Cells on the winning line, ascending
    pub fn winning_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.winning)
            .map(|(i, _)| i)
    }

    /// True when the human at the board may press Navigate/Select
    pub fn awaiting_human(&self) -> bool {
        self.phase == Phase::Playing && !self.round_finished && !self.computer_thinking
    }
}
