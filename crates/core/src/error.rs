//! Error taxonomy for the core.
//!
//! Every error here is local and recoverable: a rejected operation leaves the
//! state untouched and the caller carries on.

use derive_more::{Display, Error};

use crate::match_state::Phase;
use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    /// Placement on an occupied or out-of-range cell.
    #[display("invalid move: cell {index} is occupied or out of range")]
    InvalidMove { index: usize },

    /// Operation not permitted in the current phase.
    #[display("illegal transition: {action:?} while {phase:?}")]
    IllegalTransition { action: GameAction, phase: Phase },

    /// Cursor or heuristic invoked on a full board.
    #[display("no moves available: the board is full")]
    NoMovesAvailable,
}

impl MatchError {
    /// True for the variant that signals a broken internal invariant rather
    /// than a caller mistake.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, MatchError::NoMovesAvailable)
    }
}
