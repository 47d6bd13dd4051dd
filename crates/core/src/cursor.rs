//! Cursor module - two-button navigation over free cells
//!
//! The cursor stands in for direct cell addressing: each Navigate press moves
//! it to the next free index (wrapping past 8 back to 0), and Select consumes it.

use crate::board::Board;
use crate::error::MatchError;
use crate::types::BOARD_CELLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    position: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self { position: None }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Move to the next free cell in increasing index order
    ///
    /// From "none" the scan starts at index 0. On a full board the position is
    /// left unchanged and [`MatchError::NoMovesAvailable`] is returned.
    pub fn advance(&mut self, board: &Board) -> Result<usize, MatchError> {
        let start = match self.position {
            Some(p) => (p + 1) % BOARD_CELLS,
            None => 0,
        };

        // One lap visits every index, so a free cell is always found if one exists.
        let next = (0..BOARD_CELLS)
            .map(|step| (start + step) % BOARD_CELLS)
            .find(|&i| board.is_free(i))
            .ok_or(MatchError::NoMovesAvailable)?;

        self.position = Some(next);
        Ok(next)
    }

    /// Point straight at `index` (used by the computer turn)
    pub fn set(&mut self, index: usize) {
        self.position = Some(index);
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}
