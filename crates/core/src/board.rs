//! Board module - manages the 3x3 grid
//!
//! The board is a fixed array of nine cells in row-major order. Each cell
//! records who occupies it and whether it belongs to the winning line.
//! Occupancy is write-once within a round; only [`Board::reset`] empties a cell.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::types::{Player, BOARD_CELLS, WIN_LINES};

/// One board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub occupant: Option<Player>,
    pub winning: bool,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The game board - 9 cells, indices 0..=8
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::default(); BOARD_CELLS],
        }
    }

    /// Build a board from occupants (winning flags start cleared)
    pub fn from_occupants(occupants: [Option<Player>; BOARD_CELLS]) -> Self {
        let mut board = Self::new();
        for (cell, occupant) in board.cells.iter_mut().zip(occupants) {
            cell.occupant = occupant;
        }
        board
    }

    /// Get cell at index
    /// Returns None if out of range
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Occupant at index (None for empty or out of range)
    pub fn occupant(&self, index: usize) -> Option<Player> {
        self.get(index).and_then(|c| c.occupant)
    }

    /// Check if index is on the board and empty
    pub fn is_free(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell { occupant: None, .. }))
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Place a mark
    ///
    /// Fails with [`MatchError::InvalidMove`] when the cell is occupied or the
    /// index is out of range. Winning flags are left untouched.
    pub fn place_at(&mut self, index: usize, player: Player) -> Result<(), MatchError> {
        match self.cells.get_mut(index) {
            Some(cell) if cell.occupant.is_none() => {
                cell.occupant = Some(player);
                Ok(())
            }
            _ => Err(MatchError::InvalidMove { index }),
        }
    }

    /// True iff all nine cells are occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.occupant.is_some())
    }

    /// Indices with no occupant, ascending
    pub fn empty_indices(&self) -> ArrayVec<usize, BOARD_CELLS> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices occupied by `player`, ascending
    pub fn occupied_by(&self, player: Player) -> ArrayVec<usize, BOARD_CELLS> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.occupant == Some(player))
            .map(|(i, _)| i)
            .collect()
    }

    /// First line in [`WIN_LINES`] order held entirely by `player`
    pub fn winning_line(&self, player: Player) -> Option<[usize; 3]> {
        WIN_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i].occupant == Some(player)))
    }

    /// Check for a win and flag the winning cells
    ///
    /// Only the first matching line is flagged, even when a single placement
    /// completes two lines at once.
    pub fn check_win(&mut self, player: Player) -> bool {
        let Some(line) = self.winning_line(player) else {
            return false;
        };
        for i in line {
            self.cells[i].winning = true;
        }
        true
    }

    /// Clear occupancy and winning flags on every cell
    pub fn reset(&mut self) {
        self.cells = [Cell::default(); BOARD_CELLS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: Option<Player> = Some(Player::One);
    const X: Option<Player> = Some(Player::Two);
    const E: Option<Player> = None;

    #[test]
    fn test_place_is_write_once() {
        let mut board = Board::new();
        assert!(board.place_at(4, Player::One).is_ok());
        assert_eq!(
            board.place_at(4, Player::Two),
            Err(MatchError::InvalidMove { index: 4 })
        );
        assert_eq!(board.occupant(4), Some(Player::One));
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.place_at(9, Player::One),
            Err(MatchError::InvalidMove { index: 9 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_leaves_winning_flags() {
        let mut board = Board::from_occupants([O, O, O, E, E, E, E, E, E]);
        assert!(board.check_win(Player::One));
        board.place_at(5, Player::Two).unwrap();
        assert!(board.cells[0].winning);
        assert!(!board.cells[5].winning);
    }

    #[test]
    fn test_double_line_flags_first_only() {
        // Placing 0 last completes both the top row and the left column.
        let mut board = Board::from_occupants([O, O, O, O, X, X, O, X, X]);
        assert!(board.check_win(Player::One));
        let flagged: Vec<usize> = (0..9).filter(|&i| board.cells[i].winning).collect();
        assert_eq!(flagged, vec![0, 1, 2]);
    }

    #[test]
    fn test_check_win_other_player_does_not_flag() {
        let mut board = Board::from_occupants([X, X, X, O, O, E, E, E, E]);
        assert!(!board.check_win(Player::One));
        assert!(board.cells.iter().all(|c| !c.winning));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::from_occupants([X, X, X, O, O, E, E, E, E]);
        board.check_win(Player::Two);
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.empty_indices().len(), 9);
    }
}
