//! Opponent module - three-tier move choice for the computer seat
//!
//! Tiers, highest priority first. Each scans the empty cells in ascending
//! index order and stops at the first hit:
//!
//! 1. **Win**: a cell that completes a line for the computer.
//! 2. **Block**: a cell that would complete a line for the opponent.
//! 3. **Proximity**: a random cell from the open lines through the
//!    computer's existing marks.
//! 4. **Fallback**: a random empty cell.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::board::Board;
use crate::error::MatchError;
use crate::rng::MatchRng;
use crate::types::{Player, BOARD_CELLS};

/// For each cell, the other two cells of every line through it.
///
/// Rows come first, then columns, then diagonals, matching the line order
/// used for win detection.
pub const LINE_PAIRS: [&[(usize, usize)]; BOARD_CELLS] = [
    &[(1, 2), (3, 6), (4, 8)],
    &[(0, 2), (4, 7)],
    &[(0, 1), (5, 8), (4, 6)],
    &[(4, 5), (0, 6)],
    &[(3, 5), (1, 7), (0, 8), (2, 6)],
    &[(3, 4), (2, 8)],
    &[(7, 8), (0, 3), (2, 4)],
    &[(6, 8), (1, 4)],
    &[(6, 7), (2, 5), (0, 4)],
];

/// Which tier produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Win,
    Block,
    Proximity,
    Fallback,
}

/// Pick the computer's next cell
///
/// Returns [`MatchError::NoMovesAvailable`] on a full board.
pub fn choose_move(
    board: &Board,
    computer: Player,
    rng: &mut MatchRng,
) -> Result<usize, MatchError> {
    choose_move_with_tier(board, computer, rng).map(|(index, _)| index)
}

/// Same as [`choose_move`], also reporting which tier decided
pub fn choose_move_with_tier(
    board: &Board,
    computer: Player,
    rng: &mut MatchRng,
) -> Result<(usize, Tier), MatchError> {
    let empty = board.empty_indices();
    if empty.is_empty() {
        return Err(MatchError::NoMovesAvailable);
    }

    if let Some(index) = completing_move(board, &empty, computer) {
        trace!(index, "opponent: winning move");
        return Ok((index, Tier::Win));
    }

    if let Some(index) = completing_move(board, &empty, computer.opponent()) {
        trace!(index, "opponent: blocking move");
        return Ok((index, Tier::Block));
    }

    let candidates = proximity_candidates(board, computer);
    if let Some(&index) = rng.choose(&candidates) {
        trace!(index, ?candidates, "opponent: proximity move");
        return Ok((index, Tier::Proximity));
    }

    let index = *rng.choose(&empty).ok_or(MatchError::NoMovesAvailable)?;
    trace!(index, "opponent: random move");
    Ok((index, Tier::Fallback))
}

/// First empty cell that would complete a line for `player`
fn completing_move(board: &Board, empty: &[usize], player: Player) -> Option<usize> {
    empty.iter().copied().find(|&index| {
        let mut trial = board.clone();
        // `index` came from `empty_indices`, so placement cannot fail.
        trial.place_at(index, player).is_ok() && trial.winning_line(player).is_some()
    })
}

/// Empty cells on lines through `computer`'s marks where both other cells are open
///
/// Deduplicated, in first-seen order.
pub fn proximity_candidates(board: &Board, computer: Player) -> ArrayVec<usize, BOARD_CELLS> {
    let mut candidates = ArrayVec::new();
    for own in board.occupied_by(computer) {
        for &(a, b) in LINE_PAIRS[own] {
            if board.is_free(a) && board.is_free(b) {
                for index in [a, b] {
                    if !candidates.contains(&index) {
                        candidates.push(index);
                    }
                }
            }
        }
    }
    candidates
}
