//! Randomized checks over boards and button sequences.

mod common;

use proptest::prelude::*;

use tui_tictactoe::core::{choose_move, Board, Cursor, MatchError, MatchRng, MatchState, Phase};
use tui_tictactoe::types::{Button, GameAction, Player, WIN_LINES};

fn occupant() -> impl Strategy<Value = Option<Player>> {
    prop_oneof![Just(None), Just(Some(Player::One)), Just(Some(Player::Two))]
}

fn any_board() -> impl Strategy<Value = [Option<Player>; 9]> {
    prop::array::uniform9(occupant())
}

/// Positions reachable in play: alternate seats over a shuffled cell order,
/// stopping before any move that would end the round.
fn open_position() -> impl Strategy<Value = [Option<Player>; 9]> {
    (Just((0..9).collect::<Vec<usize>>()).prop_shuffle(), 0usize..9).prop_map(|(order, moves)| {
        let mut cells = [None; 9];
        let mut player = Player::One;
        for &index in order.iter().take(moves) {
            cells[index] = Some(player);
            if Board::from_occupants(cells).winning_line(player).is_some() {
                cells[index] = None;
                break;
            }
            player = player.opponent();
        }
        cells
    })
}

#[derive(Debug, Clone, Copy)]
enum Input {
    Press(Button),
    Tick(u32),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => Just(Input::Press(Button::Navigate)),
        3 => Just(Input::Press(Button::Select)),
        1 => Just(Input::Press(Button::Back)),
        2 => (1u32..200).prop_map(Input::Tick),
    ]
}

proptest! {
    #[test]
    fn check_win_iff_some_line_is_uniform(cells in any_board(), player in prop_oneof![Just(Player::One), Just(Player::Two)]) {
        let expected = WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| cells[i] == Some(player)));

        let mut board = Board::from_occupants(cells);
        prop_assert_eq!(board.check_win(player), expected);

        let flagged: Vec<usize> = (0..9).filter(|&i| board.cells()[i].winning).collect();
        if expected {
            prop_assert_eq!(flagged.len(), 3);
            prop_assert!(flagged.iter().all(|&i| cells[i] == Some(player)));
        } else {
            prop_assert!(flagged.is_empty());
        }
    }

    #[test]
    fn cursor_lands_on_a_free_cell(cells in any_board(), presses in 1usize..20) {
        let board = Board::from_occupants(cells);
        let mut cursor = Cursor::new();
        for _ in 0..presses {
            match cursor.advance(&board) {
                Ok(index) => {
                    prop_assert!(board.is_free(index));
                    prop_assert_eq!(cursor.position(), Some(index));
                }
                Err(err) => {
                    prop_assert!(board.is_full());
                    prop_assert_eq!(err, MatchError::NoMovesAvailable);
                    prop_assert_eq!(cursor.position(), None);
                }
            }
        }
    }

    #[test]
    fn computer_picks_a_free_cell(cells in open_position(), seed in any::<u64>()) {
        let board = Board::from_occupants(cells);
        let mut rng = MatchRng::new(seed);
        let index = choose_move(&board, Player::Two, &mut rng).unwrap();
        prop_assert!(board.is_free(index));
    }

    #[test]
    fn computer_never_misses_a_win(cells in open_position(), seed in any::<u64>()) {
        let board = Board::from_occupants(cells);
        let winning: Vec<usize> = board
            .empty_indices()
            .into_iter()
            .filter(|&i| {
                let mut probe = board.clone();
                probe.place_at(i, Player::Two).is_ok() && probe.winning_line(Player::Two).is_some()
            })
            .collect();

        let mut rng = MatchRng::new(seed);
        let index = choose_move(&board, Player::Two, &mut rng).unwrap();
        if let Some(&first) = winning.first() {
            prop_assert_eq!(index, first);
        }
    }

    #[test]
    fn button_mashing_keeps_the_match_consistent(inputs in prop::collection::vec(input(), 0..300)) {
        let mut state = MatchState::new(common::test_config());
        let total = state.total_lives();

        for step in inputs {
            match step {
                Input::Press(button) => {
                    let _ = state.press(button);
                }
                Input::Tick(ms) => {
                    if state.tick(ms) {
                        prop_assert!(state.apply_action(GameAction::ComputerTurn).is_ok());
                    }
                }
            }

            prop_assert_ne!(state.phase(), Phase::ApplyingSelection);
            prop_assert!(state.lives_remaining() <= total);
            prop_assert!(state.lives_remaining() >= 1);
            for score in state.scores() {
                prop_assert_eq!(score % 50, 0);
            }
            if let Some(index) = state.cursor() {
                prop_assert!(state.board().is_free(index));
            }
            if state.phase() == Phase::NotStarted {
                prop_assert!(!state.started());
                prop_assert_eq!(state.scores(), [0, 0]);
            }
        }
    }
}
