//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tui_tictactoe::core::{MatchConfig, MatchState, Transition};
use tui_tictactoe::types::{GameAction, GameMode, Player};

pub const O: Option<Player> = Some(Player::One);
pub const X: Option<Player> = Some(Player::Two);
pub const E: Option<Player> = None;

/// Deterministic config with a short computer delay.
pub fn test_config() -> MatchConfig {
    MatchConfig {
        total_lives: 5,
        computer_delay_ms: 50,
        ..MatchConfig::default()
    }
    .with_seed(12345)
}

pub fn config_with_lives(total_lives: u32) -> MatchConfig {
    MatchConfig {
        total_lives,
        ..test_config()
    }
}

pub fn started(mode: GameMode) -> MatchState {
    let mut state = MatchState::new(test_config());
    state
        .apply_action(GameAction::StartGame(mode))
        .expect("start from a fresh state");
    state
}

/// Navigate until the cursor sits on `index`, then select.
pub fn play_at(state: &mut MatchState, index: usize) -> Transition {
    for _ in 0..9 {
        if state.cursor() == Some(index) {
            break;
        }
        state
            .apply_action(GameAction::Navigate)
            .expect("navigate during a human turn");
    }
    assert_eq!(state.cursor(), Some(index), "cell {index} is not reachable");
    state
        .apply_action(GameAction::Select)
        .expect("select under the cursor")
}

/// Play `moves` in order, alternating seats; returns the last transition.
pub fn play_all(state: &mut MatchState, moves: &[usize]) -> Transition {
    let mut last = None;
    for &index in moves {
        last = Some(play_at(state, index));
    }
    last.expect("at least one move")
}

/// P1 takes the top row: 0, (3), 1, (4), 2.
pub const TOP_ROW_WIN: [usize; 5] = [0, 3, 1, 4, 2];

/// Nine moves, no line for either seat.
pub const DRAW: [usize; 9] = [0, 1, 2, 4, 7, 5, 3, 6, 8];
