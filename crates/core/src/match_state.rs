//! Match state module - the round/series state machine
//!
//! [`MatchState`] owns the board, the cursor and the RNG, plus every piece of
//! turn, score and lives bookkeeping. It changes only through
//! [`MatchState::apply_action`] (or [`MatchState::press`], which routes a
//! physical button to the action valid in the current phase) and advances its
//! computer-turn clock through [`MatchState::tick`].
//!
//! A rejected action returns an error and leaves the state exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::board::Board;
use crate::config::MatchConfig;
use crate::cursor::Cursor;
use crate::error::MatchError;
use crate::opponent;
use crate::rng::MatchRng;
use crate::snapshot::{CellSnapshot, MatchSnapshot, PendingMark};
use crate::types::*;

/// Seed used when the config leaves it unset
pub const DEFAULT_SEED: u64 = 1;

/// Where the match is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a mode choice (also right after a series ends)
    #[default]
    NotStarted,
    /// A round is in progress
    Playing,
    /// A mark is being committed; every action is rejected
    ApplyingSelection,
    /// A round ended with lives to spare
    RoundFinished,
}

/// Final standings of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesResult {
    pub outcome: SeriesOutcome,
    pub mode: GameMode,
    pub scores: [u32; 2],
    pub rounds_played: u32,
    /// True when the series was cut short by `ResetSeries`
    pub abandoned: bool,
}

/// What an accepted action did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Started { mode: GameMode, first: Player },
    CursorMoved { index: usize },
    /// A mark went down and the turn passed to `next`
    TurnPassed { index: usize, next: Player },
    /// A mark ended the round; lives remain
    RoundOver { index: usize, outcome: RoundOutcome },
    /// A mark ended the round and the last life with it
    SeriesOver { round: RoundOutcome, series: SeriesResult },
    NextRound { first: Player },
    SeriesReset { abandoned: Option<SeriesResult> },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,
    board: Board,
    cursor: Cursor,
    rng: MatchRng,
    phase: Phase,
    started: bool,
    /// Per round, not per series
    finished: bool,
    current_player: Player,
    first_player: Player,
    lives_remaining: u32,
    scores: [u32; 2],
    mode: GameMode,
    computer_pending: bool,
    /// Time the computer has spent on the current turn
    computer_wait_ms: u32,
    can_restart_series: bool,
    rounds_played: u32,
    last_round: Option<RoundOutcome>,
    last_series: Option<SeriesResult>,
}

impl MatchState {
    pub fn new(config: MatchConfig) -> Self {
        let rng = MatchRng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let lives_remaining = config.total_lives;
        Self {
            config,
            board: Board::new(),
            cursor: Cursor::new(),
            rng,
            phase: Phase::NotStarted,
            started: false,
            finished: false,
            current_player: Player::One,
            first_player: Player::One,
            lives_remaining,
            scores: [0; 2],
            mode: GameMode::default(),
            computer_pending: false,
            computer_wait_ms: 0,
            can_restart_series: false,
            rounds_played: 0,
            last_round: None,
            last_series: None,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.position()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn total_lives(&self) -> u32 {
        self.config.total_lives
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn computer_turn_pending(&self) -> bool {
        self.computer_pending
    }

    pub fn computer_wait_ms(&self) -> u32 {
        self.computer_wait_ms
    }

    /// True while a selection is being committed
    ///
    /// The commit starts and ends inside one `apply_action` call, so callers
    /// only ever see false here.
    pub fn input_locked(&self) -> bool {
        self.phase == Phase::ApplyingSelection
    }

    pub fn can_restart_series(&self) -> bool {
        self.can_restart_series
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn last_round(&self) -> Option<RoundOutcome> {
        self.last_round
    }

    pub fn last_series(&self) -> Option<SeriesResult> {
        self.last_series
    }

    /// Whether the computer has thought long enough to move
    pub fn computer_gate_open(&self) -> bool {
        self.phase == Phase::Playing
            && self.computer_pending
            && self.computer_wait_ms >= self.config.computer_delay_ms
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        for (slot, cell) in out.cells.iter_mut().zip(self.board.cells()) {
            *slot = CellSnapshot {
                occupant: cell.occupant,
                winning: cell.winning,
                style: cell.occupant.map(Player::mark_style),
            };
        }

        out.cursor = self.cursor.position();
        out.pending = self.cursor.position().map(|index| PendingMark {
            index,
            player: self.current_player,
            style: self.current_player.mark_style(),
        });
        out.current_player = self.current_player;
        out.first_player = self.first_player;
        out.scores = self.scores;
        out.lives_remaining = self.lives_remaining;
        out.total_lives = self.config.total_lives;
        out.mode = self.mode;
        out.phase = self.phase;
        out.started = self.started;
        out.round_finished = self.finished;
        out.can_restart_series = self.can_restart_series;
        out.computer_thinking = self.phase == Phase::Playing && self.computer_pending;
        out.rounds_played = self.rounds_played;
        out.last_round = self.last_round;
        out.last_series = self.last_series;
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the computer-turn clock
    ///
    /// Returns true once the thinking delay has elapsed; the caller then
    /// issues [`GameAction::ComputerTurn`]. Does nothing unless the computer
    /// is to move.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing || !self.computer_pending {
            return false;
        }
        self.computer_wait_ms = self.computer_wait_ms.saturating_add(elapsed_ms);
        self.computer_gate_open()
    }

    /// Route a physical button to the action valid in the current phase
    pub fn press(&mut self, button: Button) -> Result<Transition, MatchError> {
        let action = match (self.phase, button) {
            (_, Button::Back) => GameAction::ResetSeries,
            (Phase::NotStarted, Button::Navigate) => GameAction::StartGame(GameMode::HumanVsHuman),
            (Phase::NotStarted, Button::Select) => GameAction::StartGame(GameMode::HumanVsComputer),
            (Phase::Playing | Phase::ApplyingSelection, Button::Navigate) => GameAction::Navigate,
            (Phase::Playing | Phase::ApplyingSelection, Button::Select) => GameAction::Select,
            (Phase::RoundFinished, Button::Navigate) => GameAction::PlayNextRound,
            (Phase::RoundFinished, Button::Select) => GameAction::ResetSeries,
        };
        self.apply_action(action)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> Result<Transition, MatchError> {
        let result = if self.phase == Phase::ApplyingSelection {
            Err(self.illegal(action))
        } else {
            match action {
                GameAction::StartGame(mode) => self.start_game(mode),
                GameAction::Navigate => self.navigate(),
                GameAction::Select => self.select(),
                GameAction::ComputerTurn => self.computer_turn(),
                GameAction::PlayNextRound => self.play_next_round(),
                GameAction::ResetSeries => Ok(self.reset_series()),
            }
        };

        match &result {
            Ok(transition) => {
                debug!(action = action.as_str(), ?transition, "transition accepted")
            }
            Err(err) if err.is_invariant_violation() => {
                error!(action = action.as_str(), phase = ?self.phase, %err, "invariant violated")
            }
            Err(err) => debug!(action = action.as_str(), %err, "transition rejected"),
        }
        result
    }

    fn illegal(&self, action: GameAction) -> MatchError {
        MatchError::IllegalTransition {
            action,
            phase: self.phase,
        }
    }

    fn start_game(&mut self, mode: GameMode) -> Result<Transition, MatchError> {
        if self.phase != Phase::NotStarted {
            return Err(self.illegal(GameAction::StartGame(mode)));
        }

        self.clear_series();
        self.can_restart_series = false;
        self.last_round = None;
        self.last_series = None;

        let first = match self.config.first_player.fixed() {
            Some(player) => player,
            None => {
                if self.rng.gen_bool(0.5) {
                    Player::One
                } else {
                    Player::Two
                }
            }
        };

        self.mode = mode;
        self.started = true;
        self.current_player = first;
        self.first_player = first;
        self.phase = Phase::Playing;
        self.arm_computer_turn();

        Ok(Transition::Started { mode, first })
    }

    /// Human turns only, round still open
    fn human_may_act(&self) -> bool {
        self.phase == Phase::Playing && !self.finished && !self.computer_pending
    }

    fn navigate(&mut self) -> Result<Transition, MatchError> {
        if !self.human_may_act() {
            return Err(self.illegal(GameAction::Navigate));
        }
        let index = self.cursor.advance(&self.board)?;
        Ok(Transition::CursorMoved { index })
    }

    fn select(&mut self) -> Result<Transition, MatchError> {
        if !self.human_may_act() {
            return Err(self.illegal(GameAction::Select));
        }
        let Some(index) = self.cursor.position() else {
            return Err(self.illegal(GameAction::Select));
        };
        self.commit(index)
    }

    fn computer_turn(&mut self) -> Result<Transition, MatchError> {
        if self.mode != GameMode::HumanVsComputer || self.finished || !self.computer_gate_open() {
            return Err(self.illegal(GameAction::ComputerTurn));
        }
        let index = opponent::choose_move(&self.board, self.current_player, &mut self.rng)?;
        self.cursor.set(index);
        self.commit(index)
    }

    /// Place the current player's mark and settle the consequences
    fn commit(&mut self, index: usize) -> Result<Transition, MatchError> {
        let player = self.current_player;
        self.phase = Phase::ApplyingSelection;

        if let Err(err) = self.board.place_at(index, player) {
            self.phase = Phase::Playing;
            return Err(err);
        }
        self.cursor.clear();

        let outcome = if let Some(line) = self.board.winning_line(player) {
            self.board.check_win(player);
            self.scores[player.index()] += WIN_POINTS;
            Some(RoundOutcome::Won { player, line })
        } else if self.board.is_full() {
            self.scores[0] += DRAW_POINTS;
            self.scores[1] += DRAW_POINTS;
            Some(RoundOutcome::Draw)
        } else {
            None
        };

        let Some(outcome) = outcome else {
            let next = player.opponent();
            self.current_player = next;
            self.arm_computer_turn();
            self.phase = Phase::Playing;
            return Ok(Transition::TurnPassed { index, next });
        };

        self.finished = true;
        self.computer_pending = false;
        self.computer_wait_ms = 0;
        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        self.rounds_played += 1;
        self.last_round = Some(outcome);
        info!(
            ?outcome,
            scores = ?self.scores,
            lives_remaining = self.lives_remaining,
            "round over"
        );

        if self.lives_remaining == 0 {
            let series = self.end_series(false);
            return Ok(Transition::SeriesOver {
                round: outcome,
                series,
            });
        }

        self.phase = Phase::RoundFinished;
        Ok(Transition::RoundOver { index, outcome })
    }

    fn play_next_round(&mut self) -> Result<Transition, MatchError> {
        if self.phase != Phase::RoundFinished {
            return Err(self.illegal(GameAction::PlayNextRound));
        }

        self.board.reset();
        self.cursor.clear();
        self.finished = false;
        self.last_round = None;

        // The player who did not make the last move opens.
        let first = self.current_player.opponent();
        self.current_player = first;
        self.first_player = first;
        self.phase = Phase::Playing;
        self.arm_computer_turn();

        Ok(Transition::NextRound { first })
    }

    fn reset_series(&mut self) -> Transition {
        let abandoned = if self.started {
            Some(self.end_series(true))
        } else {
            self.clear_series();
            self.phase = Phase::NotStarted;
            self.can_restart_series = true;
            None
        };
        self.last_round = None;
        Transition::SeriesReset { abandoned }
    }

    /// Record the standings, then return to the start screen
    fn end_series(&mut self, abandoned: bool) -> SeriesResult {
        let result = SeriesResult {
            outcome: SeriesOutcome::from_scores(self.scores),
            mode: self.mode,
            scores: self.scores,
            rounds_played: self.rounds_played,
            abandoned,
        };
        info!(
            outcome = ?result.outcome,
            scores = ?result.scores,
            rounds = result.rounds_played,
            abandoned,
            "series over"
        );

        self.clear_series();
        self.phase = Phase::NotStarted;
        self.can_restart_series = true;
        self.last_series = Some(result);
        result
    }

    /// Reset board, cursor, scores, lives, mode and turn order
    fn clear_series(&mut self) {
        self.board.reset();
        self.cursor.clear();
        self.started = false;
        self.finished = false;
        self.current_player = Player::One;
        self.first_player = Player::One;
        self.lives_remaining = self.config.total_lives;
        self.scores = [0; 2];
        self.mode = GameMode::default();
        self.computer_pending = false;
        self.computer_wait_ms = 0;
        self.rounds_played = 0;
    }

    /// Arm the thinking clock when the computer is to move, disarm it otherwise
    fn arm_computer_turn(&mut self) {
        self.computer_pending =
            self.mode == GameMode::HumanVsComputer && self.current_player == COMPUTER_SEAT;
        self.computer_wait_ms = 0;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirstPlayer;

    fn quick_config() -> MatchConfig {
        MatchConfig {
            computer_delay_ms: 100,
            ..MatchConfig::default()
        }
        .with_seed(9)
    }

    #[test]
    fn test_new_match_state() {
        let state = MatchState::default();
        assert_eq!(state.phase(), Phase::NotStarted);
        assert!(!state.started());
        assert_eq!(state.lives_remaining(), DEFAULT_TOTAL_LIVES);
        assert_eq!(state.scores(), [0, 0]);
        assert_eq!(state.cursor(), None);
        assert!(!state.can_restart_series());
    }

    #[test]
    fn test_start_game_only_once() {
        let mut state = MatchState::default();
        let t = state
            .apply_action(GameAction::StartGame(GameMode::HumanVsHuman))
            .unwrap();
        assert_eq!(
            t,
            Transition::Started {
                mode: GameMode::HumanVsHuman,
                first: Player::One
            }
        );
        assert_eq!(
            state.apply_action(GameAction::StartGame(GameMode::HumanVsComputer)),
            Err(MatchError::IllegalTransition {
                action: GameAction::StartGame(GameMode::HumanVsComputer),
                phase: Phase::Playing,
            })
        );
        assert_eq!(state.mode(), GameMode::HumanVsHuman);
    }

    #[test]
    fn test_select_before_navigate_is_rejected() {
        let mut state = MatchState::default();
        state.press(Button::Navigate).unwrap();
        let before = state.snapshot();
        assert!(matches!(
            state.apply_action(GameAction::Select),
            Err(MatchError::IllegalTransition { .. })
        ));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_navigate_then_select_passes_turn() {
        let mut state = MatchState::default();
        state.press(Button::Navigate).unwrap();
        assert_eq!(
            state.apply_action(GameAction::Navigate),
            Ok(Transition::CursorMoved { index: 0 })
        );
        assert_eq!(
            state.apply_action(GameAction::Select),
            Ok(Transition::TurnPassed {
                index: 0,
                next: Player::Two
            })
        );
        assert_eq!(state.cursor(), None);
        assert_eq!(state.board().occupant(0), Some(Player::One));
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_applying_selection_rejects_everything() {
        let mut state = MatchState::default();
        state.press(Button::Navigate).unwrap();
        state.phase = Phase::ApplyingSelection;
        assert!(state.input_locked());

        for button in Button::ALL {
            assert!(matches!(
                state.press(button),
                Err(MatchError::IllegalTransition {
                    phase: Phase::ApplyingSelection,
                    ..
                })
            ));
        }
        assert!(!state.tick(10_000));
        assert!(state.started());
    }

    #[test]
    fn test_computer_gate_waits_for_delay() {
        let mut state = MatchState::new(MatchConfig {
            first_player: FirstPlayer::PlayerTwo,
            ..quick_config()
        });
        state.press(Button::Select).unwrap();
        assert_eq!(state.mode(), GameMode::HumanVsComputer);
        assert!(state.computer_turn_pending());

        // Humans cannot act for the computer.
        assert!(state.apply_action(GameAction::Navigate).is_err());

        assert!(!state.tick(60));
        assert!(matches!(
            state.apply_action(GameAction::ComputerTurn),
            Err(MatchError::IllegalTransition { .. })
        ));
        assert!(state.tick(40));

        let t = state.apply_action(GameAction::ComputerTurn).unwrap();
        assert!(matches!(
            t,
            Transition::TurnPassed {
                next: Player::One,
                ..
            }
        ));
        assert!(!state.computer_turn_pending());
        assert_eq!(state.computer_wait_ms(), 0);
        assert_eq!(state.board().occupied_by(Player::Two).len(), 1);
    }

    #[test]
    fn test_tick_is_inert_for_humans() {
        let mut state = MatchState::new(quick_config());
        assert!(!state.tick(1000));
        state.press(Button::Navigate).unwrap();
        assert!(!state.tick(1000));
        assert_eq!(state.computer_wait_ms(), 0);
    }

    #[test]
    fn test_computer_turn_rejected_in_human_mode() {
        let mut state = MatchState::new(quick_config());
        state.press(Button::Navigate).unwrap();
        assert!(state.apply_action(GameAction::ComputerTurn).is_err());
    }

    #[test]
    fn test_random_first_player_is_seeded() {
        let config = MatchConfig {
            first_player: FirstPlayer::Random,
            ..quick_config()
        };
        let mut a = MatchState::new(config.clone());
        let mut b = MatchState::new(config);
        for _ in 0..8 {
            a.press(Button::Navigate).unwrap();
            b.press(Button::Navigate).unwrap();
            assert_eq!(a.current_player(), b.current_player());
            a.press(Button::Back).unwrap();
            b.press(Button::Back).unwrap();
        }
    }

    #[test]
    fn test_reset_before_start_records_nothing() {
        let mut state = MatchState::default();
        assert_eq!(
            state.press(Button::Back),
            Ok(Transition::SeriesReset { abandoned: None })
        );
        assert!(state.can_restart_series());
        assert_eq!(state.last_series(), None);
    }

    #[test]
    fn test_reset_mid_series_records_abandoned_result() {
        let mut state = MatchState::default();
        state.press(Button::Navigate).unwrap();
        state.press(Button::Navigate).unwrap();
        state.press(Button::Select).unwrap();

        let t = state.press(Button::Back).unwrap();
        let Transition::SeriesReset {
            abandoned: Some(result),
        } = t
        else {
            panic!("expected an abandoned series, got {t:?}");
        };
        assert!(result.abandoned);
        assert_eq!(result.outcome, SeriesOutcome::Tie);
        assert_eq!(result.rounds_played, 0);
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.mode(), GameMode::HumanVsHuman);
    }
}
