//! GameView: maps a [`MatchSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{MatchSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, MarkStyle, Player, RoundOutcome, SeriesOutcome, BOARD_SIDE, COMPUTER_SEAT};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 80, 20);
const WIN_BG: Rgb = Rgb::new(170, 40, 40);
const GRID_FG: Rgb = Rgb::new(200, 200, 200);
const ONE_FG: Rgb = Rgb::new(80, 220, 220);
const TWO_FG: Rgb = Rgb::new(255, 165, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Per-frame inputs that do not come from the match itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay<'a> {
    /// Whether blinking marks are lit this frame
    pub blink_lit: bool,
    /// Transient warning (e.g. ambiguous input)
    pub notice: Option<&'a str>,
}

impl Default for Overlay<'_> {
    fn default() -> Self {
        Self {
            blink_lit: true,
            notice: None,
        }
    }
}

/// Board-plus-panel renderer for the match.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 5x3 keeps cells roughly square in most terminal fonts.
        Self { cell_w: 5, cell_h: 3 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the board including border and grid lines.
    pub fn frame_size(&self) -> (u16, u16) {
        let side = BOARD_SIDE as u16;
        (
            side * self.cell_w + (side - 1) + 2,
            side * self.cell_h + (side - 1) + 2,
        )
    }

    /// Top-left corner of the board frame.
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Top-left corner of the inside of board cell `index`.
    pub fn cell_origin(&self, viewport: Viewport, index: usize) -> (u16, u16) {
        let (x0, y0) = self.board_origin(viewport);
        let col = (index % BOARD_SIDE) as u16;
        let row = (index / BOARD_SIDE) as u16;
        (
            x0 + 1 + col * (self.cell_w + 1),
            y0 + 1 + row * (self.cell_h + 1),
        )
    }

    /// Where the mark of cell `index` is drawn.
    pub fn cell_center(&self, viewport: Viewport, index: usize) -> (u16, u16) {
        let (x, y) = self.cell_origin(viewport, index);
        (x + self.cell_w / 2, y + self.cell_h / 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &MatchSnapshot,
        overlay: Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        self.draw_grid(fb, viewport);
        for index in 0..snap.cells.len() {
            self.draw_cell(fb, snap, overlay.blink_lit, viewport, index);
        }
        self.draw_side_panel(fb, snap, overlay.notice, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MatchSnapshot, overlay: Overlay<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let (x0, y0) = self.board_origin(viewport);
        let (w, h) = self.frame_size();
        let style = CellStyle::fg(GRID_FG);

        fb.fill_rect(x0 + 1, y0 + 1, w - 2, h - 2, ' ', CellStyle::fg(GRID_FG).on(BOARD_BG));

        let is_sep_x = |dx: u16| dx > 0 && dx < w - 1 && dx % (self.cell_w + 1) == 0;
        let is_sep_y = |dy: u16| dy > 0 && dy < h - 1 && dy % (self.cell_h + 1) == 0;

        for dy in 0..h {
            for dx in 0..w {
                let top = dy == 0;
                let bottom = dy == h - 1;
                let left = dx == 0;
                let right = dx == w - 1;
                let ch = match (top, bottom, left, right) {
                    (true, _, true, _) => '┌',
                    (true, _, _, true) => '┐',
                    (_, true, true, _) => '└',
                    (_, true, _, true) => '┘',
                    (true, _, _, _) if is_sep_x(dx) => '┬',
                    (_, true, _, _) if is_sep_x(dx) => '┴',
                    (true, _, _, _) | (_, true, _, _) => '─',
                    (_, _, true, _) if is_sep_y(dy) => '├',
                    (_, _, _, true) if is_sep_y(dy) => '┤',
                    (_, _, true, _) | (_, _, _, true) => '│',
                    _ if is_sep_x(dx) && is_sep_y(dy) => '┼',
                    _ if is_sep_x(dx) => '│',
                    _ if is_sep_y(dy) => '─',
                    _ => continue,
                };
                let on_board = !(top || bottom || left || right);
                let style = if on_board { style.on(BOARD_BG) } else { style };
                fb.put_char(x0 + dx, y0 + dy, ch, style);
            }
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &MatchSnapshot,
        blink_lit: bool,
        viewport: Viewport,
        index: usize,
    ) {
        let cell = snap.cells[index];
        let pending = snap.pending.filter(|p| p.index == index);

        let bg = if cell.winning {
            WIN_BG
        } else if pending.is_some() {
            CURSOR_BG
        } else {
            BOARD_BG
        };
        let (x, y) = self.cell_origin(viewport, index);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', CellStyle::default().on(bg));

        let (cx, cy) = self.cell_center(viewport, index);
        if let Some(player) = cell.occupant {
            // Winning marks stay lit so the line is readable.
            let lit = cell.winning || cell.style != Some(MarkStyle::Blinking) || blink_lit;
            if lit {
                let fg = if cell.winning { Rgb::new(255, 255, 255) } else { player_color(player) };
                fb.put_char(cx, cy, player.glyph(), CellStyle::fg(fg).on(bg).bold());
            }
        } else if let Some(mark) = pending {
            let style = CellStyle::fg(player_color(mark.player)).on(bg).dim();
            fb.put_char(cx, cy, mark.player.glyph(), style);
        } else {
            fb.put_char(cx, cy, '·', CellStyle::fg(Rgb::new(90, 90, 100)).on(bg).dim());
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &MatchSnapshot,
        notice: Option<&str>,
        viewport: Viewport,
    ) {
        let (x0, mut y) = self.board_origin(viewport);
        let (frame_w, _) = self.frame_size();
        let panel_x = x0.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let value_x = panel_x + 7;

        fb.put_str(panel_x, y, "TIC-TAC-TOE", label);
        y += 2;

        fb.put_str(panel_x, y, "Mode", label);
        fb.put_str(value_x, y, if snap.started { snap.mode.label() } else { "-" }, value);
        y += 1;

        fb.put_str(panel_x, y, "Turn", label);
        if snap.started && snap.phase != Phase::RoundFinished {
            let player = snap.current_player;
            let x = fb.put_str(value_x, y, seat_name(snap.mode, player), value);
            fb.put_char(x + 1, y, player.glyph(), CellStyle::fg(player_color(player)).bold());
        } else {
            fb.put_str(value_x, y, "-", value);
        }
        y += 1;

        fb.put_str(panel_x, y, "Lives", label);
        let mut x = value_x;
        if snap.total_lives <= 10 {
            for i in 0..snap.total_lives {
                let (ch, style) = if i < snap.lives_remaining {
                    ('♥', CellStyle::fg(Rgb::new(220, 80, 80)))
                } else {
                    ('·', value.dim())
                };
                fb.put_char(x, y, ch, style);
                x += 1;
            }
            x += 1;
        }
        x = fb.put_u32(x, y, snap.lives_remaining, value);
        x = fb.put_str(x, y, "/", value);
        fb.put_u32(x, y, snap.total_lives, value);
        y += 1;

        fb.put_str(panel_x, y, "Score", label);
        y += 1;
        for player in [Player::One, Player::Two] {
            fb.put_char(panel_x + 1, y, player.glyph(), CellStyle::fg(player_color(player)).bold());
            fb.put_str(panel_x + 3, y, seat_name(snap.mode, player), value);
            fb.put_u32(panel_x + 13, y, snap.score(player), value);
            y += 1;
        }
        y += 1;

        if let Some(text) = banner(snap) {
            fb.put_str(panel_x, y, &text, CellStyle::fg(Rgb::new(240, 220, 80)).bold());
        }
        y += 1;

        for line in prompts(snap) {
            fb.put_str(panel_x, y, line, value.dim());
            y += 1;
        }

        if let Some(text) = notice {
            fb.put_str(panel_x, y, text, CellStyle::fg(Rgb::new(255, 90, 90)).bold());
        }
    }
}

/// How a seat is named on screen.
pub fn seat_name(mode: GameMode, player: Player) -> &'static str {
    match (mode, player) {
        (GameMode::HumanVsComputer, p) if p == COMPUTER_SEAT => "Computer",
        (_, Player::One) => "Player 1",
        (_, Player::Two) => "Player 2",
    }
}

/// Headline for the current phase, if any.
pub fn banner(snap: &MatchSnapshot) -> Option<String> {
    if snap.computer_thinking {
        return Some("Computer is thinking...".to_string());
    }

    match snap.phase {
        Phase::RoundFinished => snap.last_round.map(|outcome| match outcome {
            RoundOutcome::Won { player, .. } => format!("{} wins!", seat_name(snap.mode, player)),
            RoundOutcome::Draw => "Draw!".to_string(),
        }),
        Phase::NotStarted => {
            let Some(series) = snap.last_series else {
                return Some("Welcome!".to_string());
            };
            let [one, two] = series.scores;
            let verdict = match series.outcome {
                SeriesOutcome::Winner(player) => {
                    format!("{} wins the series {one}-{two}", seat_name(series.mode, player))
                }
                SeriesOutcome::Tie => format!("Series tied {one}-{two}"),
            };
            Some(if series.abandoned {
                format!("Abandoned. {verdict}")
            } else {
                verdict
            })
        }
        Phase::Playing | Phase::ApplyingSelection => None,
    }
}

/// Button hints for the current phase.
pub fn prompts(snap: &MatchSnapshot) -> [&'static str; 2] {
    match snap.phase {
        Phase::NotStarted => ["Navigate: Human vs Human", "Select: Computer vs Human"],
        Phase::Playing if snap.computer_thinking => ["Back: end series", ""],
        Phase::Playing => ["Navigate: move  Select: place", "Back: end series"],
        Phase::RoundFinished => ["Navigate: next round", "Select: end series"],
        Phase::ApplyingSelection => ["", ""],
    }
}

fn player_color(player: Player) -> Rgb {
    match player {
        Player::One => ONE_FG,
        Player::Two => TWO_FG,
    }
}
