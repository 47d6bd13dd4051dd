//! Terminal tic-tac-toe runner (default binary).
//!
//! Owns the polling loop: samples the keyboard as three buttons, routes
//! presses into the match, opens the computer-turn gate, and redraws.
//!
//! Environment:
//! - `TICTACTOE_LIVES`, `TICTACTOE_THINK_MS`, `TICTACTOE_FIRST_PLAYER`, `TICTACTOE_SEED`: match config
//! - `TICTACTOE_LOG_PATH`: write tracing output to this file (`TICTACTOE_LOG` sets the filter)
//! - `TICTACTOE_SNAPSHOT_LOG`: append one JSON line per accepted transition

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_tictactoe::core::{MatchConfig, MatchError, MatchSnapshot, MatchState, Transition};
use tui_tictactoe::input::{map_key, should_quit, ButtonSampler, Sample};
use tui_tictactoe::term::{BlinkClock, FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use tui_tictactoe::types::{GameAction, TICK_MS};

/// How long the ambiguous-input warning stays on screen.
const NOTICE_MS: u32 = 1500;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = MatchConfig::from_env();
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    info!(?config, "starting match");

    let mut trace = SnapshotTrace::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, MatchState::new(config), trace.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn env_path(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// File-backed tracing; the terminal itself is busy with the board.
fn init_logging() -> Result<()> {
    let Some(path) = env_path("TICTACTOE_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TICTACTOE_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[derive(Serialize)]
struct TraceRecord<'a> {
    ts_ms: u64,
    transition: &'a Transition,
    snapshot: &'a MatchSnapshot,
}

/// JSONL trace of accepted transitions.
struct SnapshotTrace {
    out: BufWriter<File>,
    started: Instant,
}

impl SnapshotTrace {
    fn from_env() -> Result<Option<Self>> {
        let Some(path) = env_path("TICTACTOE_SNAPSHOT_LOG") else {
            return Ok(None);
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening snapshot log {path}"))?;
        Ok(Some(Self {
            out: BufWriter::new(file),
            started: Instant::now(),
        }))
    }

    fn record(&mut self, transition: &Transition, snapshot: &MatchSnapshot) -> Result<()> {
        let record = TraceRecord {
            ts_ms: self.started.elapsed().as_millis() as u64,
            transition,
            snapshot,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Trace an accepted transition. Rejections are already logged by the core.
fn settle(
    result: Result<Transition, MatchError>,
    game: &MatchState,
    trace: Option<&mut SnapshotTrace>,
) -> Result<()> {
    if let (Ok(transition), Some(trace)) = (result, trace) {
        trace.record(&transition, &game.snapshot())?;
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    mut game: MatchState,
    mut trace: Option<&mut SnapshotTrace>,
) -> Result<()> {
    let view = GameView::default();
    let mut sampler = ButtonSampler::new();
    let mut blink = BlinkClock::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = MatchSnapshot::default();

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut notice_ms: u32 = 0;

    loop {
        // Render.
        blink.update(started.elapsed().as_millis() as u64);
        game.snapshot_into(&mut snap);
        let overlay = Overlay {
            blink_lit: blink.lit(),
            notice: (notice_ms > 0).then_some("One button at a time, please"),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, overlay, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(button) = map_key(key) {
                        sampler.handle_key_press(button);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            notice_ms = notice_ms.saturating_sub(TICK_MS);

            match sampler.update(TICK_MS) {
                Sample::Idle => {}
                Sample::Pressed(button) => {
                    let result = game.press(button);
                    settle(result, &game, trace.as_deref_mut())?;
                }
                Sample::Ambiguous => {
                    warn!("simultaneous buttons ignored");
                    notice_ms = NOTICE_MS;
                }
            }

            if game.tick(TICK_MS) {
                let result = game.apply_action(GameAction::ComputerTurn);
                settle(result, &game, trace.as_deref_mut())?;
            }
        }
    }
}
