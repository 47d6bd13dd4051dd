//! Button diagnostic: prints every debounced sample the game would see.
//!
//! Useful for checking key bindings and the ambiguous-input policy without
//! starting a match. Press `q` to exit.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use tui_tictactoe::input::{map_key, should_quit, ButtonSampler, Sample};
use tui_tictactoe::types::TICK_MS;

fn main() -> Result<()> {
    terminal::enable_raw_mode()?;
    let result = run();
    let _ = terminal::disable_raw_mode();
    result
}

fn run() -> Result<()> {
    let mut out = io::stdout();
    write!(
        out,
        "navigate: Right/Tab/Space/n  select: Enter/s  back: Esc/Backspace/b  quit: q\r\n"
    )?;
    out.flush()?;

    let mut sampler = ButtonSampler::new();
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match map_key(key) {
                        Some(button) => sampler.handle_key_press(button),
                        None => {
                            let ms = started.elapsed().as_millis();
                            write!(out, "{ms:>8}ms  unmapped {:?}\r\n", key.code)?;
                            out.flush()?;
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let line = match sampler.update(TICK_MS) {
                Sample::Idle => continue,
                Sample::Pressed(button) => format!("pressed {}", button.as_str()),
                Sample::Ambiguous => "ambiguous (ignored)".to_string(),
            };
            write!(out, "{:>8}ms  {line}\r\n", started.elapsed().as_millis())?;
            out.flush()?;
        }
    }
}
