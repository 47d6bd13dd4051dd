//! Blink cadence for marks rendered as [`MarkStyle::Blinking`](crate::types::MarkStyle).
//!
//! The core only says which marks blink; this clock decides whether they are
//! lit on a given frame.

use crate::types::BLINK_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct BlinkClock {
    interval_ms: u64,
    last_toggle_ms: u64,
    lit: bool,
    started: bool,
}

impl BlinkClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            last_toggle_ms: 0,
            lit: true,
            started: false,
        }
    }

    /// Whether blinking marks are drawn this frame.
    pub fn lit(&self) -> bool {
        self.lit
    }

    /// Advance to `now_ms`. Returns true when the lit state flipped and the
    /// frame needs redrawing.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.started {
            self.started = true;
            self.last_toggle_ms = now_ms;
            return false;
        }

        if now_ms.saturating_sub(self.last_toggle_ms) < self.interval_ms {
            return false;
        }

        self.lit = !self.lit;
        self.last_toggle_ms = now_ms;
        true
    }
}

impl Default for BlinkClock {
    fn default() -> Self {
        Self::new(BLINK_INTERVAL_MS as u64)
    }
}
