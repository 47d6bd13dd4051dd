//! Debounced button sampler.
//!
//! Turns per-iteration button levels into at most one press event per
//! physical press. Terminals deliver key presses rather than levels, so
//! queued key presses count as a level that is high for exactly one tick.
//!
//! Several presses of the same key queued within one tick merge into that
//! single level and yield one press. A tick is shorter than the debounce
//! window, so the extra presses would be rejected as bounce anyway.

use arrayvec::ArrayVec;

use crate::types::{Button, BUTTON_DEBOUNCE_MS};

/// Result of sampling the buttons once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Idle,
    Pressed(Button),
    /// Two or more buttons rose in the same tick. Swallowed, never resolved.
    Ambiguous,
}

#[derive(Debug, Clone)]
pub struct ButtonSampler {
    /// Levels seen on the previous sample
    levels: [bool; 3],
    queued: ArrayVec<Button, 8>,
    since_press_ms: [u32; 3],
    debounce_ms: u32,
}

impl ButtonSampler {
    pub fn new() -> Self {
        Self::with_debounce_ms(BUTTON_DEBOUNCE_MS)
    }

    pub fn with_debounce_ms(debounce_ms: u32) -> Self {
        Self {
            levels: [false; 3],
            queued: ArrayVec::new(),
            since_press_ms: [debounce_ms; 3],
            debounce_ms,
        }
    }

    /// Queue a key press for the next [`ButtonSampler::update`].
    pub fn handle_key_press(&mut self, button: Button) {
        // Overflow only drops presses that would have been ambiguous anyway.
        let _ = self.queued.try_push(button);
    }

    /// Sample the presses queued since the last call.
    pub fn update(&mut self, elapsed_ms: u32) -> Sample {
        let mut levels = [false; 3];
        for button in self.queued.drain(..) {
            levels[button.index()] = true;
        }
        // Key presses are momentary, so every queued press is a fresh edge.
        self.levels = [false; 3];
        self.sample(levels, elapsed_ms)
    }

    /// Sample raw levels (indexed by [`Button::index`]).
    ///
    /// A press is a rising edge at least `debounce_ms` after that button's
    /// previous accepted press.
    pub fn sample(&mut self, levels: [bool; 3], elapsed_ms: u32) -> Sample {
        for since in &mut self.since_press_ms {
            *since = since.saturating_add(elapsed_ms);
        }

        let mut edges = ArrayVec::<Button, 3>::new();
        for button in Button::ALL {
            let i = button.index();
            if levels[i] && !self.levels[i] && self.since_press_ms[i] >= self.debounce_ms {
                edges.push(button);
            }
        }
        self.levels = levels;

        for button in &edges {
            self.since_press_ms[button.index()] = 0;
        }

        match edges.as_slice() {
            [] => Sample::Idle,
            [button] => Sample::Pressed(*button),
            _ => Sample::Ambiguous,
        }
    }

    pub fn reset(&mut self) {
        self.levels = [false; 3];
        self.queued.clear();
        self.since_press_ms = [self.debounce_ms; 3];
    }
}

impl Default for ButtonSampler {
    fn default() -> Self {
        Self::new()
    }
}
