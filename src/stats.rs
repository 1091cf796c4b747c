//! # Statistics Task (Task 2)
//!
//! Drains the press mailbox, accumulates the reporting-window counters
//! and plays a yellow blink sequence for every press: a few blinks for a
//! short press, more for a long one.
//!
//! ## Blink sequencer
//!
//! A sequence is a count of half-cycle *steps*. Arming turns the LED on
//! immediately; every `half_period_ms` after that one step flips the LED
//! and decrements the count. When the count reaches zero the LED is
//! forced off, so a sequence never ends lit, whatever the parity of the
//! step count. A new press while a sequence is running restarts it.

use embedded_hal::digital::OutputPin;

use crate::button::{PressEvent, PressKind};
use crate::config::BlinkConfig;
use crate::error::{self, Error};
use crate::kernel::Shared;
use crate::task::Task;
use crate::time::Millis;

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Press statistics for the current reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Counters {
    pub total_presses: u32,
    pub short_presses: u32,
    pub long_presses: u32,
    pub total_duration_ms: u32,
}

impl Counters {
    pub const fn new() -> Self {
        Self {
            total_presses: 0,
            short_presses: 0,
            long_presses: 0,
            total_duration_ms: 0,
        }
    }

    /// Fold one press into the window.
    pub fn record(&mut self, event: &PressEvent) {
        self.total_presses = self.total_presses.saturating_add(1);
        self.total_duration_ms = self.total_duration_ms.saturating_add(event.duration_ms);
        match event.kind {
            PressKind::Short => self.short_presses = self.short_presses.saturating_add(1),
            PressKind::Long => self.long_presses = self.long_presses.saturating_add(1),
        }
    }

    /// Integer mean press duration; `0` for an empty window.
    pub fn average_ms(&self) -> u32 {
        if self.total_presses == 0 {
            0
        } else {
            self.total_duration_ms / self.total_presses
        }
    }

    /// Snapshot the window and reset every counter to zero.
    pub fn take(&mut self) -> Counters {
        core::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.total_presses == 0
    }
}

// ---------------------------------------------------------------------------
// Blink sequencer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlinkSequencer {
    steps_remaining: u8,
    last_toggle_ms: Millis,
    led_on: bool,
}

impl BlinkSequencer {
    pub const fn new() -> Self {
        Self {
            steps_remaining: 0,
            last_toggle_ms: 0,
            led_on: false,
        }
    }

    /// Start (or restart) a sequence of `steps` half-cycles with the LED
    /// on as of `now`. Zero steps cancels any running sequence and leaves
    /// the LED off.
    pub fn arm(&mut self, steps: u8, now: Millis) {
        self.steps_remaining = steps;
        self.last_toggle_ms = now;
        self.led_on = steps > 0;
    }

    /// Advance the sequence. Returns the new LED level when it changed.
    pub fn advance(&mut self, now: Millis, half_period_ms: Millis) -> Option<bool> {
        if self.steps_remaining == 0 {
            return None;
        }
        if now.wrapping_sub(self.last_toggle_ms) < half_period_ms {
            return None;
        }

        self.led_on = !self.led_on;
        self.last_toggle_ms = now;
        self.steps_remaining -= 1;

        if self.steps_remaining == 0 {
            self.led_on = false;
        }
        Some(self.led_on)
    }

    pub fn is_running(&self) -> bool {
        self.steps_remaining > 0
    }

    pub fn steps_remaining(&self) -> u8 {
        self.steps_remaining
    }

    pub fn led_on(&self) -> bool {
        self.led_on
    }
}

// ---------------------------------------------------------------------------
// Task 2
// ---------------------------------------------------------------------------

/// Task 2: statistics update and yellow activity blink.
pub struct StatsTask<Y> {
    led: Y,
    blink: BlinkSequencer,
    config: BlinkConfig,
}

impl<Y: OutputPin> StatsTask<Y> {
    pub fn new(led: Y, config: BlinkConfig) -> Self {
        Self {
            led,
            blink: BlinkSequencer::new(),
            config,
        }
    }

    pub fn sequencer(&self) -> &BlinkSequencer {
        &self.blink
    }

    fn steps_for(&self, kind: PressKind) -> u8 {
        match kind {
            PressKind::Short => self.config.steps_short,
            PressKind::Long => self.config.steps_long,
        }
    }
}

impl<Y: OutputPin> Task<Shared> for StatsTask<Y> {
    fn run(&mut self, now: Millis, shared: &mut Shared) -> Result<(), Error> {
        if let Some(event) = shared.press.take() {
            shared.counters.record(&event);
            trace!("window: {} presses", shared.counters.total_presses);

            if self.blink.is_running() {
                debug!("blink restarted with {} steps left", self.blink.steps_remaining());
            }
            self.blink.arm(self.steps_for(event.kind), now);
            self.led.set_state(self.blink.led_on().into()).map_err(error::pin)?;
        }

        if let Some(on) = self.blink.advance(now, self.config.half_period_ms) {
            self.led.set_state(on.into()).map_err(error::pin)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
