//! # Button Task (Task 1)
//!
//! Debounces an active-low push button, measures how long each press
//! lasts, classifies it as short or long, and lights a one-shot
//! indicator: green for short, red for long.
//!
//! ## Debounce state machine
//!
//! ```text
//!              LOW                      LOW held >= D
//!   ┌──────┐ ──────► ┌──────────────┐ ──────────────► ┌─────────┐
//!   │ Idle │         │ DebounceDown │                 │ Pressed │
//!   └──────┘ ◄────── └──────────────┘                 └─────────┘
//!      ▲     HIGH < D (glitch)                          │     ▲
//!      │                                           HIGH │     │ LOW < D
//!      │   HIGH held >= D                               ▼     │
//!      │   (emit PressEvent)                     ┌────────────┐
//!      └──────────────────────────────────────── │ DebounceUp │
//!                                                └────────────┘
//! ```
//!
//! Press duration runs from the moment the press is *confirmed* to the
//! first HIGH sample of the release that is later confirmed. Bounces on
//! release fall back to `Pressed` without restarting the measurement.
//!
//! The transitions are pure functions of `(state, input, now)`, so the
//! whole state machine is tested without any pins.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::ButtonConfig;
use crate::error::{self, Error};
use crate::kernel::Shared;
use crate::task::Task;
use crate::time::Millis;

// ---------------------------------------------------------------------------
// Press classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Strictly shorter than the threshold.
    Short,
    /// At or above the threshold.
    Long,
}

impl PressKind {
    #[inline]
    pub const fn classify(duration_ms: Millis, threshold_ms: Millis) -> Self {
        if duration_ms < threshold_ms {
            PressKind::Short
        } else {
            PressKind::Long
        }
    }
}

/// A completed, debounced press, handed from Task 1 to Task 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    pub duration_ms: Millis,
    pub kind: PressKind,
}

impl PressEvent {
    pub const fn new(duration_ms: Millis, threshold_ms: Millis) -> Self {
        Self {
            duration_ms,
            kind: PressKind::classify(duration_ms, threshold_ms),
        }
    }

    #[inline]
    pub fn is_short(&self) -> bool {
        self.kind == PressKind::Short
    }
}

// ---------------------------------------------------------------------------
// Debounce state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// No activity.
    #[default]
    Idle,
    /// Input went LOW at `since`; waiting for it to hold.
    DebounceDown { since: Millis },
    /// Press confirmed at `pressed_at`; measuring.
    Pressed { pressed_at: Millis },
    /// Input went HIGH at `released_at`; waiting for it to hold.
    DebounceUp {
        pressed_at: Millis,
        released_at: Millis,
    },
}

impl ButtonState {
    /// Advance the state machine by one sample.
    ///
    /// `is_low` is the raw button level (LOW = pressed). Emits an event
    /// only on the `DebounceUp → Idle` transition.
    pub fn step(
        self,
        is_low: bool,
        now: Millis,
        config: &ButtonConfig,
    ) -> (ButtonState, Option<PressEvent>) {
        match self {
            ButtonState::Idle => (on_idle(is_low, now), None),
            ButtonState::DebounceDown { since } => {
                (on_debounce_down(since, is_low, now, config.debounce_ms), None)
            }
            ButtonState::Pressed { pressed_at } => (on_pressed(pressed_at, is_low, now), None),
            ButtonState::DebounceUp {
                pressed_at,
                released_at,
            } => on_debounce_up(pressed_at, released_at, is_low, now, config),
        }
    }
}

fn on_idle(is_low: bool, now: Millis) -> ButtonState {
    if is_low {
        ButtonState::DebounceDown { since: now }
    } else {
        ButtonState::Idle
    }
}

fn on_debounce_down(since: Millis, is_low: bool, now: Millis, debounce_ms: Millis) -> ButtonState {
    if !is_low {
        trace!("button glitch rejected");
        ButtonState::Idle
    } else if now.wrapping_sub(since) >= debounce_ms {
        ButtonState::Pressed { pressed_at: now }
    } else {
        ButtonState::DebounceDown { since }
    }
}

fn on_pressed(pressed_at: Millis, is_low: bool, now: Millis) -> ButtonState {
    if is_low {
        ButtonState::Pressed { pressed_at }
    } else {
        ButtonState::DebounceUp {
            pressed_at,
            released_at: now,
        }
    }
}

fn on_debounce_up(
    pressed_at: Millis,
    released_at: Millis,
    is_low: bool,
    now: Millis,
    config: &ButtonConfig,
) -> (ButtonState, Option<PressEvent>) {
    if is_low {
        // Release bounce: still the same press.
        (ButtonState::Pressed { pressed_at }, None)
    } else if now.wrapping_sub(released_at) >= config.debounce_ms {
        let duration = released_at.wrapping_sub(pressed_at);
        let event = PressEvent::new(duration, config.short_press_threshold_ms);
        (ButtonState::Idle, Some(event))
    } else {
        (
            ButtonState::DebounceUp {
                pressed_at,
                released_at,
            },
            None,
        )
    }
}

// ---------------------------------------------------------------------------
// One-shot indicators
// ---------------------------------------------------------------------------

/// Absolute switch-off time of a one-shot indicator. `None` = disarmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorTimer {
    off_at: Option<Millis>,
}

impl IndicatorTimer {
    pub const fn new() -> Self {
        Self { off_at: None }
    }

    /// Arm (or re-arm) the timer. A later arm replaces the earlier one.
    pub fn arm(&mut self, off_at: Millis) {
        self.off_at = Some(off_at);
    }

    pub fn off_at(&self) -> Option<Millis> {
        self.off_at
    }

    /// Disarm and return `true` once `now` has reached the switch-off time.
    pub fn expire(&mut self, now: Millis) -> bool {
        match self.off_at {
            Some(off_at) if now >= off_at => {
                self.off_at = None;
                true
            }
            _ => false,
        }
    }
}

/// An indicator LED paired with its one-shot timer.
struct Indicator<P> {
    pin: P,
    timer: IndicatorTimer,
}

impl<P: OutputPin> Indicator<P> {
    fn new(pin: P) -> Self {
        Self {
            pin,
            timer: IndicatorTimer::new(),
        }
    }

    fn light(&mut self, now: Millis, duration_ms: Millis) -> Result<(), Error> {
        self.pin.set_high().map_err(error::pin)?;
        self.timer.arm(now.wrapping_add(duration_ms));
        Ok(())
    }

    fn poll(&mut self, now: Millis) -> Result<(), Error> {
        if self.timer.expire(now) {
            self.pin.set_low().map_err(error::pin)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Task 1
// ---------------------------------------------------------------------------

/// Task 1: button sampling, press measurement and indicator LEDs.
///
/// Owns the button input and the green/red outputs. Publishes each
/// completed press into [`Shared::press`].
pub struct ButtonTask<B, G, R> {
    button: B,
    green: Indicator<G>,
    red: Indicator<R>,
    state: ButtonState,
    config: ButtonConfig,
}

impl<B, G, R> ButtonTask<B, G, R>
where
    B: InputPin,
    G: OutputPin,
    R: OutputPin,
{
    pub fn new(button: B, green: G, red: R, config: ButtonConfig) -> Self {
        Self {
            button,
            green: Indicator::new(green),
            red: Indicator::new(red),
            state: ButtonState::Idle,
            config,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn green_timer(&self) -> IndicatorTimer {
        self.green.timer
    }

    pub fn red_timer(&self) -> IndicatorTimer {
        self.red.timer
    }

    fn signal(&mut self, event: &PressEvent, now: Millis) -> Result<(), Error> {
        let duration = self.config.indicator_duration_ms;
        match event.kind {
            PressKind::Short => self.green.light(now, duration),
            PressKind::Long => self.red.light(now, duration),
        }
    }
}

impl<B, G, R> Task<Shared> for ButtonTask<B, G, R>
where
    B: InputPin,
    G: OutputPin,
    R: OutputPin,
{
    fn run(&mut self, now: Millis, shared: &mut Shared) -> Result<(), Error> {
        let is_low = self.button.is_low().map_err(error::pin)?;

        let (next, event) = self.state.step(is_low, now, &self.config);
        self.state = next;

        if let Some(event) = event {
            debug!("press complete: {} ms ({})", event.duration_ms, event.kind);
            if let Some(_lost) = shared.press.publish(event) {
                warn!("unconsumed press of {} ms overwritten", _lost.duration_ms);
            }
            self.signal(&event, now)?;
        }

        self.green.poll(now)?;
        self.red.poll(now)
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
