//! # PressWatch Configuration
//!
//! Compile-time constants governing task cadence, button timing and LED
//! feedback. All values are in milliseconds unless stated otherwise.
//!
//! The constants are grouped into [`ButtonConfig`] and [`BlinkConfig`]
//! so the tasks can be built with other timings (host tests, bench
//! setups) without touching the defaults.

/// Number of tasks in the application task table.
pub const TASK_COUNT: usize = 3;

/// Task 1 (button + indicator LEDs) recurrence period.
pub const BUTTON_TASK_PERIOD_MS: u32 = 10;
/// Task 1 startup offset.
pub const BUTTON_TASK_OFFSET_MS: u32 = 0;

/// Task 2 (statistics + blink sequencer) recurrence period.
pub const STATS_TASK_PERIOD_MS: u32 = 50;
/// Task 2 startup offset. Staggers it off Task 1's first release.
pub const STATS_TASK_OFFSET_MS: u32 = 5;

/// Task 3 (report) recurrence period. Also the reporting window length.
pub const REPORT_TASK_PERIOD_MS: u32 = 10_000;
/// Task 3 startup offset. The first report goes out 2 s after boot.
pub const REPORT_TASK_OFFSET_MS: u32 = 2_000;

/// The button must hold a new level for this long before the FSM accepts it.
pub const DEBOUNCE_MS: u32 = 50;

/// A press strictly shorter than this is short; anything else is long.
pub const SHORT_PRESS_THRESHOLD_MS: u32 = 500;

/// How long the green/red indicator stays lit after a completed press.
pub const INDICATOR_DURATION_MS: u32 = 1_500;

/// Half-period of one blink step (100 ms on, 100 ms off).
pub const BLINK_HALF_PERIOD_MS: u32 = 100;

/// Blink steps for a short press: 5 blinks × 2 half-cycles.
pub const BLINK_STEPS_SHORT: u8 = 10;

/// Blink steps for a long press: 10 blinks × 2 half-cycles.
pub const BLINK_STEPS_LONG: u8 = 20;

/// SysTick frequency in Hz. One tick per millisecond.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (STM32F4 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Baud rate of the report console.
pub const SERIAL_BAUD: u32 = 9600;

/// Button FSM timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub debounce_ms: u32,
    pub short_press_threshold_ms: u32,
    pub indicator_duration_ms: u32,
}

impl ButtonConfig {
    pub const DEFAULT: Self = Self {
        debounce_ms: DEBOUNCE_MS,
        short_press_threshold_ms: SHORT_PRESS_THRESHOLD_MS,
        indicator_duration_ms: INDICATOR_DURATION_MS,
    };
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Blink sequencer timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    pub half_period_ms: u32,
    pub steps_short: u8,
    pub steps_long: u8,
}

impl BlinkConfig {
    pub const DEFAULT: Self = Self {
        half_period_ms: BLINK_HALF_PERIOD_MS,
        steps_short: BLINK_STEPS_SHORT,
        steps_long: BLINK_STEPS_LONG,
    };
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
