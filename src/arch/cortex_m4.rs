//! # Cortex-M4 Port Layer
//!
//! Millisecond time base for the ARM Cortex-M4, built on SysTick.
//!
//! SysTick fires at `TICK_HZ` (1 kHz) and its handler increments a
//! 32-bit millisecond counter. The counter is the only datum shared with
//! interrupt context; it is an `AtomicU32`, so readers in thread mode
//! never need a critical section.
//!
//! ## Interrupt Priorities
//!
//! SysTick runs at the lowest priority (0xFF). It does nothing but bump
//! the counter, so it can be delayed by any other ISR without affecting
//! more than the latency of one millisecond update.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};
use cortex_m_rt::exception;

use crate::config::TICK_HZ;
use crate::time::{Clock, Millis};

/// Milliseconds since `SysTickClock::start`.
static MILLIS: AtomicU32 = AtomicU32::new(0);

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Configure SysTick to fire at `TICK_HZ` from the core clock.
///
/// # Parameters
/// - `syst`: the SysTick peripheral
/// - `sysclk_hz`: the core clock frequency actually configured
pub fn configure_systick(syst: &mut SYST, sysclk_hz: u32) {
    let reload = sysclk_hz / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

/// Put SysTick at the lowest exception priority.
pub fn set_interrupt_priorities(scb: &mut SCB) {
    unsafe {
        // Only lowers the priority; cannot break a priority-based critical section.
        scb.set_priority(SystemHandler::SysTick, 0xFF);
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// The SysTick-driven monotonic clock.
///
/// Holding the `SYST` peripheral proves SysTick was configured by this
/// port and keeps anything else from reprogramming it.
pub struct SysTickClock {
    _syst: SYST,
}

impl SysTickClock {
    /// Start the 1 kHz time base. The clock reads 0 at this point.
    pub fn start(mut syst: SYST, scb: &mut SCB, sysclk_hz: u32) -> Self {
        MILLIS.store(0, Ordering::Relaxed);
        set_interrupt_priorities(scb);
        configure_systick(&mut syst, sysclk_hz);
        Self { _syst: syst }
    }
}

impl Clock for SysTickClock {
    #[inline]
    fn now_ms(&self) -> Millis {
        MILLIS.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// Called at `TICK_HZ`. Wraps after ~49.7 days.
#[exception]
fn SysTick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}
