//! # Time
//!
//! Millisecond timestamps and the clock abstraction every task reads.
//! Timestamps are `u32` milliseconds since boot and wrap after ~49.7
//! days. Wrap is not specially handled; callers use wrapping arithmetic
//! so a wrap never panics.

use core::cell::Cell;

/// Milliseconds since boot.
pub type Millis = u32;

/// A monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// A clock that only moves when told to.
///
/// Drives host tests and simulations. Interior mutability lets a task
/// holding `&ManualClock` advance time from inside its own action, which
/// is how a slow action is simulated.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub const fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get().wrapping_add(delta));
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
