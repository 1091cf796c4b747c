//! # Task Model
//!
//! A task is a periodic, run-to-completion action. The scheduler never
//! preempts it and never times it out, so every implementation must
//! return promptly on every call: an action that blocks or spins stalls
//! the whole system, including the time-sensitive button task.
//!
//! ## Descriptor lifecycle
//!
//! ```text
//!   TaskDescriptor::new(action, period, offset)     next_deadline = 0
//!        │
//!        ▼ Scheduler::initialize(now)
//!   next_deadline = now + offset
//!        │
//!        ▼ Scheduler::tick() selects it
//!   action.run(now, ctx)
//!   next_deadline += period          (or re-anchored to now + period)
//! ```

use crate::error::Error;
use crate::time::Millis;

// ---------------------------------------------------------------------------
// Runnable capability
// ---------------------------------------------------------------------------

/// The single capability the scheduler needs from a task.
///
/// `C` is the state shared between tasks. The scheduler lends it to
/// exactly one action at a time, which is what makes lock-free handoff
/// between tasks sound without any synchronization primitive.
pub trait Task<C> {
    /// Run one activation. `now` is the time the scheduler observed when
    /// it selected this task.
    fn run(&mut self, now: Millis, ctx: &mut C) -> Result<(), Error>;
}

impl<C, F> Task<C> for F
where
    F: FnMut(Millis, &mut C) -> Result<(), Error>,
{
    fn run(&mut self, now: Millis, ctx: &mut C) -> Result<(), Error> {
        self(now, ctx)
    }
}

// ---------------------------------------------------------------------------
// Task descriptor
// ---------------------------------------------------------------------------

/// Scheduling metadata for one periodic task. Owned and mutated only by
/// the scheduler.
pub struct TaskDescriptor<'a, C> {
    /// The action run on each activation.
    pub action: &'a mut dyn Task<C>,

    /// Recurrence period in milliseconds.
    pub period: Millis,

    /// Delay from initialization to the first activation.
    pub offset: Millis,

    /// Absolute time of the next activation. Valid after
    /// `Scheduler::initialize`.
    pub next_deadline: Millis,
}

impl<'a, C> TaskDescriptor<'a, C> {
    pub fn new(action: &'a mut dyn Task<C>, period: Millis, offset: Millis) -> Self {
        Self {
            action,
            period,
            offset,
            next_deadline: 0,
        }
    }

    /// Anchor the first deadline relative to `now`.
    #[inline]
    pub fn start(&mut self, now: Millis) {
        self.next_deadline = now.wrapping_add(self.offset);
    }

    #[inline]
    pub fn is_due(&self, now: Millis) -> bool {
        self.next_deadline <= now
    }

    /// Move the deadline one period forward, then re-anchor it to
    /// `after + period` if it is still behind `after`. Caps the backlog of
    /// a slow task at one extra period instead of replaying every missed
    /// activation.
    ///
    /// Returns `true` when re-anchoring happened.
    pub fn advance(&mut self, after: Millis) -> bool {
        self.next_deadline = self.next_deadline.wrapping_add(self.period);
        if self.next_deadline < after {
            self.next_deadline = after.wrapping_add(self.period);
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
