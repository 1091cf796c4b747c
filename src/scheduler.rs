//! # Scheduler
//!
//! Non-preemptive, earliest-deadline-first dispatcher. The application
//! calls [`Scheduler::tick`] from its main loop; each call runs at most
//! one task to completion.
//!
//! ## Scheduling Algorithm
//!
//! On every tick:
//! 1. **Sample time**: read `now` from the clock
//! 2. **Select**: among tasks with `next_deadline <= now`, pick the one
//!    with the smallest deadline (most overdue). Ties go to the task that
//!    comes first in the table
//! 3. **Run**: call its action exactly once
//! 4. **Advance**: `next_deadline += period`, re-read the clock, and
//!    re-anchor to `now + period` if the deadline is still behind
//!
//! If no task is due the tick does nothing.
//!
//! ## Fairness
//!
//! A short-period task that stays due keeps winning ties against longer
//! ones, but every deadline only moves forward, so no task starves as
//! long as actions return promptly. Nothing here can interrupt an action
//! that does not return: a blocking task freezes the whole system.

use crate::task::TaskDescriptor;
use crate::time::{Clock, Millis};

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// The dispatcher state: a fixed, ordered table of task descriptors.
///
/// `C` is the shared context lent to whichever task runs. `N` is fixed at
/// compile time; there is no heap and no dynamic registration.
pub struct Scheduler<'a, C, const N: usize> {
    tasks: [TaskDescriptor<'a, C>; N],
}

impl<'a, C, const N: usize> Scheduler<'a, C, N> {
    /// Wrap a task table. Deadlines are meaningless until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(tasks: [TaskDescriptor<'a, C>; N]) -> Self {
        Self { tasks }
    }

    /// Anchor every task's first deadline at `now + offset`.
    pub fn initialize(&mut self, now: Millis) {
        for (id, task) in self.tasks.iter_mut().enumerate() {
            task.start(now);
            trace!("task {} first release at {}", id, task.next_deadline);
        }
    }

    /// Index of the due task with the smallest deadline, if any.
    ///
    /// The strict `<` keeps the earliest table entry on ties.
    pub fn select(&self, now: Millis) -> Option<usize> {
        let mut chosen: Option<(usize, Millis)> = None;

        for (id, task) in self.tasks.iter().enumerate() {
            if !task.is_due(now) {
                continue;
            }
            match chosen {
                Some((_, earliest)) if task.next_deadline >= earliest => {}
                _ => chosen = Some((id, task.next_deadline)),
            }
        }

        chosen.map(|(id, _)| id)
    }

    /// Run one scheduler tick.
    ///
    /// # Returns
    /// - `Some(id)`: the table index of the task that ran
    /// - `None`: nothing was due
    pub fn tick<K>(&mut self, clock: &K, ctx: &mut C) -> Option<usize>
    where
        K: Clock + ?Sized,
    {
        let now = clock.now_ms();
        let id = self.select(now)?;
        let task = &mut self.tasks[id];

        if let Err(_err) = task.action.run(now, ctx) {
            warn!("task {} failed: {}", id, _err);
        }

        let deadline = task.next_deadline;
        if task.advance(clock.now_ms()) {
            warn!(
                "task {} fell behind (deadline {}), re-anchored to {}",
                id,
                deadline,
                task.next_deadline
            );
        }

        Some(id)
    }

    /// Next deadline of task `id`.
    ///
    /// # Panics
    /// If `id >= N`.
    pub fn deadline(&self, id: usize) -> Millis {
        self.tasks[id].next_deadline
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
