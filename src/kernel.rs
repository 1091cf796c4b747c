//! # Kernel
//!
//! Application wiring: the state shared between the three tasks, the
//! task table with its periods and offsets, and the endless dispatch
//! loop.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         ├─► configure pins, console, SysTick
//!         ├─► report::write_banner()
//!         ├─► kernel::task_table()   ← Task 1..3 with period/offset
//!         ├─► kernel::init()         ← Anchor deadlines at now + offset
//!         └─► kernel::run()          ← tick() forever (no return)
//! ```
//!
//! ## Shared state
//!
//! `Shared` is owned by `main` and lent by `&mut` to the one task that
//! is running. The borrow checker rules out two tasks touching it at
//! once, so the mailbox and counters need no locks.

use crate::button::PressEvent;
use crate::config::{
    BUTTON_TASK_OFFSET_MS, BUTTON_TASK_PERIOD_MS, REPORT_TASK_OFFSET_MS, REPORT_TASK_PERIOD_MS,
    STATS_TASK_OFFSET_MS, STATS_TASK_PERIOD_MS, TASK_COUNT,
};
use crate::scheduler::Scheduler;
use crate::stats::Counters;
use crate::sync::Mailbox;
use crate::task::{Task, TaskDescriptor};
use crate::time::Clock;

/// Index of each task in the table, which is also its tie-break order.
pub const BUTTON_TASK: usize = 0;
pub const STATS_TASK: usize = 1;
pub const REPORT_TASK: usize = 2;

/// State handed between tasks.
///
/// | Field | Writer | Reader |
/// |-------|--------|--------|
/// | `press` | Task 1 (publish) | Task 2 (take) |
/// | `counters` | Task 2 (record) | Task 3 (take + reset) |
#[derive(Debug, Default)]
pub struct Shared {
    pub press: Mailbox<PressEvent>,
    pub counters: Counters,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            press: Mailbox::new(),
            counters: Counters::new(),
        }
    }
}

/// The application scheduler type.
pub type AppScheduler<'a> = Scheduler<'a, Shared, TASK_COUNT>;

/// Build the application task table.
///
/// | Task | Period | Offset |
/// |------|--------|--------|
/// | button | 10 ms | 0 |
/// | stats | 50 ms | 5 ms |
/// | report | 10 s | 2 s |
pub fn task_table<'a>(
    button: &'a mut dyn Task<Shared>,
    stats: &'a mut dyn Task<Shared>,
    report: &'a mut dyn Task<Shared>,
) -> [TaskDescriptor<'a, Shared>; TASK_COUNT] {
    [
        TaskDescriptor::new(button, BUTTON_TASK_PERIOD_MS, BUTTON_TASK_OFFSET_MS),
        TaskDescriptor::new(stats, STATS_TASK_PERIOD_MS, STATS_TASK_OFFSET_MS),
        TaskDescriptor::new(report, REPORT_TASK_PERIOD_MS, REPORT_TASK_OFFSET_MS),
    ]
}

/// Create the scheduler and anchor every deadline to the current time.
pub fn init<'a, K>(clock: &K, tasks: [TaskDescriptor<'a, Shared>; TASK_COUNT]) -> AppScheduler<'a>
where
    K: Clock + ?Sized,
{
    let mut scheduler = Scheduler::new(tasks);
    let now = clock.now_ms();
    scheduler.initialize(now);
    info!("scheduler started at {} ms", now);
    scheduler
}

/// Drive the scheduler forever. **Does not return.**
///
/// `idle` is called whenever a tick found nothing due; on hardware it
/// sleeps until the next interrupt.
pub fn run<K, I>(clock: &K, scheduler: &mut AppScheduler<'_>, shared: &mut Shared, mut idle: I) -> !
where
    K: Clock + ?Sized,
    I: FnMut(),
{
    loop {
        if scheduler.tick(clock, shared).is_none() {
            idle();
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
