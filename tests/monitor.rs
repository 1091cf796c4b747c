//! End-to-end runs of the three-task monitor on a simulated clock.

use std::cell::Cell;

use presswatch::button::{ButtonState, ButtonTask, PressEvent};
use presswatch::config::{BlinkConfig, ButtonConfig, REPORT_TASK_PERIOD_MS, SHORT_PRESS_THRESHOLD_MS};
use presswatch::kernel::{self, Shared, BUTTON_TASK, REPORT_TASK, STATS_TASK};
use presswatch::report::ReportTask;
use presswatch::sim::SimPin;
use presswatch::stats::StatsTask;
use presswatch::time::{Clock, ManualClock, Millis};

/// Physical lines of the board. `button` is HIGH (true) when released.
struct Board {
    button: Cell<bool>,
    green: Cell<bool>,
    red: Cell<bool>,
    yellow: Cell<bool>,
}

impl Board {
    fn new() -> Self {
        Self {
            button: Cell::new(true),
            green: Cell::new(false),
            red: Cell::new(false),
            yellow: Cell::new(false),
        }
    }
}

type Button<'b> = ButtonTask<SimPin<'b>, SimPin<'b>, SimPin<'b>>;

struct Tasks<'b> {
    button: Button<'b>,
    stats: StatsTask<SimPin<'b>>,
    report: ReportTask<String>,
}

impl<'b> Tasks<'b> {
    fn new(board: &'b Board) -> Self {
        Self {
            button: ButtonTask::new(
                SimPin::new(&board.button),
                SimPin::new(&board.green),
                SimPin::new(&board.red),
                ButtonConfig::DEFAULT,
            ),
            stats: StatsTask::new(SimPin::new(&board.yellow), BlinkConfig::DEFAULT),
            report: ReportTask::new(String::new(), REPORT_TASK_PERIOD_MS, SHORT_PRESS_THRESHOLD_MS),
        }
    }
}

/// Drain every due task at each millisecond from now through `until`
/// inclusive. Returns the ids of the tasks that ran, in order.
fn run_until(
    clock: &ManualClock,
    scheduler: &mut kernel::AppScheduler<'_>,
    shared: &mut Shared,
    until: Millis,
) -> Vec<usize> {
    let mut ran = Vec::new();
    loop {
        while let Some(id) = scheduler.tick(clock, shared) {
            ran.push(id);
        }
        if clock.now_ms() >= until {
            return ran;
        }
        clock.advance(1);
    }
}

#[test]
fn test_short_press_flows_from_button_to_statistics() {
    let board = Board::new();
    let clock = ManualClock::new(0);
    let mut tasks = Tasks::new(&board);
    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut tasks.button, &mut tasks.stats, &mut tasks.report),
    );

    // Button task samples at 0, 10, 20 ... LOW seen at 0, press
    // confirmed at 50.
    board.button.set(false);
    run_until(&clock, &mut scheduler, &mut shared, 349);
    board.button.set(true);
    // Release seen at 350, confirmed at 400, consumed by stats at 405.
    run_until(&clock, &mut scheduler, &mut shared, 402);

    assert_eq!(shared.press.peek(), Some(&PressEvent::new(300, 500)));
    assert!(board.green.get());
    assert!(!board.red.get());

    run_until(&clock, &mut scheduler, &mut shared, 406);
    assert!(!shared.press.is_pending());
    assert_eq!(shared.counters.total_presses, 1);
    assert_eq!(shared.counters.short_presses, 1);
    assert_eq!(shared.counters.total_duration_ms, 300);
    assert!(board.yellow.get());

    // Short sequence: 10 half-cycles of 100 ms, polled every 50 ms.
    run_until(&clock, &mut scheduler, &mut shared, 1_500);
    assert!(!board.yellow.get());

    // Green indicator turns off 1.5 s after the confirmed release.
    run_until(&clock, &mut scheduler, &mut shared, 1_899);
    assert!(board.green.get());
    run_until(&clock, &mut scheduler, &mut shared, 1_900);
    assert!(!board.green.get());

    drop(scheduler);
    assert_eq!(tasks.button.state(), ButtonState::Idle);
}

#[test]
fn test_report_window_closes_and_resets() {
    let board = Board::new();
    let clock = ManualClock::new(0);
    let mut tasks = Tasks::new(&board);
    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut tasks.button, &mut tasks.stats, &mut tasks.report),
    );

    // First report at 2 s covers an empty window.
    run_until(&clock, &mut scheduler, &mut shared, 2_000);

    // One long press: first LOW sample at 2110, confirmed at 2160,
    // released at 3110.
    run_until(&clock, &mut scheduler, &mut shared, 2_100);
    board.button.set(false);
    run_until(&clock, &mut scheduler, &mut shared, 3_100);
    board.button.set(true);
    run_until(&clock, &mut scheduler, &mut shared, 3_500);

    assert_eq!(shared.counters.long_presses, 1);
    assert!(board.red.get());

    // Second report at 12 s.
    run_until(&clock, &mut scheduler, &mut shared, 12_000);
    assert!(shared.counters.is_empty());
    assert!(!board.red.get());
    assert!(!board.yellow.get());

    drop(scheduler);
    let out = tasks.report.into_sink();
    let reports: Vec<&str> = out.split("===== [10s Report] =====").skip(1).collect();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].contains("Total presses    : 0\r\n"));
    assert!(reports[0].contains("Average duration : 0 ms\r\n"));
    assert!(reports[1].contains("Total presses    : 1\r\n"));
    assert!(reports[1].contains("Short presses    : 0  (< 500 ms)\r\n"));
    assert!(reports[1].contains("Long presses     : 1  (>= 500 ms)\r\n"));
    assert!(reports[1].contains("Average duration : 950 ms\r\n"));
}

#[test]
fn test_glitches_never_reach_the_statistics() {
    let board = Board::new();
    let clock = ManualClock::new(0);
    let mut tasks = Tasks::new(&board);
    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut tasks.button, &mut tasks.stats, &mut tasks.report),
    );

    // 30 ms LOW spikes, each spanning at most 3 button samples.
    for start in (100..1_000).step_by(200) {
        run_until(&clock, &mut scheduler, &mut shared, start);
        board.button.set(false);
        run_until(&clock, &mut scheduler, &mut shared, start + 30);
        board.button.set(true);
    }
    run_until(&clock, &mut scheduler, &mut shared, 1_500);

    assert!(shared.counters.is_empty());
    assert!(!board.green.get());
    assert!(!board.red.get());
    assert!(!board.yellow.get());
}

#[test]
fn test_one_task_per_tick_and_cadence() {
    let board = Board::new();
    let clock = ManualClock::new(0);
    let mut tasks = Tasks::new(&board);
    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut tasks.button, &mut tasks.stats, &mut tasks.report),
    );

    // At t=0 only the button task is due; a second tick finds nothing.
    assert_eq!(scheduler.tick(&clock, &mut shared), Some(BUTTON_TASK));
    assert_eq!(scheduler.tick(&clock, &mut shared), None);

    let ran = run_until(&clock, &mut scheduler, &mut shared, 10_000);
    let count = |id| ran.iter().filter(|&&r| r == id).count();

    // Button: 10..=10000 every 10 ms. Stats: 5..=9955 every 50 ms.
    assert_eq!(count(BUTTON_TASK), 1_000);
    assert_eq!(count(STATS_TASK), 200);
    assert_eq!(count(REPORT_TASK), 1);
    assert_eq!(scheduler.deadline(REPORT_TASK), 12_000);
}

#[test]
fn test_overdue_tasks_drain_earliest_first() {
    let board = Board::new();
    let clock = ManualClock::new(0);
    let mut tasks = Tasks::new(&board);
    let mut shared = Shared::new();
    let mut scheduler = kernel::init(
        &clock,
        kernel::task_table(&mut tasks.button, &mut tasks.stats, &mut tasks.report),
    );
    scheduler.tick(&clock, &mut shared);

    // The main loop stalls until 2 s: every task is overdue.
    clock.set(2_000);
    let mut order = Vec::new();
    while let Some(id) = scheduler.tick(&clock, &mut shared) {
        order.push(id);
    }

    // stats (deadline 5) beats button (10) beats report (2000); each runs
    // once and is re-anchored, so there is no catch-up burst.
    assert_eq!(order, [STATS_TASK, BUTTON_TASK, REPORT_TASK]);
    assert_eq!(scheduler.deadline(STATS_TASK), 2_050);
    assert_eq!(scheduler.deadline(BUTTON_TASK), 2_010);
    assert_eq!(scheduler.deadline(REPORT_TASK), 12_000);
}
